use crate::model::assembly::split_full_name;
use crate::model::{
    AssemblyDescriptor, AvailableTypes, ConstructorDescriptor, EventDescriptor, FieldDescriptor, IndexerDescriptor,
    MemberBag, MethodDescriptor, PropertyDescriptor, TypeAcceleratorDescriptor, TypeDescriptor,
};
use pscompat_common::{OrdinalMap, SemanticVersion};

/// Read-only view over every type available in a runtime.
#[derive(Debug, Clone, Copy)]
pub struct TypesQuery<'a> {
    inner: &'a AvailableTypes,
}

impl<'a> TypesQuery<'a> {
    pub fn new(inner: &'a AvailableTypes) -> Self {
        TypesQuery { inner }
    }

    pub fn from_option(inner: Option<&'a AvailableTypes>) -> Option<Self> {
        inner.map(TypesQuery::new)
    }

    pub fn assembly(&self, name: &str) -> Option<AssemblyQuery<'a>> {
        self.inner.assemblies.as_ref()?.get(name).map(AssemblyQuery::new)
    }

    pub fn assemblies(&self) -> impl Iterator<Item = AssemblyQuery<'a>> + 'a {
        self.inner
            .assemblies
            .iter()
            .flat_map(|assemblies| assemblies.values())
            .map(AssemblyQuery::new)
    }

    pub fn type_accelerator(&self, name: &str) -> Option<&'a TypeAcceleratorDescriptor> {
        self.inner.type_accelerators.as_ref()?.get(name)
    }

    /// Find a type by full name, searching assemblies in document order.
    pub fn find_type(&self, full_name: &str) -> Option<TypeQuery<'a>> {
        self.assemblies().find_map(|assembly| assembly.find_type(full_name))
    }

    /// Resolve what a script could write in brackets: an accelerator
    /// (`[psobject]`, any casing) or a full type name.
    pub fn resolve(&self, name: &str) -> Option<TypeQuery<'a>> {
        let name = name.trim_start_matches('[').trim_end_matches(']');
        if let Some(accelerator) = self.type_accelerator(name) {
            let target = &accelerator.type_name;
            return self
                .assembly(&accelerator.assembly)
                .and_then(|assembly| assembly.find_type(target))
                .or_else(|| self.find_type(target));
        }
        self.find_type(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AssemblyQuery<'a> {
    inner: &'a AssemblyDescriptor,
}

impl<'a> AssemblyQuery<'a> {
    pub fn new(inner: &'a AssemblyDescriptor) -> Self {
        AssemblyQuery { inner }
    }

    pub fn name(&self) -> &'a str {
        &self.inner.assembly_name.name
    }

    pub fn version(&self) -> Option<&'a SemanticVersion> {
        self.inner.assembly_name.version.as_ref()
    }

    pub fn culture(&self) -> Option<&'a str> {
        self.inner.assembly_name.culture.as_deref()
    }

    pub fn public_key_token(&self) -> Option<&'a str> {
        self.inner.assembly_name.public_key_token.as_deref()
    }

    pub fn full_name(&self) -> String {
        self.inner.assembly_name.full_name()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.inner
            .types
            .iter()
            .flat_map(|namespaces| namespaces.keys())
            .map(String::as_str)
    }

    pub fn type_names(&self, namespace: &str) -> Vec<&'a str> {
        self.inner
            .types
            .as_ref()
            .and_then(|namespaces| namespaces.get(namespace))
            .map(|types| types.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn get_type(&self, namespace: &str, type_name: &str) -> Option<TypeQuery<'a>> {
        let (stored_namespace, types) = self.inner.types.as_ref()?.get_key_value(namespace)?;
        let (stored_name, ty) = types.get_key_value(type_name)?;
        Some(TypeQuery {
            assembly: self.name(),
            namespace: stored_namespace,
            declaring: None,
            name: stored_name,
            inner: ty,
        })
    }

    /// Find a type by full name, descending into nested types for each
    /// `+` segment (`System.String+Enumerator`).
    pub fn find_type(&self, full_name: &str) -> Option<TypeQuery<'a>> {
        let (namespace, type_path) = split_full_name(full_name);
        if let Some(ty) = self.get_type(namespace, type_path) {
            return Some(ty);
        }
        let mut segments = type_path.split('+');
        let outer = self.get_type(namespace, segments.next()?)?;
        segments.try_fold(outer, |ty, name| ty.nested_type(name))
    }

    pub fn type_count(&self) -> usize {
        self.inner.type_count()
    }
}

/// One type, with where it was found.
#[derive(Debug, Clone)]
pub struct TypeQuery<'a> {
    assembly: &'a str,
    namespace: &'a str,
    /// `Outer` or `Outer+Middle` for nested types.
    declaring: Option<String>,
    name: &'a str,
    inner: &'a TypeDescriptor,
}

impl<'a> TypeQuery<'a> {
    pub fn assembly(&self) -> &'a str {
        self.assembly
    }

    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Simple name, without namespace or declaring types.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Declaring type path of a nested type, `None` for top-level types.
    pub fn declaring_type(&self) -> Option<&str> {
        self.declaring.as_deref()
    }

    pub fn is_nested(&self) -> bool {
        self.declaring.is_some()
    }

    /// Type path within the namespace: `String` or `String+Enumerator`.
    pub fn type_path(&self) -> String {
        match &self.declaring {
            Some(declaring) => format!("{}+{}", declaring, self.name),
            None => self.name.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.type_path()
        } else {
            format!("{}.{}", self.namespace, self.type_path())
        }
    }

    /// Nested type declared by this one, static members first.
    pub fn nested_type(&self, name: &str) -> Option<TypeQuery<'a>> {
        self.static_members()
            .and_then(|members| members.nested_type(name))
            .or_else(|| self.instance_members().and_then(|members| members.nested_type(name)))
    }

    pub fn static_members(&self) -> Option<MembersQuery<'a>> {
        self.inner.r#static.as_ref().map(|inner| MembersQuery {
            owner: self.clone(),
            inner,
        })
    }

    pub fn instance_members(&self) -> Option<MembersQuery<'a>> {
        self.inner.instance.as_ref().map(|inner| MembersQuery {
            owner: self.clone(),
            inner,
        })
    }
}

/// Static or instance members of one type.
#[derive(Debug, Clone)]
pub struct MembersQuery<'a> {
    owner: TypeQuery<'a>,
    inner: &'a MemberBag,
}

impl<'a> MembersQuery<'a> {
    pub fn field(&self, name: &str) -> Option<&'a FieldDescriptor> {
        self.inner.fields.as_ref()?.get(name)
    }

    pub fn property(&self, name: &str) -> Option<&'a PropertyDescriptor> {
        self.inner.properties.as_ref()?.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&'a MethodDescriptor> {
        self.inner.methods.as_ref()?.get(name)
    }

    pub fn event(&self, name: &str) -> Option<&'a EventDescriptor> {
        self.inner.events.as_ref()?.get(name)
    }

    pub fn indexers(&self) -> Option<&'a [IndexerDescriptor]> {
        self.inner.indexers.as_deref()
    }

    pub fn constructors(&self) -> Option<&'a ConstructorDescriptor> {
        self.inner.constructors.as_ref()
    }

    /// A nested type, named `Outer+Inner` in its full name.
    pub fn nested_type(&self, name: &str) -> Option<TypeQuery<'a>> {
        let (stored_name, inner) = self.inner.nested_types.as_ref()?.get_key_value(name)?;
        Some(TypeQuery {
            assembly: self.owner.assembly,
            namespace: self.owner.namespace,
            declaring: Some(self.owner.type_path()),
            name: stored_name,
            inner,
        })
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.inner.has_member(name)
    }

    pub fn field_names(&self) -> Vec<&'a str> {
        names(self.inner.fields.as_ref())
    }

    pub fn property_names(&self) -> Vec<&'a str> {
        names(self.inner.properties.as_ref())
    }

    pub fn method_names(&self) -> Vec<&'a str> {
        names(self.inner.methods.as_ref())
    }

    pub fn event_names(&self) -> Vec<&'a str> {
        names(self.inner.events.as_ref())
    }
}

fn names<V>(map: Option<&OrdinalMap<V>>) -> Vec<&str> {
    map.map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
