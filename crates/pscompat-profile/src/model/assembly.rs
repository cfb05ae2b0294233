//! Assemblies and the types they make available.

use super::member::TypeDescriptor;
use pscompat_common::{CaseInsensitiveMap, OrdinalMap, SemanticVersion};
use serde::{Deserialize, Serialize};

/// Namespace to type name to type descriptor (both case-sensitive).
pub type NamespaceMap = OrdinalMap<OrdinalMap<TypeDescriptor>>;

/// Structured assembly identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyNameDescriptor {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<SemanticVersion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_token: Option<String>,
}

impl AssemblyNameDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        AssemblyNameDescriptor {
            name: name.into(),
            ..AssemblyNameDescriptor::default()
        }
    }

    /// Display name in the .NET `Name, Version=..., Culture=..., PublicKeyToken=...` form.
    pub fn full_name(&self) -> String {
        let mut full = self.name.clone();
        if let Some(version) = &self.version {
            full.push_str(&format!(", Version={}", version));
        }
        if let Some(culture) = &self.culture {
            full.push_str(&format!(", Culture={}", culture));
        }
        if let Some(token) = &self.public_key_token {
            full.push_str(&format!(", PublicKeyToken={}", token));
        }
        full
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyDescriptor {
    pub assembly_name: AssemblyNameDescriptor,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<NamespaceMap>,
}

impl AssemblyDescriptor {
    pub fn new(assembly_name: AssemblyNameDescriptor) -> Self {
        AssemblyDescriptor {
            assembly_name,
            types: None,
        }
    }

    /// Record `ty` as `namespace.type_name`, creating the namespace if needed.
    pub fn insert_type(
        &mut self,
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        ty: TypeDescriptor,
    ) -> Option<TypeDescriptor> {
        self.types
            .get_or_insert_with(NamespaceMap::new)
            .get_or_insert_with(namespace, OrdinalMap::new)
            .insert(type_name, ty)
    }

    pub fn get_type(&self, namespace: &str, type_name: &str) -> Option<&TypeDescriptor> {
        self.types
            .as_ref()
            .and_then(|namespaces| namespaces.get(namespace))
            .and_then(|types| types.get(type_name))
    }

    /// Look a type up by its full name (`System.IO.File`).
    ///
    /// Nested types are named `Outer+Inner`. A type path stored verbatim
    /// under the namespace wins; otherwise each `+` segment descends into
    /// the nested types of the previous one.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDescriptor> {
        let (namespace, type_path) = split_full_name(full_name);
        if let Some(ty) = self.get_type(namespace, type_path) {
            return Some(ty);
        }
        let mut segments = type_path.split('+');
        let outer = self.get_type(namespace, segments.next()?)?;
        segments.try_fold(outer, |ty, name| ty.nested_type(name))
    }

    /// Number of types across all namespaces.
    pub fn type_count(&self) -> usize {
        self.types
            .as_ref()
            .map(|namespaces| namespaces.values().map(|types| types.len()).sum())
            .unwrap_or(0)
    }
}

/// Split `Namespace.Type` into namespace and type path.
///
/// The namespace ends at the last dot before any `+`, so
/// `System.String+Enumerator` splits into `System` and `String+Enumerator`.
/// Types without a namespace get `""`.
pub fn split_full_name(full_name: &str) -> (&str, &str) {
    let outer_end = full_name.find('+').unwrap_or(full_name.len());
    match full_name[..outer_end].rfind('.') {
        Some(dot) => (&full_name[..dot], &full_name[dot + 1..]),
        None => ("", full_name),
    }
}

/// Target of a PowerShell type accelerator such as `[int]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeAcceleratorDescriptor {
    /// Simple name of the assembly defining the type.
    pub assembly: String,

    /// Full name of the accelerated type.
    #[serde(rename = "Type")]
    pub type_name: String,
}

/// Every type observable in the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AvailableTypes {
    /// Assemblies keyed by simple assembly name (case-sensitive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assemblies: Option<OrdinalMap<AssemblyDescriptor>>,

    /// Accelerator name (`int`, `psobject`) to target; resolved case-insensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_accelerators: Option<CaseInsensitiveMap<TypeAcceleratorDescriptor>>,
}

impl AvailableTypes {
    /// Find a type by full name across all assemblies, with the assembly it came from.
    pub fn find_type(&self, full_name: &str) -> Option<(&AssemblyDescriptor, &TypeDescriptor)> {
        self.assemblies.as_ref()?.values().find_map(|assembly| {
            assembly.find_type(full_name).map(|ty| (assembly, ty))
        })
    }

    /// Resolve a type accelerator (without brackets).
    pub fn accelerator(&self, name: &str) -> Option<&TypeAcceleratorDescriptor> {
        self.type_accelerators.as_ref()?.get(name)
    }
}
