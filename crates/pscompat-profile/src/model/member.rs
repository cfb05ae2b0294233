//! Reflected .NET member and type descriptors.
//!
//! Member and type names are case-sensitive, as .NET reflection reports
//! them, so member maps use [`OrdinalMap`].

use pscompat_common::{AccessorType, OrdinalMap};
use serde::{Deserialize, Serialize};

/// A field: only its type is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// A property and the accessors it exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyDescriptor {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessors: Option<Vec<AccessorType>>,
}

impl PropertyDescriptor {
    pub fn new(type_name: impl Into<String>, accessors: &[AccessorType]) -> Self {
        PropertyDescriptor {
            type_name: Some(type_name.into()),
            accessors: Some(accessors.to_vec()),
        }
    }

    /// True when the accessor list is known and contains `accessor`.
    pub fn has_accessor(&self, accessor: AccessorType) -> bool {
        self.accessors
            .as_ref()
            .map(|list| list.contains(&accessor))
            .unwrap_or(false)
    }
}

/// A method name's return type and every overload's parameter types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MethodDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    /// One entry per overload, each the ordered parameter type names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overload_parameters: Option<Vec<Vec<String>>>,
}

impl MethodDescriptor {
    /// True when some overload takes exactly `arity` parameters.
    pub fn has_overload_with_arity(&self, arity: usize) -> bool {
        self.overload_parameters
            .iter()
            .flatten()
            .any(|overload| overload.len() == arity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multicast: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_type: Option<String>,
}

/// An indexer (`this[...]`); indexers are unnamed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexerDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessors: Option<Vec<AccessorType>>,
}

/// Constructor overloads, serialized as the bare array of parameter type lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstructorDescriptor {
    pub overload_parameters: Vec<Vec<String>>,
}

impl ConstructorDescriptor {
    /// True when a parameterless constructor exists.
    pub fn has_default(&self) -> bool {
        self.overload_parameters.iter().any(Vec::is_empty)
    }
}

/// Members of one kind-scope (static or instance) of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<OrdinalMap<FieldDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<OrdinalMap<PropertyDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<OrdinalMap<MethodDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<OrdinalMap<EventDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexers: Option<Vec<IndexerDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructors: Option<ConstructorDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_types: Option<OrdinalMap<TypeDescriptor>>,
}

impl MemberBag {
    /// True when no member kind is present at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_none()
            && self.properties.is_none()
            && self.methods.is_none()
            && self.events.is_none()
            && self.indexers.is_none()
            && self.constructors.is_none()
            && self.nested_types.is_none()
    }

    /// True when any member kind defines `name`.
    pub fn has_member(&self, name: &str) -> bool {
        self.fields.as_ref().is_some_and(|m| m.contains_key(name))
            || self.properties.as_ref().is_some_and(|m| m.contains_key(name))
            || self.methods.as_ref().is_some_and(|m| m.contains_key(name))
            || self.events.as_ref().is_some_and(|m| m.contains_key(name))
            || self.nested_types.as_ref().is_some_and(|m| m.contains_key(name))
    }
}

/// Static and instance members of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeDescriptor {
    #[serde(rename = "Static", skip_serializing_if = "Option::is_none")]
    pub r#static: Option<MemberBag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<MemberBag>,
}

impl TypeDescriptor {
    /// Nested type by its simple name, static bag first.
    pub fn nested_type(&self, name: &str) -> Option<&TypeDescriptor> {
        [&self.r#static, &self.instance]
            .into_iter()
            .flatten()
            .find_map(|bag| bag.nested_types.as_ref()?.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_serialization_shape() {
        let prop = PropertyDescriptor::new("System.String", &[AccessorType::Get]);
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json, serde_json::json!({ "Type": "System.String", "Accessors": ["Get"] }));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let json = serde_json::to_string(&TypeDescriptor::default()).unwrap();
        assert_eq!(json, "{}");

        let bag = MemberBag {
            methods: Some(OrdinalMap::new()),
            ..MemberBag::default()
        };
        assert_eq!(serde_json::to_string(&bag).unwrap(), r#"{"Methods":{}}"#);
    }

    #[test]
    fn test_static_keyword_field_name() {
        let ty: TypeDescriptor = serde_json::from_str(r#"{"Static":{"Fields":{"MaxValue":{"Type":"System.Int32"}}}}"#).unwrap();
        let fields = ty.r#static.as_ref().and_then(|s| s.fields.as_ref()).unwrap();
        assert_eq!(fields.get("MaxValue").unwrap().type_name.as_deref(), Some("System.Int32"));
        assert!(ty.instance.is_none());
    }

    #[test]
    fn test_constructor_is_bare_array() {
        let ctor = ConstructorDescriptor {
            overload_parameters: vec![vec![], vec!["System.Int32".to_string()]],
        };
        assert_eq!(serde_json::to_string(&ctor).unwrap(), r#"[[],["System.Int32"]]"#);
        assert!(ctor.has_default());
    }

    #[test]
    fn test_method_overload_arity() {
        let method = MethodDescriptor {
            return_type: Some("System.String".into()),
            overload_parameters: Some(vec![vec!["System.Char".into()], vec!["System.Char".into(), "System.Int32".into()]]),
        };
        assert!(method.has_overload_with_arity(2));
        assert!(!method.has_overload_with_arity(0));
        assert!(!MethodDescriptor::default().has_overload_with_arity(0));
    }

    #[test]
    fn test_member_names_case_sensitive() {
        let mut methods = OrdinalMap::new();
        methods.insert("ToString", MethodDescriptor::default());
        let bag = MemberBag {
            methods: Some(methods),
            ..MemberBag::default()
        };
        assert!(bag.has_member("ToString"));
        assert!(!bag.has_member("tostring"));
        assert!(!bag.is_empty());
    }
}
