use crate::model::{CmdletDescriptor, CommandKind, FunctionDescriptor, ParameterDescriptor, ParameterSetDescriptor};

/// Read-only view over a cmdlet or function.
#[derive(Debug, Clone, Copy)]
pub struct CommandQuery<'a> {
    name: &'a str,
    kind: CommandKind,
    inner: &'a CmdletDescriptor,
    cmdlet_binding: Option<bool>,
}

impl<'a> CommandQuery<'a> {
    pub fn cmdlet(name: &'a str, inner: &'a CmdletDescriptor) -> Self {
        CommandQuery {
            name,
            kind: CommandKind::Cmdlet,
            inner,
            cmdlet_binding: None,
        }
    }

    pub fn function(name: &'a str, inner: &'a FunctionDescriptor) -> Self {
        CommandQuery {
            name,
            kind: CommandKind::Function,
            inner: &inner.command,
            cmdlet_binding: inner.cmdlet_binding,
        }
    }

    /// Stored name of the command (the alias target when reached through an alias).
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// `CmdletBinding` for functions; always `None` for cmdlets.
    pub fn cmdlet_binding(&self) -> Option<bool> {
        self.cmdlet_binding
    }

    pub fn output_types(&self) -> Option<&'a [String]> {
        self.inner.output_types.as_deref()
    }

    pub fn parameter_sets(&self) -> Option<&'a [String]> {
        self.inner.parameter_sets.as_deref()
    }

    pub fn default_parameter_set(&self) -> Option<&'a str> {
        self.inner.default_parameter_set.as_deref()
    }

    /// Resolve by parameter name, falling back to parameter aliases.
    pub fn parameter(&self, name: &str) -> Option<ParameterQuery<'a>> {
        self.inner
            .resolve_parameter(name)
            .map(|(name, inner)| ParameterQuery { name, inner })
    }

    /// All parameters in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = ParameterQuery<'a>> + 'a {
        self.inner
            .parameters
            .iter()
            .flat_map(|parameters| parameters.iter())
            .map(|(name, inner)| ParameterQuery { name: name.as_str(), inner })
    }

    pub fn parameter_aliases(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.inner
            .parameter_aliases
            .iter()
            .flat_map(|aliases| aliases.iter())
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }

    pub fn descriptor(&self) -> &'a CmdletDescriptor {
        self.inner
    }
}

/// Read-only view over one parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterQuery<'a> {
    name: &'a str,
    inner: &'a ParameterDescriptor,
}

impl<'a> ParameterQuery<'a> {
    pub fn new(name: &'a str, inner: &'a ParameterDescriptor) -> Self {
        ParameterQuery { name, inner }
    }

    /// Canonical parameter name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn type_name(&self) -> Option<&'a str> {
        self.inner.type_name.as_deref()
    }

    pub fn is_dynamic(&self) -> Option<bool> {
        self.inner.dynamic
    }

    pub fn parameter_set(&self, name: &str) -> Option<&'a ParameterSetDescriptor> {
        self.inner.parameter_set(name)
    }

    pub fn parameter_sets(&self) -> impl Iterator<Item = (&'a str, &'a ParameterSetDescriptor)> + 'a {
        self.inner
            .parameter_sets
            .iter()
            .flat_map(|sets| sets.iter())
            .map(|(name, set)| (name.as_str(), set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pscompat_common::{CaseInsensitiveMap, ParameterSetFlag};

    fn set_content() -> CmdletDescriptor {
        let mut cmdlet = CmdletDescriptor {
            default_parameter_set: Some("Path".into()),
            ..CmdletDescriptor::default()
        };
        let mut sets = CaseInsensitiveMap::new();
        sets.insert(
            "Path",
            ParameterSetDescriptor {
                position: Some(1),
                flags: Some(vec![ParameterSetFlag::Mandatory, ParameterSetFlag::ValueFromPipeline]),
            },
        );
        cmdlet.insert_parameter(
            "Value",
            ParameterDescriptor {
                type_name: Some("System.Object[]".into()),
                parameter_sets: Some(sets),
                dynamic: None,
            },
        );
        cmdlet.insert_parameter(
            "Encoding",
            ParameterDescriptor {
                dynamic: Some(true),
                ..ParameterDescriptor::of_type("System.Text.Encoding")
            },
        );
        cmdlet.insert_parameter_alias("Val", "Value");
        cmdlet
    }

    #[test]
    fn test_parameter_via_alias_reports_canonical_name() {
        let cmdlet = set_content();
        let query = CommandQuery::cmdlet("Set-Content", &cmdlet);
        let param = query.parameter("VAL").unwrap();
        assert_eq!(param.name(), "Value");
        assert!(param.parameter_set("path").unwrap().is_mandatory());
        assert_eq!(param.is_dynamic(), None);
        assert_eq!(query.parameter("encoding").unwrap().is_dynamic(), Some(true));
    }

    #[test]
    fn test_absent_fields_are_none() {
        let cmdlet = set_content();
        let query = CommandQuery::cmdlet("Set-Content", &cmdlet);
        assert!(query.output_types().is_none());
        assert!(query.parameter_sets().is_none());
        assert_eq!(query.default_parameter_set(), Some("Path"));
        assert!(query.cmdlet_binding().is_none());
        assert_eq!(query.kind(), CommandKind::Cmdlet);
    }

    #[test]
    fn test_parameters_listed_in_order() {
        let cmdlet = set_content();
        let query = CommandQuery::cmdlet("Set-Content", &cmdlet);
        let names: Vec<_> = query.parameters().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Value", "Encoding"]);
        assert_eq!(query.parameter_aliases().collect::<Vec<_>>(), vec![("Val", "Value")]);
    }

    #[test]
    fn test_function_facade() {
        let function = FunctionDescriptor {
            command: CmdletDescriptor::default(),
            cmdlet_binding: Some(true),
        };
        let query = CommandQuery::function("Get-Verb", &function);
        assert_eq!(query.kind(), CommandKind::Function);
        assert_eq!(query.cmdlet_binding(), Some(true));
        assert_eq!(query.parameters().count(), 0);
    }
}
