//! Command descriptors: cmdlets, functions, parameters and native commands.
//!
//! Command, parameter, alias and parameter-set names resolve
//! case-insensitively, as the shell does.

use pscompat_common::{eq_ignore_case, CaseInsensitiveMap, ParameterSetFlag, SemanticVersion};
use serde::{Deserialize, Serialize};

/// How a parameter participates in one parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterSetDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<ParameterSetFlag>>,
}

impl ParameterSetDescriptor {
    pub fn has_flag(&self, flag: ParameterSetFlag) -> bool {
        self.flags.iter().flatten().any(|f| *f == flag)
    }

    pub fn is_mandatory(&self) -> bool {
        self.has_flag(ParameterSetFlag::Mandatory)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDescriptor {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Parameter set name to the parameter's role in that set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_sets: Option<CaseInsensitiveMap<ParameterSetDescriptor>>,

    /// True for dynamic parameters, which only appear in some contexts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
}

impl ParameterDescriptor {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        ParameterDescriptor {
            type_name: Some(type_name.into()),
            ..ParameterDescriptor::default()
        }
    }

    pub fn parameter_set(&self, name: &str) -> Option<&ParameterSetDescriptor> {
        self.parameter_sets.as_ref()?.get(name)
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic.unwrap_or(false)
    }
}

/// Parameters, parameter sets and output types of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CmdletDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_types: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_sets: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_parameter_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<CaseInsensitiveMap<ParameterDescriptor>>,

    /// Parameter alias to canonical parameter name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_aliases: Option<CaseInsensitiveMap<String>>,
}

impl CmdletDescriptor {
    /// Add a parameter, creating the map on first use.
    pub fn insert_parameter(
        &mut self,
        name: impl Into<String>,
        parameter: ParameterDescriptor,
    ) -> Option<ParameterDescriptor> {
        self.parameters
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(name, parameter)
    }

    pub fn insert_parameter_alias(
        &mut self,
        alias: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Option<String> {
        self.parameter_aliases
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(alias, canonical.into())
    }

    /// Resolve `name` by parameter name first, then by alias.
    ///
    /// Returns the canonical (stored) parameter name with its descriptor.
    pub fn resolve_parameter(&self, name: &str) -> Option<(&str, &ParameterDescriptor)> {
        let parameters = self.parameters.as_ref()?;
        if let Some((canonical, parameter)) = parameters.get_key_value(name) {
            return Some((canonical.as_str(), parameter));
        }
        let target = self.parameter_aliases.as_ref()?.get(name)?;
        parameters
            .get_key_value(target)
            .map(|(canonical, parameter)| (canonical.as_str(), parameter))
    }

    /// True when the declared parameter sets include `name`.
    pub fn has_parameter_set(&self, name: &str) -> bool {
        self.parameter_sets
            .iter()
            .flatten()
            .any(|set| eq_ignore_case(set, name))
    }
}

/// A PowerShell function: a command shape plus whether it is an advanced function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionDescriptor {
    #[serde(flatten)]
    pub command: CmdletDescriptor,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdlet_binding: Option<bool>,
}

impl FunctionDescriptor {
    pub fn is_advanced(&self) -> bool {
        self.cmdlet_binding.unwrap_or(false)
    }
}

/// An executable found on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NativeCommandDescriptor {
    /// File version, when the executable reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<SemanticVersion>,

    pub path: String,
}

impl NativeCommandDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        NativeCommandDescriptor {
            version: None,
            path: path.into(),
        }
    }
}

/// Native command name to every executable of that name, in search order.
pub type NativeCommandMap = CaseInsensitiveMap<Vec<NativeCommandDescriptor>>;
