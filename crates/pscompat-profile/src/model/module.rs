use super::command::{CmdletDescriptor, FunctionDescriptor, NativeCommandMap};
use pscompat_common::CaseInsensitiveMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commands and aliases exposed by one module at one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdlets: Option<CaseInsensitiveMap<CmdletDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<CaseInsensitiveMap<FunctionDescriptor>>,

    /// Alias name to the command it stands for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<CaseInsensitiveMap<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_commands: Option<NativeCommandMap>,

    /// Exported variable names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
}

/// What a command name resolved to inside one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Cmdlet,
    Function,
    Alias,
    Native,
}

impl ModuleDescriptor {
    pub fn insert_cmdlet(&mut self, name: impl Into<String>, cmdlet: CmdletDescriptor) -> Option<CmdletDescriptor> {
        self.cmdlets
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(name, cmdlet)
    }

    pub fn insert_function(
        &mut self,
        name: impl Into<String>,
        function: FunctionDescriptor,
    ) -> Option<FunctionDescriptor> {
        self.functions
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(name, function)
    }

    pub fn insert_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.aliases
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(alias, target.into())
    }

    pub fn cmdlet(&self, name: &str) -> Option<&CmdletDescriptor> {
        self.cmdlets.as_ref()?.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.as_ref()?.get(name)
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.as_ref()?.get(alias).map(String::as_str)
    }

    /// Which kind of command `name` is. Cmdlets win over functions, then
    /// aliases, then native commands.
    pub fn command_kind(&self, name: &str) -> Option<CommandKind> {
        if self.cmdlets.as_ref().is_some_and(|m| m.contains_key(name)) {
            Some(CommandKind::Cmdlet)
        } else if self.functions.as_ref().is_some_and(|m| m.contains_key(name)) {
            Some(CommandKind::Function)
        } else if self.aliases.as_ref().is_some_and(|m| m.contains_key(name)) {
            Some(CommandKind::Alias)
        } else if self.native_commands.as_ref().is_some_and(|m| m.contains_key(name)) {
            Some(CommandKind::Native)
        } else {
            None
        }
    }

    /// Number of cmdlets plus functions.
    pub fn command_count(&self) -> usize {
        self.cmdlets.as_ref().map_or(0, |m| m.len()) + self.functions.as_ref().map_or(0, |m| m.len())
    }
}
