use super::command::CommandQuery;
use crate::model::{CommandKind, ModuleDescriptor, NativeCommandDescriptor};
use pscompat_common::SemanticVersion;
use uuid::Uuid;

/// Read-only view over one module at one version.
#[derive(Debug, Clone, Copy)]
pub struct ModuleQuery<'a> {
    name: &'a str,
    version: &'a SemanticVersion,
    inner: &'a ModuleDescriptor,
}

impl<'a> ModuleQuery<'a> {
    pub fn new(name: &'a str, version: &'a SemanticVersion, inner: &'a ModuleDescriptor) -> Self {
        ModuleQuery { name, version, inner }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn version(&self) -> &'a SemanticVersion {
        self.version
    }

    pub fn guid(&self) -> Option<Uuid> {
        self.inner.guid
    }

    pub fn cmdlet(&self, name: &str) -> Option<CommandQuery<'a>> {
        let (stored, cmdlet) = self.inner.cmdlets.as_ref()?.get_key_value(name)?;
        Some(CommandQuery::cmdlet(stored, cmdlet))
    }

    pub fn function(&self, name: &str) -> Option<CommandQuery<'a>> {
        let (stored, function) = self.inner.functions.as_ref()?.get_key_value(name)?;
        Some(CommandQuery::function(stored, function))
    }

    pub fn alias_target(&self, alias: &str) -> Option<&'a str> {
        self.inner.alias_target(alias)
    }

    /// Resolve `name` to a cmdlet or function, following one alias hop.
    pub fn command(&self, name: &str) -> Option<CommandQuery<'a>> {
        match self.inner.command_kind(name)? {
            CommandKind::Cmdlet => self.cmdlet(name),
            CommandKind::Function => self.function(name),
            CommandKind::Alias => {
                let target = self.alias_target(name)?;
                self.cmdlet(target).or_else(|| self.function(target))
            }
            CommandKind::Native => None,
        }
    }

    pub fn command_kind(&self, name: &str) -> Option<CommandKind> {
        self.inner.command_kind(name)
    }

    pub fn native_commands(&self, name: &str) -> Option<&'a [NativeCommandDescriptor]> {
        self.inner.native_commands.as_ref()?.get(name).map(Vec::as_slice)
    }

    pub fn cmdlet_names(&self) -> Vec<&'a str> {
        self.inner
            .cmdlets
            .iter()
            .flat_map(|m| m.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn function_names(&self) -> Vec<&'a str> {
        self.inner
            .functions
            .iter()
            .flat_map(|m| m.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.inner
            .aliases
            .iter()
            .flat_map(|m| m.iter())
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
    }

    pub fn variables(&self) -> Option<&'a [String]> {
        self.inner.variables.as_deref()
    }

    pub fn command_count(&self) -> usize {
        self.inner.command_count()
    }

    pub fn descriptor(&self) -> &'a ModuleDescriptor {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CmdletDescriptor, FunctionDescriptor};

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_command_through_alias() {
        let mut module = ModuleDescriptor::default();
        module.insert_cmdlet("Get-ChildItem", CmdletDescriptor::default());
        module.insert_function("Get-Verb", FunctionDescriptor::default());
        module.insert_alias("gci", "Get-ChildItem");
        module.insert_alias("broken", "Get-Nothing");

        let version = v("3.1.0.0");
        let query = ModuleQuery::new("Microsoft.PowerShell.Management", &version, &module);

        let resolved = query.command("GCI").unwrap();
        assert_eq!(resolved.name(), "Get-ChildItem");
        assert_eq!(resolved.kind(), CommandKind::Cmdlet);
        assert_eq!(query.command("get-verb").unwrap().kind(), CommandKind::Function);
        assert!(query.command("broken").is_none());
        assert!(query.command("Missing").is_none());
        assert_eq!(query.cmdlet_names(), vec!["Get-ChildItem"]);
    }

    #[test]
    fn test_absent_collections() {
        let module = ModuleDescriptor::default();
        let version = v("1.0");
        let query = ModuleQuery::new("Empty", &version, &module);
        assert!(query.guid().is_none());
        assert!(query.variables().is_none());
        assert!(query.native_commands("ls").is_none());
        assert_eq!(query.aliases().count(), 0);
        assert!(query.function_names().is_empty());
    }
}
