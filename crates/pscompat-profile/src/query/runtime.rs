use super::command::{CommandQuery, ParameterQuery};
use super::module::ModuleQuery;
use super::types::TypesQuery;
use crate::model::{CapabilitySurface, NativeCommandDescriptor};
use pscompat_common::SemanticVersion;

/// Read-only view over a [`CapabilitySurface`].
#[derive(Debug, Clone, Copy)]
pub struct RuntimeQuery<'a> {
    inner: &'a CapabilitySurface,
}

/// A command found in some module, with the module it came from.
#[derive(Debug, Clone, Copy)]
pub struct CommandMatch<'a> {
    pub module: ModuleQuery<'a>,
    pub command: CommandQuery<'a>,
}

impl<'a> RuntimeQuery<'a> {
    pub fn new(inner: &'a CapabilitySurface) -> Self {
        RuntimeQuery { inner }
    }

    pub fn from_option(inner: Option<&'a CapabilitySurface>) -> Option<Self> {
        inner.map(RuntimeQuery::new)
    }

    pub fn types(&self) -> Option<TypesQuery<'a>> {
        TypesQuery::from_option(self.inner.types.as_ref())
    }

    pub fn has_modules(&self) -> bool {
        self.inner.modules.is_some()
    }

    /// Distinct module names in document order.
    pub fn module_names(&self) -> Vec<&'a str> {
        self.inner
            .modules
            .iter()
            .flat_map(|modules| modules.names())
            .map(String::as_str)
            .collect()
    }

    /// Versions recorded for `name`, in document order. Empty when unknown.
    pub fn module_versions(&self, name: &str) -> Vec<&'a SemanticVersion> {
        match &self.inner.modules {
            Some(modules) => modules.versions_of(name),
            None => Vec::new(),
        }
    }

    /// `name` at exactly `version`.
    pub fn module(&self, name: &str, version: &SemanticVersion) -> Option<ModuleQuery<'a>> {
        let (stored_name, versions) = self.inner.modules.as_ref()?.get_name_versions(name)?;
        let (stored_version, module) = versions.get_key_value(version)?;
        Some(ModuleQuery::new(stored_name, stored_version, module))
    }

    /// Every version of `name`, in document order.
    pub fn modules_named(&self, name: &str) -> Vec<ModuleQuery<'a>> {
        match self.inner.modules.as_ref().and_then(|modules| modules.get_name_versions(name)) {
            Some((stored_name, versions)) => versions
                .iter()
                .map(|(version, module)| ModuleQuery::new(stored_name, version, module))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Highest version of `name` under the version total order.
    pub fn latest_module(&self, name: &str) -> Option<ModuleQuery<'a>> {
        self.modules_named(name)
            .into_iter()
            .max_by(|a, b| a.version().cmp(b.version()))
    }

    /// Every (module, version) pair in document order.
    pub fn modules(&self) -> impl Iterator<Item = ModuleQuery<'a>> + 'a {
        self.inner
            .modules
            .iter()
            .flat_map(|modules| modules.iter())
            .map(|(name, version, module)| ModuleQuery::new(name, version, module))
    }

    /// Every module version that exports `name` as a cmdlet, function or alias.
    pub fn find_command(&self, name: &str) -> Vec<CommandMatch<'a>> {
        self.modules()
            .filter_map(|module| {
                module
                    .command(name)
                    .map(|command| CommandMatch { module, command })
            })
            .collect()
    }

    /// A common parameter by name or alias.
    pub fn common_parameter(&self, name: &str) -> Option<ParameterQuery<'a>> {
        let parameters = self.inner.common_parameters.as_ref()?;
        let canonical = match parameters.get_key_value(name) {
            Some(found) => Some(found),
            None => {
                let target = self.inner.common_parameter_aliases.as_ref()?.get(name)?;
                parameters.get_key_value(target)
            }
        };
        canonical.map(|(name, parameter)| ParameterQuery::new(name, parameter))
    }

    pub fn common_parameter_names(&self) -> Vec<&'a str> {
        self.inner
            .common_parameters
            .iter()
            .flat_map(|m| m.keys())
            .map(String::as_str)
            .collect()
    }

    /// Native commands on the search path outside any module.
    pub fn native_commands(&self, name: &str) -> Option<&'a [NativeCommandDescriptor]> {
        self.inner.native_commands.as_ref()?.get(name).map(Vec::as_slice)
    }

    pub fn module_count(&self) -> usize {
        self.inner.module_count()
    }

    pub fn descriptor(&self) -> &'a CapabilitySurface {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CmdletDescriptor, ModuleDescriptor, ParameterDescriptor};

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    fn surface() -> CapabilitySurface {
        let mut surface = CapabilitySurface::default();

        let mut old = ModuleDescriptor::default();
        old.insert_cmdlet("Get-AzStorageBlob", CmdletDescriptor::default());
        let mut new = old.clone();
        new.insert_cmdlet("Get-AzStorageBlobContent", CmdletDescriptor::default());

        surface.insert_module("Az.Storage", v("1.3.0"), new);
        surface.insert_module("Az.Storage", v("1.2.0"), old);
        surface.insert_common_parameter("ErrorAction", ParameterDescriptor::of_type("System.Management.Automation.ActionPreference"));
        surface.insert_common_parameter_alias("ea", "ErrorAction");
        surface
    }

    #[test]
    fn test_module_lookup_keeps_stored_casing() {
        let surface = surface();
        let query = RuntimeQuery::new(&surface);
        let module = query.module("az.storage", &v("1.2.0")).unwrap();
        assert_eq!(module.name(), "Az.Storage");
        assert_eq!(module.version(), &v("1.2.0"));
        assert!(query.module("az.storage", &v("1.2")).is_none());
        assert_eq!(query.module_versions("AZ.STORAGE"), vec![&v("1.3.0"), &v("1.2.0")]);
    }

    #[test]
    fn test_latest_module_is_by_order_not_position() {
        let surface = surface();
        let query = RuntimeQuery::new(&surface);
        assert_eq!(query.latest_module("Az.Storage").unwrap().version(), &v("1.3.0"));
        assert!(query.latest_module("Az.Compute").is_none());
    }

    #[test]
    fn test_find_command_across_versions() {
        let surface = surface();
        let query = RuntimeQuery::new(&surface);
        let matches = query.find_command("get-azstorageblob");
        assert_eq!(matches.len(), 2);
        let only_new = query.find_command("Get-AzStorageBlobContent");
        assert_eq!(only_new.len(), 1);
        assert_eq!(only_new[0].module.version(), &v("1.3.0"));
    }

    #[test]
    fn test_common_parameter_alias() {
        let surface = surface();
        let query = RuntimeQuery::new(&surface);
        assert_eq!(query.common_parameter("EA").unwrap().name(), "ErrorAction");
        assert!(query.common_parameter("Verbose").is_none());
        assert_eq!(query.common_parameter_names(), vec!["ErrorAction"]);
    }

    #[test]
    fn test_absent_modules() {
        let surface = CapabilitySurface::default();
        let query = RuntimeQuery::new(&surface);
        assert!(!query.has_modules());
        assert!(query.module_versions("Anything").is_empty());
        assert!(query.module_names().is_empty());
        assert!(query.types().is_none());
        assert_eq!(query.modules().count(), 0);
    }
}
