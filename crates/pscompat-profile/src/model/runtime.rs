use super::assembly::AvailableTypes;
use super::command::{NativeCommandMap, ParameterDescriptor};
use super::module::ModuleDescriptor;
use pscompat_common::{CaseInsensitiveMap, SemanticVersion, VersionedNameMap};
use serde::{Deserialize, Serialize};

/// Everything observed as available on one runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapabilitySurface {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<AvailableTypes>,

    /// Module name to version to module descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<VersionedNameMap<ModuleDescriptor>>,

    /// Executables on the search path that belong to no module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_commands: Option<NativeCommandMap>,

    /// Parameters every cmdlet accepts (`Verbose`, `ErrorAction`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_parameters: Option<CaseInsensitiveMap<ParameterDescriptor>>,

    /// Common parameter alias to canonical name (`ea` -> `ErrorAction`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_parameter_aliases: Option<CaseInsensitiveMap<String>>,
}

impl CapabilitySurface {
    pub fn insert_module(
        &mut self,
        name: impl Into<String>,
        version: SemanticVersion,
        module: ModuleDescriptor,
    ) -> Option<ModuleDescriptor> {
        self.modules
            .get_or_insert_with(VersionedNameMap::new)
            .insert(name, version, module)
    }

    pub fn module(&self, name: &str, version: &SemanticVersion) -> Option<&ModuleDescriptor> {
        self.modules.as_ref()?.get(name, version)
    }

    pub fn module_mut(&mut self, name: &str, version: &SemanticVersion) -> Option<&mut ModuleDescriptor> {
        self.modules.as_mut()?.get_mut(name, version)
    }

    pub fn insert_common_parameter(
        &mut self,
        name: impl Into<String>,
        parameter: ParameterDescriptor,
    ) -> Option<ParameterDescriptor> {
        self.common_parameters
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(name, parameter)
    }

    pub fn insert_common_parameter_alias(
        &mut self,
        alias: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Option<String> {
        self.common_parameter_aliases
            .get_or_insert_with(CaseInsensitiveMap::new)
            .insert(alias, canonical.into())
    }

    /// Number of (module, version) entries.
    pub fn module_count(&self) -> usize {
        self.modules.as_ref().map_or(0, VersionedNameMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_modules_created_on_first_insert() {
        let mut surface = CapabilitySurface::default();
        assert!(surface.modules.is_none());
        assert_eq!(surface.module_count(), 0);

        surface.insert_module("PackageManagement", v("1.0.0.1"), ModuleDescriptor::default());
        surface.insert_module("packagemanagement", v("1.4.7"), ModuleDescriptor::default());

        assert_eq!(surface.module_count(), 2);
        assert!(surface.module("PACKAGEMANAGEMENT", &v("1.4.7")).is_some());
        assert!(surface.module("PackageManagement", &v("1.4")).is_none());
    }

    #[test]
    fn test_module_mut_is_visible() {
        let mut surface = CapabilitySurface::default();
        surface.insert_module("Foo", v("1.0"), ModuleDescriptor::default());
        surface
            .module_mut("foo", &v("1.0"))
            .unwrap()
            .insert_alias("f", "Invoke-Foo");
        assert_eq!(
            surface.module("Foo", &v("1.0")).unwrap().alias_target("F"),
            Some("Invoke-Foo")
        );
    }

    #[test]
    fn test_clone_with_absent_aliases_stays_absent() {
        let mut surface = CapabilitySurface::default();
        surface.insert_common_parameter("Verbose", ParameterDescriptor::of_type("System.Management.Automation.SwitchParameter"));
        let copy = surface.clone();
        assert!(copy.common_parameter_aliases.is_none());
        assert_eq!(copy, surface);
    }
}
