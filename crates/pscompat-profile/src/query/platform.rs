use crate::model::{
    DotnetDescriptor, MachineDescriptor, OperatingSystemDescriptor, PlatformDescriptor, PowerShellDescriptor,
};
use pscompat_common::{Architecture, DotnetRuntime, OsFamily, SemanticVersion};

/// Read-only view over a [`PlatformDescriptor`].
#[derive(Debug, Clone, Copy)]
pub struct PlatformQuery<'a> {
    inner: &'a PlatformDescriptor,
}

impl<'a> PlatformQuery<'a> {
    pub fn new(inner: &'a PlatformDescriptor) -> Self {
        PlatformQuery { inner }
    }

    /// `None` when the platform is entirely unknown.
    pub fn from_option(inner: Option<&'a PlatformDescriptor>) -> Option<Self> {
        inner.map(PlatformQuery::new)
    }

    pub fn operating_system(&self) -> Option<OperatingSystemQuery<'a>> {
        OperatingSystemQuery::from_option(self.inner.operating_system.as_ref())
    }

    pub fn dotnet(&self) -> Option<DotnetQuery<'a>> {
        self.inner.dotnet.as_ref().map(|inner| DotnetQuery { inner })
    }

    pub fn powershell(&self) -> Option<PowerShellQuery<'a>> {
        self.inner.powershell.as_ref().map(|inner| PowerShellQuery { inner })
    }

    pub fn machine(&self) -> Option<MachineQuery<'a>> {
        self.inner.machine.as_ref().map(|inner| MachineQuery { inner })
    }

    pub fn summary(&self) -> String {
        self.inner.summary()
    }

    pub fn descriptor(&self) -> &'a PlatformDescriptor {
        self.inner
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OperatingSystemQuery<'a> {
    inner: &'a OperatingSystemDescriptor,
}

impl<'a> OperatingSystemQuery<'a> {
    pub fn new(inner: &'a OperatingSystemDescriptor) -> Self {
        OperatingSystemQuery { inner }
    }

    pub fn from_option(inner: Option<&'a OperatingSystemDescriptor>) -> Option<Self> {
        inner.map(OperatingSystemQuery::new)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.inner.name.as_deref()
    }

    pub fn description(&self) -> Option<&'a str> {
        self.inner.description.as_deref()
    }

    pub fn platform(&self) -> Option<&'a str> {
        self.inner.platform.as_deref()
    }

    pub fn family(&self) -> Option<OsFamily> {
        self.inner.family
    }

    pub fn version(&self) -> Option<&'a str> {
        self.inner.version.as_deref()
    }

    pub fn service_pack(&self) -> Option<&'a str> {
        self.inner.service_pack.as_deref()
    }

    pub fn sku_id(&self) -> Option<u32> {
        self.inner.sku_id
    }

    pub fn distribution_id(&self) -> Option<&'a str> {
        self.inner.distribution_id.as_deref()
    }

    pub fn distribution_version(&self) -> Option<&'a str> {
        self.inner.distribution_version.as_deref()
    }

    pub fn distribution_pretty_name(&self) -> Option<&'a str> {
        self.inner.distribution_pretty_name.as_deref()
    }

    pub fn architecture(&self) -> Option<Architecture> {
        self.inner.architecture
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DotnetQuery<'a> {
    inner: &'a DotnetDescriptor,
}

impl<'a> DotnetQuery<'a> {
    pub fn clr_version(&self) -> Option<&'a SemanticVersion> {
        self.inner.clr_version.as_ref()
    }

    pub fn runtime(&self) -> Option<DotnetRuntime> {
        self.inner.runtime
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PowerShellQuery<'a> {
    inner: &'a PowerShellDescriptor,
}

impl<'a> PowerShellQuery<'a> {
    pub fn version(&self) -> Option<&'a SemanticVersion> {
        self.inner.version.as_ref()
    }

    pub fn edition(&self) -> Option<&'a str> {
        self.inner.edition.as_deref()
    }

    pub fn remoting_protocol_version(&self) -> Option<&'a SemanticVersion> {
        self.inner.remoting_protocol_version.as_ref()
    }

    pub fn serialization_version(&self) -> Option<&'a SemanticVersion> {
        self.inner.serialization_version.as_ref()
    }

    pub fn wsman_stack_version(&self) -> Option<&'a SemanticVersion> {
        self.inner.wsman_stack_version.as_ref()
    }

    pub fn process_architecture(&self) -> Option<Architecture> {
        self.inner.process_architecture
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MachineQuery<'a> {
    inner: &'a MachineDescriptor,
}

impl<'a> MachineQuery<'a> {
    pub fn architecture(&self) -> Option<Architecture> {
        self.inner.architecture
    }

    /// Recorded bitness, falling back to the architecture's pointer width.
    pub fn bitness(&self) -> Option<u32> {
        self.inner
            .bitness
            .or_else(|| self.inner.architecture.map(|arch| arch.bitness()))
    }

    pub fn processor_count(&self) -> Option<u32> {
        self.inner.processor_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_platform_has_no_facade() {
        assert!(PlatformQuery::from_option(None).is_none());
    }

    #[test]
    fn test_empty_platform_reports_absent_fields() {
        let platform = PlatformDescriptor::default();
        let query = PlatformQuery::from_option(Some(&platform)).unwrap();
        assert!(query.operating_system().is_none());
        assert!(query.powershell().is_none());
        assert!(query.dotnet().is_none());
        assert!(query.machine().is_none());
    }

    #[test]
    fn test_present_but_empty_operating_system() {
        let platform = PlatformDescriptor {
            operating_system: Some(OperatingSystemDescriptor::default()),
            machine: Some(MachineDescriptor {
                architecture: Some(Architecture::Arm64),
                ..MachineDescriptor::default()
            }),
            ..PlatformDescriptor::default()
        };
        let query = PlatformQuery::new(&platform);
        let os = query.operating_system().unwrap();
        assert!(os.name().is_none());
        assert!(os.family().is_none());
        assert_eq!(query.machine().unwrap().bitness(), Some(64));
    }
}
