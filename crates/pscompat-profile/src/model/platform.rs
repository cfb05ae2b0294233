//! Facts about the platform a profile was collected on.

use pscompat_common::{Architecture, DotnetRuntime, OsFamily, SemanticVersion};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperatingSystemDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Platform string as the runtime reports it (`Win32NT`, `Unix`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<OsFamily>,

    /// Kernel or OS build version, kept verbatim (`10.0.17763`, `4.15.0-1050-azure`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_pack: Option<String>,

    /// Windows SKU identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<u32>,

    /// `ID` from `/etc/os-release`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_pretty_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DotnetDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clr_version: Option<SemanticVersion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<DotnetRuntime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerShellDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<SemanticVersion>,

    /// `Desktop` or `Core`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remoting_protocol_version: Option<SemanticVersion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialization_version: Option<SemanticVersion>,

    #[serde(rename = "WSManStackVersion", skip_serializing_if = "Option::is_none")]
    pub wsman_stack_version: Option<SemanticVersion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_architecture: Option<Architecture>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MachineDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitness: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlatformDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<OperatingSystemDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dotnet: Option<DotnetDescriptor>,

    #[serde(rename = "PowerShell", skip_serializing_if = "Option::is_none")]
    pub powershell: Option<PowerShellDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineDescriptor>,
}

impl PlatformDescriptor {
    /// Short label such as `ubuntu 18.04 x64 / PowerShell 6.2.3 Core`.
    pub fn summary(&self) -> String {
        PlatformSummary(self).to_string()
    }
}

struct PlatformSummary<'a>(&'a PlatformDescriptor);

impl fmt::Display for PlatformSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let platform = self.0;
        let mut wrote = false;

        if let Some(os) = &platform.operating_system {
            if let Some(name) = os.distribution_id.as_deref().or(os.name.as_deref()) {
                write!(f, "{}", name)?;
                wrote = true;
            } else if let Some(family) = os.family {
                write!(f, "{}", family)?;
                wrote = true;
            }
            if let Some(version) = os.distribution_version.as_deref().or(os.version.as_deref()) {
                write!(f, "{}{}", if wrote { " " } else { "" }, version)?;
                wrote = true;
            }
            if let Some(arch) = os.architecture {
                write!(f, "{}{}", if wrote { " " } else { "" }, arch)?;
                wrote = true;
            }
        }

        if let Some(ps) = &platform.powershell {
            if wrote {
                write!(f, " / ")?;
            }
            write!(f, "PowerShell")?;
            if let Some(version) = &ps.version {
                write!(f, " {}", version)?;
            }
            if let Some(edition) = &ps.edition {
                write!(f, " {}", edition)?;
            }
            wrote = true;
        }

        if !wrote {
            write!(f, "unknown platform")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ubuntu() -> PlatformDescriptor {
        PlatformDescriptor {
            operating_system: Some(OperatingSystemDescriptor {
                name: Some("Linux".into()),
                family: Some(OsFamily::Linux),
                distribution_id: Some("ubuntu".into()),
                distribution_version: Some("18.04".into()),
                architecture: Some(Architecture::X64),
                ..OperatingSystemDescriptor::default()
            }),
            powershell: Some(PowerShellDescriptor {
                version: Some("6.2.3".parse().unwrap()),
                edition: Some("Core".into()),
                wsman_stack_version: Some("3.0".parse().unwrap()),
                ..PowerShellDescriptor::default()
            }),
            ..PlatformDescriptor::default()
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(ubuntu().summary(), "ubuntu 18.04 x64 / PowerShell 6.2.3 Core");
        assert_eq!(PlatformDescriptor::default().summary(), "unknown platform");
    }

    #[test]
    fn test_field_names() {
        let json = serde_json::to_value(ubuntu()).unwrap();
        assert_eq!(json["PowerShell"]["WSManStackVersion"], "3.0");
        assert_eq!(json["OperatingSystem"]["DistributionId"], "ubuntu");
        assert_eq!(json["OperatingSystem"]["Family"], "Linux");
        assert!(json.get("Dotnet").is_none());
    }

    #[test]
    fn test_darwin_alias() {
        let os: OperatingSystemDescriptor = serde_json::from_str(r#"{"Family":"Darwin"}"#).unwrap();
        assert_eq!(os.family, Some(OsFamily::MacOS));
    }
}
