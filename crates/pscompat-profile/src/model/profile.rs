use super::platform::PlatformDescriptor;
use super::runtime::CapabilitySurface;
use serde::{Deserialize, Serialize};

/// A capability surface paired with the platform it was collected on.
///
/// This is the unit stored in a profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileAggregate {
    /// Runtime identity, e.g. `ubuntu_x64_18.04_6.2.3_x64_4.0.30319.42000_core`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Ids of the profiles merged into this one, for union profiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituent_profiles: Option<Vec<String>>,

    #[serde(alias = "Runtime", skip_serializing_if = "Option::is_none")]
    pub capability: Option<CapabilitySurface>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformDescriptor>,
}

impl ProfileAggregate {
    pub fn new(capability: CapabilitySurface, platform: PlatformDescriptor) -> Self {
        ProfileAggregate {
            id: None,
            constituent_profiles: None,
            capability: Some(capability),
            platform: Some(platform),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The capability surface, created empty if absent.
    pub fn capability_mut(&mut self) -> &mut CapabilitySurface {
        self.capability.get_or_insert_with(CapabilitySurface::default)
    }

    pub fn platform_mut(&mut self) -> &mut PlatformDescriptor {
        self.platform.get_or_insert_with(PlatformDescriptor::default)
    }

    pub fn is_union(&self) -> bool {
        self.constituent_profiles.as_ref().is_some_and(|ids| !ids.is_empty())
    }
}

/// Final output of a comparison step.
///
/// Shares the profile's shape but is neither cloneable nor deserializable,
/// so a report cannot be fed back into a build pipeline.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompatibilityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<CapabilitySurface>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformDescriptor>,
}

impl CompatibilityReport {
    pub fn new(capability: Option<CapabilitySurface>, platform: Option<PlatformDescriptor>) -> Self {
        CompatibilityReport { capability, platform }
    }

    pub fn capability(&self) -> Option<&CapabilitySurface> {
        self.capability.as_ref()
    }

    pub fn platform(&self) -> Option<&PlatformDescriptor> {
        self.platform.as_ref()
    }
}

impl From<ProfileAggregate> for CompatibilityReport {
    fn from(profile: ProfileAggregate) -> Self {
        CompatibilityReport {
            capability: profile.capability,
            platform: profile.platform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_alias_accepted() {
        let profile: ProfileAggregate =
            serde_json::from_str(r#"{"Id":"win","Runtime":{"CommonParameters":{}}}"#).unwrap();
        assert!(profile.capability.is_some());

        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"Id":"win","Capability":{"CommonParameters":{}}}"#);
    }

    #[test]
    fn test_empty_profile_round_trips() {
        let profile = ProfileAggregate::default();
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, "{}");
        let parsed: ProfileAggregate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
        assert!(!parsed.is_union());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = ProfileAggregate::new(CapabilitySurface::default(), PlatformDescriptor::default())
            .with_id("a");
        let mut copy = original.clone();
        copy.capability_mut()
            .insert_common_parameter_alias("ea", "ErrorAction");
        copy.id = Some("b".into());

        assert!(original.capability_mut().common_parameter_aliases.is_none());
        assert_eq!(original.id.as_deref(), Some("a"));
    }

    #[test]
    fn test_report_from_profile() {
        let profile = ProfileAggregate::new(CapabilitySurface::default(), PlatformDescriptor::default())
            .with_id("dropped");
        let report = CompatibilityReport::from(profile);
        assert!(report.capability().is_some());
        assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"Capability":{},"Platform":{}}"#);
    }
}
