use super::platform::PlatformQuery;
use super::runtime::RuntimeQuery;
use crate::model::{CompatibilityReport, ProfileAggregate};

/// Read-only view over a whole profile.
///
/// This is the object handed to rule evaluation. It borrows the profile, so
/// the profile cannot change while any view over it is alive.
#[derive(Debug, Clone, Copy)]
pub struct ProfileQuery<'a> {
    inner: &'a ProfileAggregate,
}

impl<'a> ProfileQuery<'a> {
    pub fn new(inner: &'a ProfileAggregate) -> Self {
        ProfileQuery { inner }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.inner.id.as_deref()
    }

    pub fn constituent_profiles(&self) -> Option<&'a [String]> {
        self.inner.constituent_profiles.as_deref()
    }

    /// `None` when the profile records no capability surface.
    pub fn runtime(&self) -> Option<RuntimeQuery<'a>> {
        RuntimeQuery::from_option(self.inner.capability.as_ref())
    }

    /// `None` when the platform is entirely unknown.
    pub fn platform(&self) -> Option<PlatformQuery<'a>> {
        PlatformQuery::from_option(self.inner.platform.as_ref())
    }

    pub fn profile(&self) -> &'a ProfileAggregate {
        self.inner
    }
}

impl ProfileAggregate {
    pub fn query(&self) -> ProfileQuery<'_> {
        ProfileQuery::new(self)
    }
}

impl CompatibilityReport {
    pub fn runtime_query(&self) -> Option<RuntimeQuery<'_>> {
        RuntimeQuery::from_option(self.capability())
    }

    pub fn platform_query(&self) -> Option<PlatformQuery<'_>> {
        PlatformQuery::from_option(self.platform())
    }
}
