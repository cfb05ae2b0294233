//! Immutable shared profile handles.
//!
//! A [`FrozenProfile`] is what a builder hands over once a profile is
//! finished. It can be cloned cheaply and read from many threads at once,
//! and offers no way back to `&mut` access short of [`FrozenProfile::thaw`],
//! which makes an independent copy.

use crate::model::ProfileAggregate;
use crate::query::ProfileQuery;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FrozenProfile {
    inner: Arc<ProfileAggregate>,
}

impl FrozenProfile {
    pub fn new(profile: ProfileAggregate) -> Self {
        FrozenProfile {
            inner: Arc::new(profile),
        }
    }

    pub fn query(&self) -> ProfileQuery<'_> {
        ProfileQuery::new(&self.inner)
    }

    pub fn profile(&self) -> &ProfileAggregate {
        &self.inner
    }

    /// A deep copy that can be mutated again; this handle is unaffected.
    pub fn thaw(&self) -> ProfileAggregate {
        ProfileAggregate::clone(&self.inner)
    }

    /// Number of handles sharing this profile.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// True when both handles share the same frozen data.
    pub fn ptr_eq(&self, other: &FrozenProfile) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ProfileAggregate {
    /// End the build phase.
    pub fn freeze(self) -> FrozenProfile {
        FrozenProfile::new(self)
    }
}

impl From<ProfileAggregate> for FrozenProfile {
    fn from(profile: ProfileAggregate) -> Self {
        FrozenProfile::new(profile)
    }
}
