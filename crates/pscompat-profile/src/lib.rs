//! PowerShell compatibility profiles.
//!
//! This crate provides the capability-surface data model and its views:
//! - Owned, cloneable descriptors for types, modules, commands and platforms
//! - Borrowed read-only query views for rule evaluation
//! - Frozen shared handles for concurrent readers
//! - Profile document load/save and store location

pub mod config;
pub mod document;
pub mod frozen;
pub mod model;
pub mod query;

pub use config::{ProfileEntry, StoreEnv, StorePaths, StoreResolution, StoreResolver};
pub use document::{load_profile, save_profile, LoadedProfile, ProfileSource};
pub use frozen::FrozenProfile;
pub use model::{CapabilitySurface, CompatibilityReport, ModuleDescriptor, PlatformDescriptor, ProfileAggregate};
pub use query::{ProfileQuery, RuntimeQuery};

pub use pscompat_common::{Error, Result};
