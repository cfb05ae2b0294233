//! Borrowed, read-only views over profile data.
//!
//! A view holds a shared reference to its node and never copies it.
//! Building a view over an absent node yields `None`; accessors on a
//! present node return `None` for absent fields and never fail.

pub mod command;
pub mod module;
pub mod platform;
pub mod profile;
pub mod runtime;
pub mod types;

pub use command::{CommandQuery, ParameterQuery};
pub use module::ModuleQuery;
pub use platform::{DotnetQuery, MachineQuery, OperatingSystemQuery, PlatformQuery, PowerShellQuery};
pub use profile::ProfileQuery;
pub use runtime::{CommandMatch, RuntimeQuery};
pub use types::{AssemblyQuery, MembersQuery, TypeQuery, TypesQuery};
