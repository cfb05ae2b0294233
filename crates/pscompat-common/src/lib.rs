//! Shared primitives for PowerShell compatibility profiles.
//!
//! This crate provides the leaf types every descriptor builds on:
//! - Dotted versions with a documented total order
//! - Platform and member enumerations
//! - Insertion-ordered, case-aware containers
//! - Common error types and output formats

pub mod collections;
pub mod error;
pub mod kinds;
pub mod output;
pub mod path;
pub mod version;

pub use collections::{
    eq_ignore_case, fold_case, CaseInsensitiveMap, NormalizedMap, OrdinalMap, VersionMap, VersionedNameMap,
};
pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use kinds::{AccessorType, Architecture, DotnetRuntime, OsFamily, ParameterSetFlag};
pub use output::OutputFormat;
pub use version::{SemanticVersion, VersionParseError};
