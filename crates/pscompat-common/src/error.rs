//! Errors raised while reading, storing and querying profiles.
//!
//! Every variant has a stable numeric code, a category, a recoverability
//! flag and a remediation hint, so the CLI can render it either for a person
//! or for a script:
//!
//! ```text
//! error[11]: Malformed Profile Document
//!   malformed profile document at Capability.Modules["Az.Storage"]["1.2.0"]: invalid type: ...
//!   hint: The document parsed as JSON but a field has the wrong shape. ...
//! ```
//!
//! ```json
//! {"code":11,"category":"document","message":"malformed profile document at Capability.Modules.Foo: ...",
//!  "recoverable":false,"remediation":"...","context":{"path":"Capability.Modules.Foo"}}
//! ```

use crate::version::VersionParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for profile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Profile document syntax and shape errors.
    Document,
    /// Version strings outside documents (CLI arguments, builders).
    Version,
    /// Requested profile, module or command does not exist.
    Lookup,
    /// Store and logging configuration errors.
    Config,
    /// File I/O errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Document => write!(f, "document"),
            ErrorCategory::Version => write!(f, "version"),
            ErrorCategory::Lookup => write!(f, "lookup"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for profile loading, storage and lookup.
#[derive(Error, Debug)]
pub enum Error {
    // Document errors (10-19)
    #[error("profile document is not valid JSON at line {line} column {column}: {reason}")]
    Syntax {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("malformed profile document{}: {reason}", display_path(.path))]
    Malformed { path: String, reason: String },

    #[error("failed to serialize profile: {0}")]
    Serialize(String),

    // Version errors (20-29)
    #[error(transparent)]
    InvalidVersion(#[from] VersionParseError),

    // Lookup errors (30-39)
    #[error("profile not found: {id}")]
    ProfileNotFound { id: String },

    // Configuration errors (40-49)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (60-69)
    #[error("I/O error on {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {}", path)
    }
}

impl Error {
    /// Build an I/O error that remembers which file was involved.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Document errors
    /// - 20-29: Version errors
    /// - 30-39: Lookup errors
    /// - 40-49: Configuration errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Syntax { .. } => 10,
            Error::Malformed { .. } => 11,
            Error::Serialize(_) => 12,
            Error::InvalidVersion(_) => 20,
            Error::ProfileNotFound { .. } => 30,
            Error::Config(_) => 40,
            Error::Io { .. } => 60,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Syntax { .. } | Error::Malformed { .. } | Error::Serialize(_) => {
                ErrorCategory::Document
            }
            Error::InvalidVersion(_) => ErrorCategory::Version,
            Error::ProfileNotFound { .. } => ErrorCategory::Lookup,
            Error::Config(_) => ErrorCategory::Config,
            Error::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Returns whether retrying (or fixing the input) may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A broken document stays broken until regenerated
            Error::Syntax { .. } => false,
            Error::Malformed { .. } => false,
            Error::Serialize(_) => false,

            Error::InvalidVersion(_) => true,
            Error::ProfileNotFound { .. } => true,
            Error::Config(_) => true,
            Error::Io { .. } => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Syntax { .. } => {
                "The file is not JSON. Check it with 'jq . <file>' or regenerate the profile."
            }
            Error::Malformed { .. } => {
                "The document parsed as JSON but a field has the wrong shape. Regenerate the profile with a matching harvester."
            }
            Error::Serialize(_) => "Internal serialization failure. Please report it with the input profile.",
            Error::InvalidVersion(_) => {
                "Versions need 2 to 4 dotted numeric components, optionally followed by '-label'."
            }
            Error::ProfileNotFound { .. } => {
                "List the available profiles with 'pscompat list' or pass --profile-dir."
            }
            Error::Config(_) => "Check PSCOMPAT_PROFILE_DIR and the --profile-dir flag.",
            Error::Io { .. } => "Check that the file exists and is readable, then retry.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Syntax { .. } => "Profile Is Not JSON",
            Error::Malformed { .. } => "Malformed Profile Document",
            Error::Serialize(_) => "Serialization Failed",
            Error::InvalidVersion(_) => "Invalid Version",
            Error::ProfileNotFound { .. } => "Profile Not Found",
            Error::Config(_) => "Configuration Error",
            Error::Io { .. } => "I/O Error",
        }
    }
}

/// Machine-readable form of an [`Error`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
    pub recoverable: bool,
    pub remediation: String,

    /// Location details: document `path`, `line`/`column`, version `input`,
    /// profile `id`, or `file`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let context: BTreeMap<String, serde_json::Value> = match err {
            Error::Syntax { line, column, .. } => {
                BTreeMap::from([("line".into(), (*line).into()), ("column".into(), (*column).into())])
            }
            Error::Malformed { path, .. } if !path.is_empty() => {
                BTreeMap::from([("path".into(), path.as_str().into())])
            }
            Error::InvalidVersion(e) => BTreeMap::from([("input".into(), e.input.as_str().into())]),
            Error::ProfileNotFound { id } => BTreeMap::from([("id".into(), id.as_str().into())]),
            Error::Io { path, .. } => {
                BTreeMap::from([("file".into(), path.to_string_lossy().into_owned().into())])
            }
            _ => BTreeMap::new(),
        };

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            remediation: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Single-line JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!(r#"{{"code":{},"message":"unrenderable error"}}"#, self.code))
    }
}

/// Render an error for stderr, optionally with ANSI colour.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (bold_red, dim, reset) = if use_color {
        ("\x1b[1;31m", "\x1b[2m", "\x1b[0m")
    } else {
        ("", "", "")
    };
    format!(
        "{bold_red}error[{code}]{reset}: {headline}\n  {err}\n  {dim}hint:{reset} {hint}",
        code = err.code(),
        headline = err.headline(),
        hint = err.remediation(),
    )
}
