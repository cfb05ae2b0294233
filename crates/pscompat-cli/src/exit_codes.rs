//! Process exit codes.
//!
//! The numbers are a stable contract for scripts:
//! - 0 and 1 are answers (found / not found)
//! - 10-19 mean the caller can fix the input
//! - 20-29 mean something failed underneath

use pscompat_common::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Clean = 0,

    /// Profile, module, command or type is not in the profile or store.
    NotFound = 1,

    /// Bad argument, including an unparseable version.
    ArgsError = 10,

    /// No usable profile store.
    ConfigError = 11,

    /// The document is not JSON, or not shaped like a profile.
    MalformedProfile = 12,

    /// Internal error (bug - please report)
    InternalError = 20,

    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Symbolic name used in logs.
    pub fn code_name(self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::NotFound => "NOT_FOUND",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::MalformedProfile => "ERR_MALFORMED",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Syntax { .. } | Error::Malformed { .. } => ExitCode::MalformedProfile,
            Error::Serialize(_) => ExitCode::InternalError,
            Error::InvalidVersion(_) => ExitCode::ArgsError,
            Error::ProfileNotFound { .. } => ExitCode::NotFound,
            Error::Config(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::IoError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
