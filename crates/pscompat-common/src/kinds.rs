//! Enumerations shared by descriptors.
//!
//! All of these serialize as their symbolic name (`"Get"`, `"X64"`,
//! `"Windows"`), matching the names PowerShell reports at harvest time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processor architecture of a machine or process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    X86,
    X64,
    Arm,
    Arm64,
}

impl Architecture {
    /// Pointer width in bits.
    pub fn bitness(&self) -> u32 {
        match self {
            Architecture::X86 | Architecture::Arm => 32,
            Architecture::X64 | Architecture::Arm64 => 64,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::X86 => write!(f, "x86"),
            Architecture::X64 => write!(f, "x64"),
            Architecture::Arm => write!(f, "arm"),
            Architecture::Arm64 => write!(f, "arm64"),
        }
    }
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsFamily {
    Windows,
    Linux,
    #[serde(alias = "Darwin", alias = "OSX")]
    MacOS,
    Other,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::MacOS => write!(f, "macos"),
            OsFamily::Other => write!(f, "other"),
        }
    }
}

/// Which .NET runtime hosts PowerShell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DotnetRuntime {
    /// .NET Framework (Windows PowerShell 5.1 and earlier).
    Framework,
    /// .NET Core / .NET 5+ (PowerShell 6 and later).
    Core,
}

impl fmt::Display for DotnetRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DotnetRuntime::Framework => write!(f, "framework"),
            DotnetRuntime::Core => write!(f, "core"),
        }
    }
}

/// Accessor available on a property or indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessorType {
    Get,
    Set,
}

/// Binding behavior of a parameter within one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterSetFlag {
    Mandatory,
    ValueFromPipeline,
    ValueFromPipelineByPropertyName,
    ValueFromRemainingArguments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbolic_serialization() {
        assert_eq!(serde_json::to_string(&AccessorType::Get).unwrap(), "\"Get\"");
        assert_eq!(serde_json::to_string(&Architecture::Arm64).unwrap(), "\"Arm64\"");
        assert_eq!(
            serde_json::to_string(&ParameterSetFlag::ValueFromPipelineByPropertyName).unwrap(),
            "\"ValueFromPipelineByPropertyName\""
        );
    }

    #[test]
    fn test_os_family_aliases() {
        let family: OsFamily = serde_json::from_str("\"Darwin\"").unwrap();
        assert_eq!(family, OsFamily::MacOS);
        assert_eq!(serde_json::to_string(&family).unwrap(), "\"MacOS\"");
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(serde_json::from_str::<AccessorType>("\"get\"").is_err());
        assert!(serde_json::from_str::<DotnetRuntime>("\"Mono\"").is_err());
    }

    #[test]
    fn test_bitness() {
        assert_eq!(Architecture::X86.bitness(), 32);
        assert_eq!(Architecture::Arm64.bitness(), 64);
    }
}
