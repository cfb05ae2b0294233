//! Profile documents: JSON text in, [`ProfileAggregate`] out, and back.
//!
//! Parsing happens in two steps. The text is first read as plain JSON,
//! which reports syntax problems with a line and column. The JSON value is
//! then mapped onto the descriptors, which reports shape problems with the
//! key path leading to them.

use crate::model::ProfileAggregate;
use pscompat_common::path;
use pscompat_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Where a loaded profile came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSource {
    pub path: PathBuf,
    /// Hex SHA-256 of the file bytes.
    pub sha256: String,
}

#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub profile: ProfileAggregate,
    pub source: ProfileSource,
}

/// Parse a profile document.
pub fn from_json_str(text: &str) -> Result<ProfileAggregate> {
    parse_str(text)
}

pub fn from_json_slice(bytes: &[u8]) -> Result<ProfileAggregate> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(syntax_error)?;
    from_value(value)
}

/// Map an already-parsed JSON value onto a profile.
pub fn from_value(value: serde_json::Value) -> Result<ProfileAggregate> {
    map_value(value)
}

/// Compact JSON.
pub fn to_json_string(profile: &ProfileAggregate) -> Result<String> {
    serde_json::to_string(profile).map_err(|e| Error::Serialize(e.to_string()))
}

/// Indented JSON, as written to disk.
pub fn to_json_string_pretty(profile: &ProfileAggregate) -> Result<String> {
    serde_json::to_string_pretty(profile).map_err(|e| Error::Serialize(e.to_string()))
}

pub fn to_value(profile: &ProfileAggregate) -> Result<serde_json::Value> {
    serde_json::to_value(profile).map_err(|e| Error::Serialize(e.to_string()))
}

/// Parse any descriptor from document text with the same error mapping.
pub fn parse_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(syntax_error)?;
    map_value(value)
}

fn map_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    path::from_value(value)
}

fn syntax_error(e: serde_json::Error) -> Error {
    let message = e.to_string();
    let reason = match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    };
    Error::Syntax {
        line: e.line(),
        column: e.column(),
        reason,
    }
}

/// Load a profile file, recording its hash.
pub fn load_profile(path: impl AsRef<Path>) -> Result<LoadedProfile> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let sha256 = compute_sha256(&bytes);
    debug!(path = %path.display(), bytes = bytes.len(), sha256 = %sha256, "loading profile");

    let profile = from_json_slice(&bytes)?;
    trace!(
        id = profile.id.as_deref().unwrap_or("-"),
        modules = profile.capability.as_ref().map_or(0, |c| c.module_count()),
        "profile parsed"
    );

    Ok(LoadedProfile {
        profile,
        source: ProfileSource {
            path: path.to_path_buf(),
            sha256,
        },
    })
}

/// Write a profile as pretty JSON, creating parent directories.
///
/// Returns the hash of the bytes written.
pub fn save_profile(profile: &ProfileAggregate, path: impl AsRef<Path>) -> Result<ProfileSource> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut text = to_json_string_pretty(profile)?;
    text.push('\n');
    fs::write(path, text.as_bytes()).map_err(|e| Error::io(path, e))?;

    let sha256 = compute_sha256(text.as_bytes());
    debug!(path = %path.display(), sha256 = %sha256, "saved profile");
    Ok(ProfileSource {
        path: path.to_path_buf(),
        sha256,
    })
}

pub(crate) fn compute_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
