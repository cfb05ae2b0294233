//! Locating shape errors inside a document.
//!
//! Values are deserialized through `serde_path_to_error`, which records the
//! chain of fields, keys and indexes leading to a failure. The chain is
//! rendered in jq style: keys that are plain identifiers are joined with
//! `.`, any other key is written as a quoted `["..."]` segment and sequence
//! positions as `[n]`:
//!
//! ```text
//! Capability.Modules["Az.Storage"]["1.2.0"].Cmdlets["Get-AzStorageBlob"].OutputTypes
//! ```

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;
use std::fmt::Write;

/// Deserialize `value`, reporting a failure as [`Error::Malformed`] with the
/// location it happened at.
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| Error::Malformed {
        path: render(e.path()),
        reason: e.inner().to_string(),
    })
}

/// Render a tracked path. The document root renders as an empty string.
pub fn render(path: &serde_path_to_error::Path) -> String {
    let mut out = String::new();
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => {
                let _ = write!(out, "[{}]", index);
            }
            Segment::Map { key } => push_key(&mut out, key),
            Segment::Enum { variant } => push_key(&mut out, variant),
            Segment::Unknown => out.push_str("[?]"),
        }
    }
    out
}

fn push_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(key);
    } else {
        let _ = write!(out, "[{:?}]", key);
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
