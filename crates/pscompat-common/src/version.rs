//! Dotted numeric versions as reported by PowerShell, .NET and native tools.
//!
//! A version has 2 to 4 numeric components (`major.minor[.build[.revision]]`)
//! and an optional prerelease label (`7.0.0-preview.4`).
//!
//! # Ordering
//!
//! Components compare left to right. A component that was never specified
//! orders before every specified value, zero included, so
//! `5.1 < 5.1.0 < 5.1.0.0 < 5.1.0.1`. `5.1` and `5.1.0` are different
//! versions. With equal components, a labelled prerelease orders before the
//! unlabelled release and labels compare ordinally.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The largest number of numeric components a version may carry.
pub const MAX_COMPONENTS: usize = 4;

/// The smallest number of numeric components a version may carry.
pub const MIN_COMPONENTS: usize = 2;

/// Immutable dotted version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    build: Option<u64>,
    revision: Option<u64>,
    label: Option<String>,
}

impl SemanticVersion {
    /// Two-component version (`major.minor`).
    pub fn new(major: u64, minor: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            build: None,
            revision: None,
            label: None,
        }
    }

    /// Three-component version (`major.minor.build`).
    pub fn with_build(major: u64, minor: u64, build: u64) -> Self {
        SemanticVersion {
            build: Some(build),
            ..SemanticVersion::new(major, minor)
        }
    }

    /// Four-component version (`major.minor.build.revision`).
    pub fn with_revision(major: u64, minor: u64, build: u64, revision: u64) -> Self {
        SemanticVersion {
            build: Some(build),
            revision: Some(revision),
            ..SemanticVersion::new(major, minor)
        }
    }

    /// Copy of this version carrying a prerelease label.
    pub fn labelled(&self, label: impl Into<String>) -> Result<Self, VersionParseError> {
        let label = label.into();
        let rendered = format!("{}-{}", self.numeric(), label);
        validate_label(&label).map_err(|reason| VersionParseError::new(&rendered, reason))?;
        Ok(SemanticVersion {
            label: Some(label),
            ..self.clone()
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn build(&self) -> Option<u64> {
        self.build
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Prerelease label, without the leading `-`.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.label.is_some()
    }

    /// Number of numeric components that were specified (2 to 4).
    pub fn component_count(&self) -> usize {
        match (self.build, self.revision) {
            (None, _) => 2,
            (Some(_), None) => 3,
            (Some(_), Some(_)) => 4,
        }
    }

    /// Numeric components, in order, as specified.
    pub fn components(&self) -> Vec<u64> {
        let mut parts = vec![self.major, self.minor];
        parts.extend(self.build);
        parts.extend(self.revision);
        parts
    }

    /// True when both versions agree on every component specified by `self`.
    ///
    /// `5.1` matches `5.1.17763.316`; `5.1.0` does not match `5.1`.
    pub fn matches_prefix_of(&self, other: &SemanticVersion) -> bool {
        let ours = self.components();
        let theirs = other.components();
        ours.len() <= theirs.len() && ours.iter().zip(theirs.iter()).all(|(a, b)| a == b)
    }

    fn numeric(&self) -> String {
        self.components()
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.build, self.revision)
            .cmp(&(other.major, other.minor, other.build, other.revision))
            .then_with(|| match (&self.label, &other.label) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
        }
        if let Some(revision) = self.revision {
            write!(f, ".{}", revision)?;
        }
        if let Some(label) = &self.label {
            write!(f, "-{}", label)?;
        }
        Ok(())
    }
}

/// A version string that could not be parsed.
///
/// The original input is kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version {input:?}: {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: String,
}

impl VersionParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        VersionParseError {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn validate_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("empty prerelease label".to_string());
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')))
    {
        return Err(format!("unexpected character {:?} in prerelease label", bad));
    }
    Ok(())
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numeric, label) = match s.split_once('-') {
            Some((numeric, label)) => (numeric, Some(label)),
            None => (s, None),
        };

        if let Some(label) = label {
            validate_label(label).map_err(|reason| VersionParseError::new(s, reason))?;
        }

        let mut parts = Vec::with_capacity(MAX_COMPONENTS);
        for (i, part) in numeric.split('.').enumerate() {
            if part.is_empty() {
                return Err(VersionParseError::new(
                    s,
                    format!("component {} is empty", i + 1),
                ));
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionParseError::new(
                    s,
                    format!("component {:?} is not a non-negative integer", part),
                ));
            }
            if part.len() > 1 && part.starts_with('0') {
                return Err(VersionParseError::new(
                    s,
                    format!("component {:?} has a leading zero", part),
                ));
            }
            let value = part.parse::<u64>().map_err(|e| {
                VersionParseError::new(s, format!("component {:?}: {}", part, e))
            })?;
            parts.push(value);
        }

        if parts.len() < MIN_COMPONENTS || parts.len() > MAX_COMPONENTS {
            return Err(VersionParseError::new(
                s,
                format!(
                    "expected {} to {} components, found {}",
                    MIN_COMPONENTS,
                    MAX_COMPONENTS,
                    parts.len()
                ),
            ));
        }

        Ok(SemanticVersion {
            major: parts[0],
            minor: parts[1],
            build: parts.get(2).copied(),
            revision: parts.get(3).copied(),
            label: label.map(str::to_string),
        })
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = SemanticVersion;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a dotted version string with 2 to 4 numeric components")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_component_counts() {
        assert_eq!(v("5.1").component_count(), 2);
        assert_eq!(v("1.2.0").component_count(), 3);
        assert_eq!(v("5.1.17763.316").component_count(), 4);
        assert_eq!(v("5.1.17763.316").components(), vec![5, 1, 17763, 316]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", "5", "1.2.3.4.5", "1..2", "1.x", "-1.0", "1.0-", "1.0.", " 1.0"] {
            let err = input.parse::<SemanticVersion>().unwrap_err();
            assert_eq!(err.input, input, "input not preserved for {:?}", input);
        }
    }

    #[test]
    fn test_leading_zeros_rejected() {
        for input in ["1.00", "01.2", "1.0.007", "6.2.3.04"] {
            let err = input.parse::<SemanticVersion>().unwrap_err();
            assert!(err.reason.contains("leading zero"), "{}: {}", input, err);
        }
        for input in ["0.0", "10.0", "1.0.0.0", "4.0.30319.42000", "2.0-rc.01"] {
            let version: SemanticVersion = input.parse().unwrap();
            assert_eq!(version.to_string(), input);
        }
    }

    #[test]
    fn test_parse_error_message_keeps_input() {
        let err = "4.x.1".parse::<SemanticVersion>().unwrap_err();
        assert!(err.to_string().contains("\"4.x.1\""), "{}", err);
    }

    #[test]
    fn test_prerelease_label() {
        let preview = v("7.0.0-preview.4");
        assert_eq!(preview.label(), Some("preview.4"));
        assert!(preview.is_prerelease());
        assert_eq!(preview.to_string(), "7.0.0-preview.4");
        assert!(preview < v("7.0.0"));
        assert!(v("7.0.0-preview.3") < preview);
    }

    #[test]
    fn test_absent_components_order_before_zero() {
        assert!(v("5.1") < v("5.1.0"));
        assert!(v("5.1.0") < v("5.1.0.0"));
        assert!(v("5.1.0.0") < v("5.1.0.1"));
        assert_ne!(v("5.1"), v("5.1.0"));
        assert!(v("5.1.99") < v("5.2"));
        assert!(v("2.0.1") > v("1.0"));
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["1.0", "1.2.0", "10.0.17763.0", "6.2.0-rc.1"] {
            assert_eq!(v(s).to_string(), s);
        }
    }

    #[test]
    fn test_prefix_match() {
        assert!(v("5.1").matches_prefix_of(&v("5.1.17763.316")));
        assert!(v("5.1").matches_prefix_of(&v("5.1")));
        assert!(!v("5.1.0").matches_prefix_of(&v("5.1")));
        assert!(!v("5.0").matches_prefix_of(&v("5.1.0")));
    }

    #[test]
    fn test_labelled_validates() {
        let base = SemanticVersion::with_build(7, 1, 0);
        assert_eq!(base.labelled("rc.2").unwrap().to_string(), "7.1.0-rc.2");
        let err = base.labelled("bad label").unwrap_err();
        assert_eq!(err.input, "7.1.0-bad label");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&SemanticVersion::with_revision(10, 0, 17763, 0)).unwrap();
        assert_eq!(json, "\"10.0.17763.0\"");
        let parsed: SemanticVersion = serde_json::from_str("\"4.0.30319.42000\"").unwrap();
        assert_eq!(parsed, SemanticVersion::with_revision(4, 0, 30319, 42000));
        assert!(serde_json::from_str::<SemanticVersion>("\"4\"").is_err());
        assert!(serde_json::from_str::<SemanticVersion>("4.0").is_err());
    }
}
