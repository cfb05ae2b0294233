//! Insertion-ordered containers used throughout profile descriptors.
//!
//! Profile documents are diffed positionally by some consumers, so every map
//! here keeps entries in insertion order. A hash index on a normalized form
//! of the key gives constant-time lookup:
//! - [`OrdinalMap`]: exact, case-sensitive string keys (namespaces, type and
//!   member names).
//! - [`CaseInsensitiveMap`]: ordinal-ignore-case string keys (modules,
//!   commands, parameters), as the shell resolves them.
//! - [`VersionedNameMap`]: case-insensitive name, then version.
//!
//! Stored keys keep their original casing; only comparison is normalized.

mod normalized;
mod versioned;

pub use normalized::{Iter, NormalizedMap};
pub use versioned::VersionedNameMap;

use crate::version::SemanticVersion;
use std::fmt;
use std::hash::Hash;

/// How a map stores, borrows and compares its keys.
pub trait KeyPolicy {
    /// Key as stored and serialized.
    type Key: Clone + fmt::Debug + fmt::Display + PartialEq;
    /// Borrowed form accepted by lookups.
    type Lookup: ?Sized;
    /// Form used for hashing and equality.
    type Normal: Hash + Eq + Clone + fmt::Debug;

    fn normalize(key: &Self::Lookup) -> Self::Normal;

    fn borrow_key(key: &Self::Key) -> &Self::Lookup;
}

/// Exact string comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordinal;

impl KeyPolicy for Ordinal {
    type Key = String;
    type Lookup = str;
    type Normal = String;

    fn normalize(key: &str) -> String {
        key.to_string()
    }

    fn borrow_key(key: &String) -> &str {
        key
    }
}

/// Fold `s` for ordinal-ignore-case comparison, the rule .NET applies to
/// command, module and parameter names.
///
/// Each character maps to its simple uppercase form. Characters whose
/// uppercase expands to several (`ß` to `SS`) stay as they are, and no
/// compatibility folding happens, so the Kelvin sign `\u{212A}` does not
/// match `k`.
pub fn fold_case(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Ordinal-ignore-case equality under [`fold_case`].
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_uppercase();
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Ordinal comparison ignoring case, per [`fold_case`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreCase;

impl KeyPolicy for IgnoreCase {
    type Key = String;
    type Lookup = str;
    type Normal = String;

    fn normalize(key: &str) -> String {
        fold_case(key)
    }

    fn borrow_key(key: &String) -> &str {
        key
    }
}

/// Version keys; equality follows [`SemanticVersion`]'s `Eq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByVersion;

impl KeyPolicy for ByVersion {
    type Key = SemanticVersion;
    type Lookup = SemanticVersion;
    type Normal = SemanticVersion;

    fn normalize(key: &SemanticVersion) -> SemanticVersion {
        key.clone()
    }

    fn borrow_key(key: &SemanticVersion) -> &SemanticVersion {
        key
    }
}

/// Case-sensitive, insertion-ordered string map.
pub type OrdinalMap<V> = NormalizedMap<Ordinal, V>;

/// Case-insensitive, insertion-ordered string map.
pub type CaseInsensitiveMap<V> = NormalizedMap<IgnoreCase, V>;

/// Insertion-ordered map keyed by version.
pub type VersionMap<V> = NormalizedMap<ByVersion, V>;
