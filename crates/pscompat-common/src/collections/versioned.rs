use super::{CaseInsensitiveMap, VersionMap};
use crate::version::SemanticVersion;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name (case-insensitive) to version to value.
///
/// Several versions of one name coexist with independent values. Versions
/// of a name are kept in insertion order; the map never picks a default
/// version on the caller's behalf.
pub struct VersionedNameMap<V> {
    names: CaseInsensitiveMap<VersionMap<V>>,
}

impl<V> VersionedNameMap<V> {
    pub fn new() -> Self {
        VersionedNameMap {
            names: CaseInsensitiveMap::new(),
        }
    }

    /// Insert `value` for `name` at `version`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, version: SemanticVersion, value: V) -> Option<V> {
        self.names
            .get_or_insert_with(name, VersionMap::new)
            .insert(version, value)
    }

    /// The value for `name` at exactly `version`.
    pub fn get(&self, name: &str, version: &SemanticVersion) -> Option<&V> {
        self.names.get(name).and_then(|versions| versions.get(version))
    }

    pub fn get_mut(&mut self, name: &str, version: &SemanticVersion) -> Option<&mut V> {
        self.names
            .get_mut(name)
            .and_then(|versions| versions.get_mut(version))
    }

    /// Every version recorded for `name`, in insertion order.
    pub fn versions_of(&self, name: &str) -> Vec<&SemanticVersion> {
        self.names
            .get(name)
            .map(|versions| versions.keys().collect())
            .unwrap_or_default()
    }

    /// All versions of `name` with their values.
    pub fn versions(&self, name: &str) -> Option<&VersionMap<V>> {
        self.names.get(name)
    }

    /// Like [`versions`](Self::versions), also returning the stored casing of `name`.
    pub fn get_name_versions(&self, name: &str) -> Option<(&String, &VersionMap<V>)> {
        self.names.get_key_value(name)
    }

    /// Highest version of `name` under [`SemanticVersion`]'s total order.
    pub fn latest_version_of(&self, name: &str) -> Option<(&SemanticVersion, &V)> {
        self.names
            .get(name)
            .and_then(|versions| versions.iter().max_by(|a, b| a.0.cmp(b.0)))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Stored names (original casing) in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &String> + '_ {
        self.names.keys()
    }

    /// Number of distinct names.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of (name, version) entries.
    pub fn len(&self) -> usize {
        self.names.values().map(|versions| versions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove one version; a name left with no versions is removed too.
    pub fn remove(&mut self, name: &str, version: &SemanticVersion) -> Option<V> {
        let versions = self.names.get_mut(name)?;
        let removed = versions.remove(version);
        if versions.is_empty() {
            self.names.remove(name);
        }
        removed
    }

    /// Remove every version of `name`.
    pub fn remove_all(&mut self, name: &str) -> Option<VersionMap<V>> {
        self.names.remove(name)
    }

    /// Flattened `(name, version, value)` triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SemanticVersion, &V)> + '_ {
        self.names
            .iter()
            .flat_map(|(name, versions)| versions.iter().map(move |(version, value)| (name, version, value)))
    }
}

impl<V> Default for VersionedNameMap<V> {
    fn default() -> Self {
        VersionedNameMap::new()
    }
}

impl<V: Clone> Clone for VersionedNameMap<V> {
    fn clone(&self) -> Self {
        VersionedNameMap {
            names: self.names.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for VersionedNameMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.names, f)
    }
}

impl<V: PartialEq> PartialEq for VersionedNameMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl<V: Eq> Eq for VersionedNameMap<V> {}

impl<V> FromIterator<(String, SemanticVersion, V)> for VersionedNameMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, SemanticVersion, V)>>(iter: I) -> Self {
        let mut map = VersionedNameMap::new();
        for (name, version, value) in iter {
            map.insert(name, version, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for VersionedNameMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for VersionedNameMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CaseInsensitiveMap::deserialize(deserializer).map(|names| VersionedNameMap { names })
    }
}
