use super::KeyPolicy;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Upper bound on preallocation from an untrusted size hint.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// Insertion-ordered map whose key comparison is defined by `P`.
///
/// Inserting a key that compares equal to an existing one replaces the value
/// in place: the entry keeps its position and its originally stored key.
pub struct NormalizedMap<P: KeyPolicy, V> {
    entries: Vec<(P::Key, V)>,
    index: HashMap<P::Normal, usize>,
}

impl<P: KeyPolicy, V> NormalizedMap<P, V> {
    pub fn new() -> Self {
        NormalizedMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NormalizedMap {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace, returning the previous value for an equal key.
    pub fn insert(&mut self, key: impl Into<P::Key>, value: V) -> Option<V> {
        let key = key.into();
        let normal = P::normalize(P::borrow_key(&key));
        match self.index.get(&normal) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(normal, self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &P::Lookup) -> Option<&V> {
        self.slot(key).map(|slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, key: &P::Lookup) -> Option<&mut V> {
        self.slot(key).map(move |slot| &mut self.entries[slot].1)
    }

    /// The stored key (original casing) together with its value.
    pub fn get_key_value(&self, key: &P::Lookup) -> Option<(&P::Key, &V)> {
        self.slot(key).map(|slot| {
            let (k, v) = &self.entries[slot];
            (k, v)
        })
    }

    pub fn contains_key(&self, key: &P::Lookup) -> bool {
        self.slot(key).is_some()
    }

    /// Value for `key`, inserting `default()` at the end if absent.
    pub fn get_or_insert_with(&mut self, key: impl Into<P::Key>, default: impl FnOnce() -> V) -> &mut V {
        let key = key.into();
        let slot = match self.slot(P::borrow_key(&key)) {
            Some(slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(P::normalize(P::borrow_key(&key)), slot);
                self.entries.push((key, default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Remove an entry; remaining entries keep their relative order.
    pub fn remove(&mut self, key: &P::Lookup) -> Option<V> {
        let slot = self.index.remove(&P::normalize(key))?;
        let (_, value) = self.entries.remove(slot);
        for other in self.index.values_mut() {
            if *other > slot {
                *other -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> Iter<'_, P, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Stored keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &P::Key> + ExactSizeIterator + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    fn slot(&self, key: &P::Lookup) -> Option<usize> {
        self.index.get(&P::normalize(key)).copied()
    }
}

impl<P: KeyPolicy, V> Default for NormalizedMap<P, V> {
    fn default() -> Self {
        NormalizedMap::new()
    }
}

impl<P: KeyPolicy, V: Clone> Clone for NormalizedMap<P, V> {
    fn clone(&self) -> Self {
        NormalizedMap {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<P: KeyPolicy, V: fmt::Debug> fmt::Debug for NormalizedMap<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Entries compare positionally, stored keys by exact value.
impl<P: KeyPolicy, V: PartialEq> PartialEq for NormalizedMap<P, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<P: KeyPolicy, V: Eq> Eq for NormalizedMap<P, V> where P::Key: Eq {}

pub struct Iter<'a, P: KeyPolicy, V> {
    inner: std::slice::Iter<'a, (P::Key, V)>,
}

impl<'a, P: KeyPolicy, V> Iterator for Iter<'a, P, V> {
    type Item = (&'a P::Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<P: KeyPolicy, V> DoubleEndedIterator for Iter<'_, P, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<P: KeyPolicy, V> ExactSizeIterator for Iter<'_, P, V> {}

impl<'a, P: KeyPolicy, V> IntoIterator for &'a NormalizedMap<P, V> {
    type Item = (&'a P::Key, &'a V);
    type IntoIter = Iter<'a, P, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: KeyPolicy, V> IntoIterator for NormalizedMap<P, V> {
    type Item = (P::Key, V);
    type IntoIter = std::vec::IntoIter<(P::Key, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<P: KeyPolicy, V, K: Into<P::Key>> FromIterator<(K, V)> for NormalizedMap<P, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = NormalizedMap::new();
        map.extend(iter);
        map
    }
}

impl<P: KeyPolicy, V, K: Into<P::Key>> Extend<(K, V)> for NormalizedMap<P, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<P: KeyPolicy, V: Serialize> Serialize for NormalizedMap<P, V>
where
    P::Key: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, P: KeyPolicy, V: Deserialize<'de>> Deserialize<'de> for NormalizedMap<P, V>
where
    P::Key: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor<P, V>(PhantomData<fn() -> (P, V)>);

        impl<'de, P: KeyPolicy, V: Deserialize<'de>> Visitor<'de> for MapVisitor<P, V>
        where
            P::Key: Deserialize<'de>,
        {
            type Value = NormalizedMap<P, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let capacity = access.size_hint().unwrap_or(0).min(MAX_PREALLOCATED_ENTRIES);
                let mut map = NormalizedMap::with_capacity(capacity);
                while let Some(key) = access.next_key::<P::Key>()? {
                    let value = access.next_value::<V>()?;
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::{CaseInsensitiveMap, OrdinalMap};

    #[test]
    fn test_case_insensitive_lookup() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("Get-ChildItem", 1);

        assert_eq!(map.get("get-childitem"), Some(&1));
        assert_eq!(map.get("GET-CHILDITEM"), Some(&1));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Get-ChildItem"]);

        let (stored, _) = map.get_key_value("GET-childitem").unwrap();
        assert_eq!(stored, "Get-ChildItem");
    }

    #[test]
    fn test_ignore_case_uses_simple_uppercase() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("\u{212A}ey", 1);
        map.insert("Ärger", 2);
        map.insert("Straße", 3);

        assert_eq!(map.get("key"), None);
        assert_eq!(map.get("\u{212A}EY"), Some(&1));
        assert_eq!(map.get("ärger"), Some(&2));
        assert_eq!(map.get("STRAßE"), Some(&3));
        assert_eq!(map.get("STRASSE"), None);

        map.insert("key", 4);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_ordinal_is_case_sensitive() {
        let mut map = OrdinalMap::new();
        map.insert("System.IO", 1);
        map.insert("system.io", 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("System.IO"), Some(&1));
        assert_eq!(map.get("SYSTEM.IO"), None);
    }

    #[test]
    fn test_last_write_wins_keeps_position_and_casing() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("Path", "first");
        map.insert("Filter", "other");
        assert_eq!(map.insert("PATH", "second"), Some("first"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("path"), Some(&"second"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Path", "Filter"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: OrdinalMap<u32> = [("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect();
        assert_eq!(map.remove("b"), Some(2));
        assert_eq!(map.remove("b"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
        assert_eq!(map.get("d"), Some(&4));
        map.insert("e", 5);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map: CaseInsensitiveMap<Vec<u32>> = CaseInsensitiveMap::new();
        map.get_or_insert_with("Foo", Vec::new).push(1);
        map.get_or_insert_with("FOO", Vec::new).push(2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("foo"), Some(&vec![1, 2]));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original: CaseInsensitiveMap<Vec<String>> = CaseInsensitiveMap::new();
        original.insert("Name", vec!["System.String".to_string()]);

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.get_mut("name").unwrap().push("System.Object".to_string());
        copy.insert("Extra", Vec::new());

        assert_eq!(original.len(), 1);
        assert_eq!(original.get("Name").unwrap().len(), 1);
        assert_ne!(copy, original);
    }

    #[test]
    fn test_serde_preserves_order_and_casing() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("Zeta", 1);
        map.insert("alpha", 2);
        map.insert("Mid", 3);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Zeta":1,"alpha":2,"Mid":3}"#);

        let parsed: CaseInsensitiveMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
        assert_eq!(parsed.get("ALPHA"), Some(&2));
    }

    #[test]
    fn test_deserialize_case_conflict_last_wins() {
        let parsed: CaseInsensitiveMap<u32> = serde_json::from_str(r#"{"Path":1,"PATH":2}"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("path"), Some(&2));
        assert_eq!(parsed.keys().next().map(String::as_str), Some("Path"));
    }

    #[test]
    fn test_deserialize_error_names_key() {
        let value = serde_json::json!({ "Good": 1, "Bad": "x" });
        let err = crate::path::from_value::<OrdinalMap<u32>>(value).unwrap_err();
        match err {
            crate::Error::Malformed { path, reason } => {
                assert_eq!(path, "Bad");
                assert!(reason.starts_with("invalid type"), "{}", reason);
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }
}
