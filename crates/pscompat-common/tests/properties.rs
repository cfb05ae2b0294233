//! Property-based tests for versions and containers.
//!
//! Uses proptest to check ordering and lookup invariants across random inputs.

use proptest::prelude::*;
use pscompat_common::{CaseInsensitiveMap, OrdinalMap, SemanticVersion, VersionedNameMap};
use std::cmp::Ordering;

fn version_strategy() -> impl Strategy<Value = SemanticVersion> {
    (
        prop::collection::vec(0u64..20, 2..=4),
        prop::option::of("[a-z]{1,6}(\\.[0-9]{1,2})?"),
    )
        .prop_map(|(parts, label)| {
            let numeric = parts
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(".");
            let text = match label {
                Some(label) => format!("{}-{}", numeric, label),
                None => numeric,
            };
            text.parse().expect("generated version parses")
        })
}

// ============================================================================
// SemanticVersion ordering
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Display then parse yields the same version.
    #[test]
    fn version_display_parse_roundtrip(v in version_strategy()) {
        let reparsed: SemanticVersion = v.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, v);
    }

    /// Ordering is antisymmetric and agrees with equality.
    #[test]
    fn version_order_consistent_with_eq(a in version_strategy(), b in version_strategy()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
    }

    /// Ordering is transitive.
    #[test]
    fn version_order_transitive(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy()
    ) {
        let mut sorted = vec![a, b, c];
        sorted.sort();
        prop_assert!(sorted[0] <= sorted[1]);
        prop_assert!(sorted[1] <= sorted[2]);
        prop_assert!(sorted[0] <= sorted[2]);
    }

    /// Adding a trailing zero component always yields a strictly greater version.
    #[test]
    fn version_absent_component_sorts_before_zero(major in 0u64..100, minor in 0u64..100) {
        let short = SemanticVersion::new(major, minor);
        let padded = SemanticVersion::with_build(major, minor, 0);
        prop_assert!(short < padded);
        prop_assert_ne!(short, padded);
    }
}

// ============================================================================
// Container invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Keys enumerate in first-insertion order.
    #[test]
    fn ordinal_map_preserves_insertion_order(keys in prop::collection::vec("[A-Za-z]{1,8}", 0..20)) {
        let mut map = OrdinalMap::new();
        let mut expected: Vec<String> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if !expected.contains(key) {
                expected.push(key.clone());
            }
            map.insert(key.as_str(), i);
        }
        let actual: Vec<String> = map.keys().cloned().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Any casing of an inserted key resolves to the same value.
    #[test]
    fn case_insensitive_lookup_any_casing(key in "[A-Za-z-]{1,16}", value in any::<u32>()) {
        let mut map = CaseInsensitiveMap::new();
        map.insert(key.as_str(), value);
        prop_assert_eq!(map.get(&key.to_uppercase()), Some(&value));
        prop_assert_eq!(map.get(&key.to_lowercase()), Some(&value));
        prop_assert_eq!(map.keys().next().map(String::as_str), Some(key.as_str()));
    }

    /// Serialization keeps entry order.
    #[test]
    fn case_insensitive_json_roundtrip(entries in prop::collection::vec(("[A-Za-z]{1,8}", any::<i64>()), 0..12)) {
        let map: CaseInsensitiveMap<i64> = entries.into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        let parsed: CaseInsensitiveMap<i64> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, map);
    }

    /// Every inserted (name, version) pair stays individually retrievable.
    #[test]
    fn versioned_map_keeps_all_versions(versions in prop::collection::vec(version_strategy(), 1..8)) {
        let mut map = VersionedNameMap::new();
        for (i, version) in versions.iter().enumerate() {
            map.insert("Module", version.clone(), i);
        }
        for version in &versions {
            prop_assert!(map.get("MODULE", version).is_some());
        }
        let mut unique = versions.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(map.versions_of("module").len(), unique.len());
    }
}
