//! Integration tests for `ChainMap`.
//!
//! Exercises the public surface end to end: sorted maintenance across
//! mixed operation sequences, the cursor protocol, duplication
//! independence, and caller-supplied strategies.

use std::cmp::Ordering;

use chainmap::sorted::{ChainMap, ElementOps, MapError};
use rstest::rstest;

// =============================================================================
// Mixed-Sequence Scenarios
// =============================================================================

#[rstest]
fn test_put_update_remove_scenario() {
    let mut map: ChainMap<i32, String> = ChainMap::new();
    map.put(&5, &"a".to_string()).unwrap();
    map.put(&1, &"b".to_string()).unwrap();
    map.put(&3, &"c".to_string()).unwrap();

    let entries: Vec<(i32, String)> = map.iter().map(|(k, v)| (*k, v.clone())).collect();
    assert_eq!(
        entries,
        vec![
            (1, "b".to_string()),
            (3, "c".to_string()),
            (5, "a".to_string()),
        ]
    );

    // Re-putting key 3 updates in place: same keys, same size, new value.
    map.put(&3, &"z".to_string()).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    assert_eq!(map.get(&3), Some(&"z".to_string()));

    // Removing key 1 shrinks the map by exactly one.
    map.remove(&1).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![3, 5]);

    // Removing it again reports not-found and changes nothing.
    assert_eq!(map.remove(&1), Err(MapError::KeyNotFound));
    assert_eq!(map.len(), 2);
}

#[rstest]
fn test_interleaved_puts_and_removes_keep_order() {
    let mut map: ChainMap<i32, i32> = ChainMap::new();
    for key in [8, 3, 5, 1, 9, 7] {
        map.put(&key, &(key * key)).unwrap();
    }
    map.remove(&5).unwrap();
    map.put(&4, &16).unwrap();
    map.remove(&9).unwrap();
    map.put(&2, &4).unwrap();

    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 7, 8]
    );
    for (key, value) in &map {
        assert_eq!(*value, key * key);
    }
}

#[rstest]
fn test_clear_then_reuse() {
    let mut map: ChainMap<i32, i32> = ChainMap::new();
    for key in 0..10 {
        map.put(&key, &key).unwrap();
    }
    map.clear();
    assert_eq!(map.len(), 0);
    assert_eq!(map.first_key(), None);

    map.put(&42, &1).unwrap();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![42]);
}

// =============================================================================
// Cursor Protocol Scenarios
// =============================================================================

#[rstest]
fn test_full_cursor_walk_matches_iterator() {
    let mut map: ChainMap<i32, i32> = ChainMap::new();
    for key in [4, 2, 9, 7, 1] {
        map.put(&key, &0).unwrap();
    }
    let iterated: Vec<i32> = map.keys().copied().collect();

    let mut walked = Vec::new();
    let mut key = map.first_key().copied();
    while let Some(current) = key {
        walked.push(current);
        key = map.next_key().copied();
    }
    assert_eq!(walked, iterated);
}

#[rstest]
fn test_cursor_invalidation_across_mutations() {
    let mut map: ChainMap<i32, i32> = ChainMap::new();
    map.put(&1, &10).unwrap();
    map.put(&2, &20).unwrap();

    assert_eq!(map.first_key(), Some(&1));
    map.put(&3, &30).unwrap();
    assert_eq!(map.next_key(), None);

    assert_eq!(map.first_key(), Some(&1));
    map.remove(&3).unwrap();
    assert_eq!(map.next_key(), None);

    // Lookups between cursor calls leave the position alone.
    assert_eq!(map.first_key(), Some(&1));
    assert_eq!(map.get(&2), Some(&20));
    assert_eq!(map.next_key(), Some(&2));
}

// =============================================================================
// Duplication Scenarios
// =============================================================================

#[rstest]
fn test_duplicate_matches_source_then_diverges() {
    let mut map: ChainMap<i32, String> = ChainMap::new();
    for (key, value) in [(2, "two"), (1, "one"), (3, "three")] {
        map.put(&key, &value.to_string()).unwrap();
    }

    let mut copy = map.try_duplicate().unwrap();
    assert_eq!(copy, map);
    assert_eq!(copy.len(), map.len());

    copy.put(&4, &"four".to_string()).unwrap();
    map.remove(&1).unwrap();

    assert_eq!(copy.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
}

// =============================================================================
// Caller-Supplied Strategy Scenarios
// =============================================================================

/// Orders keys by descending value, exercising a non-`Ord` chain order.
struct Descending;

impl ElementOps<i32, i32> for Descending {
    fn copy_key(&self, key: &i32) -> Option<i32> {
        Some(*key)
    }

    fn copy_value(&self, value: &i32) -> Option<i32> {
        Some(*value)
    }

    fn compare_keys(&self, probe: &i32, stored: &i32) -> Ordering {
        stored.cmp(probe)
    }
}

#[rstest]
fn test_descending_strategy_reverses_iteration_order() {
    let mut map = ChainMap::with_ops(Descending);
    for key in [2, 9, 4] {
        map.put(&key, &key).unwrap();
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![9, 4, 2]);
    assert_eq!(map.first_key(), Some(&9));
    assert_eq!(map.next_key(), Some(&4));
}

#[rstest]
fn test_descending_strategy_update_and_remove_still_match_exact_keys() {
    let mut map = ChainMap::with_ops(Descending);
    map.put(&5, &50).unwrap();
    map.put(&7, &70).unwrap();

    map.put(&5, &55).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&5), Some(&55));

    map.remove(&7).unwrap();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5]);
}

/// Keys ordered case-insensitively; copies uppercase the stored value.
struct CaseFold;

impl ElementOps<String, String> for CaseFold {
    fn copy_key(&self, key: &String) -> Option<String> {
        Some(key.clone())
    }

    fn copy_value(&self, value: &String) -> Option<String> {
        Some(value.to_uppercase())
    }

    fn compare_keys(&self, probe: &String, stored: &String) -> Ordering {
        probe.to_lowercase().cmp(&stored.to_lowercase())
    }
}

#[rstest]
fn test_case_insensitive_keys_collapse_to_one_entry() {
    let mut map = ChainMap::with_ops(CaseFold);
    map.put(&"Key".to_string(), &"first".to_string()).unwrap();
    map.put(&"KEY".to_string(), &"second".to_string()).unwrap();

    assert_eq!(map.len(), 1);
    // The stored value is whatever the strategy's copy produced.
    assert_eq!(map.get(&"key".to_string()), Some(&"SECOND".to_string()));
}
