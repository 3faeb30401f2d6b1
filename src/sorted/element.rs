//! Element capability strategy for [`ChainMap`](super::ChainMap).
//!
//! Keys and values are opaque to the map: it only ever copies them,
//! releases them, or compares keys, and each of those capabilities is
//! supplied by an [`ElementOps`] strategy fixed at map construction. Two
//! maps over the same key type may therefore order their chains
//! differently, exactly as if each had been handed its own comparison
//! function.

use std::cmp::Ordering;

/// Capability strategy for the opaque elements of a map.
///
/// An implementation bundles the five operations a
/// [`ChainMap`](super::ChainMap) needs: deep-copying keys and values,
/// releasing them, and totally ordering keys. The strategy value is stored
/// in the map and used for its entire lifetime.
///
/// # Contract
///
/// - `copy_key`/`copy_value` must produce an *independent* deep copy.
///   Returning `None` signals that the copy could not be produced and is
///   treated as an out-of-memory condition
///   ([`MapError::AllocationFailed`](super::MapError::AllocationFailed)).
/// - `release_key`/`release_value` must free every resource the element
///   owns. The map calls them exactly once per stored element, and only on
///   elements it obtained from the copy operations. The defaults simply
///   drop the element, which is the correct release for most Rust types.
/// - `compare_keys` must be a total order and must behave consistently for
///   the whole lifetime of any map using the strategy. The map derives
///   ordering from nothing else.
///
/// # Examples
///
/// A strategy with a reversed ordering:
///
/// ```rust
/// use std::cmp::Ordering;
///
/// use chainmap::sorted::{ChainMap, ElementOps};
///
/// struct ReverseOrder;
///
/// impl ElementOps<u32, u32> for ReverseOrder {
///     fn copy_key(&self, key: &u32) -> Option<u32> {
///         Some(*key)
///     }
///
///     fn copy_value(&self, value: &u32) -> Option<u32> {
///         Some(*value)
///     }
///
///     fn compare_keys(&self, probe: &u32, stored: &u32) -> Ordering {
///         stored.cmp(probe)
///     }
/// }
///
/// let mut map = ChainMap::with_ops(ReverseOrder);
/// for key in [1_u32, 2, 3] {
///     map.put(&key, &(key * 10)).unwrap();
/// }
/// let keys: Vec<u32> = map.keys().copied().collect();
/// assert_eq!(keys, vec![3, 2, 1]);
/// ```
pub trait ElementOps<K, V> {
    /// Produces an independent deep copy of a key.
    ///
    /// Returns `None` if the copy cannot be produced; the map treats this
    /// as an allocation failure.
    fn copy_key(&self, key: &K) -> Option<K>;

    /// Produces an independent deep copy of a value.
    ///
    /// Returns `None` if the copy cannot be produced; the map treats this
    /// as an allocation failure.
    fn copy_value(&self, value: &V) -> Option<V>;

    /// Releases a key the map owns.
    ///
    /// Called exactly once per stored key. The default drops it.
    fn release_key(&self, key: K) {
        drop(key);
    }

    /// Releases a value the map owns.
    ///
    /// Called exactly once per stored value. The default drops it.
    fn release_value(&self, value: V) {
        drop(value);
    }

    /// Totally orders two keys.
    ///
    /// `probe` is the caller-supplied key being searched or inserted;
    /// `stored` is a key already in the chain.
    fn compare_keys(&self, probe: &K, stored: &K) -> Ordering;
}

/// The default strategy: `Clone`-based copies and `Ord`-based comparison.
///
/// Copies never fail, release is a plain drop, and keys order by their
/// [`Ord`] implementation. This is the strategy behind
/// [`ChainMap::new`](super::ChainMap::new).
///
/// # Examples
///
/// ```rust
/// use chainmap::sorted::{ChainMap, NaturalOrder};
///
/// let mut map = ChainMap::with_ops(NaturalOrder);
/// map.put(&"b", &2).unwrap();
/// map.put(&"a", &1).unwrap();
/// assert_eq!(map.first_key(), Some(&"a"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Clone + Ord, V: Clone> ElementOps<K, V> for NaturalOrder {
    fn copy_key(&self, key: &K) -> Option<K> {
        Some(key.clone())
    }

    fn copy_value(&self, value: &V) -> Option<V> {
        Some(value.clone())
    }

    fn compare_keys(&self, probe: &K, stored: &K) -> Ordering {
        probe.cmp(stored)
    }
}
