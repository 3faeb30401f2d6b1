//! Ordered map backed by a sorted singly-linked chain.
//!
//! This module provides [`ChainMap`], a mutable ordered map whose entries
//! live in a chain of exclusively owned nodes, kept sorted by the
//! strategy's key comparison.
//!
//! # Overview
//!
//! `ChainMap` trades asymptotic speed for structural simplicity:
//!
//! - O(n) get, put, remove, len
//! - O(1) is_empty
//! - O(n) ordered iteration
//!
//! Every search walks the chain from the head and stops early at the first
//! stored key comparing strictly greater than the probe; the sort invariant
//! guarantees the probe cannot appear later. Insertion and removal reuse
//! the same walk to find their splice point and rewire one link.
//!
//! # Ownership
//!
//! Elements enter the map as deep copies produced by the strategy's copy
//! operations and leave through its release operations, exactly once each.
//! The map never stores or exposes a value the caller passed in.
//!
//! # Examples
//!
//! ```rust
//! use chainmap::sorted::ChainMap;
//!
//! let mut map: ChainMap<i32, String> = ChainMap::new();
//! map.put(&5, &"five".to_string()).unwrap();
//! map.put(&1, &"one".to_string()).unwrap();
//! map.put(&3, &"three".to_string()).unwrap();
//!
//! // Entries are always in ascending key order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &5]);
//!
//! // Re-putting a key updates in place
//! map.put(&3, &"THREE".to_string()).unwrap();
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.get(&3), Some(&"THREE".to_string()));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use super::element::{ElementOps, NaturalOrder};
use super::error::{MapError, MapResult};

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node of the chain.
///
/// Each node owns one key, one value, and the link to its successor. A node
/// never exists with only one of its elements populated: construction
/// copies both or fails, and disposal releases both.
struct Node<K, V> {
    /// The key this node owns.
    key: K,
    /// The value this node owns.
    value: V,
    /// Exclusive link to the next node (if any).
    next: Option<Box<Self>>,
}

/// Position of a probe key in the chain, as reported by a sorted walk.
enum KeySlot {
    /// A node with an equal key exists at this position.
    Occupied(usize),
    /// No equal key; a new node belongs at this position.
    Vacant(usize),
}

// =============================================================================
// ChainMap Definition
// =============================================================================

/// An ordered key-value map backed by a sorted singly-linked chain.
///
/// `ChainMap` keeps its entries sorted by the strategy's key comparison and
/// routes every element copy and release through the same strategy, so the
/// concrete key and value types stay opaque to the container. Duplicate
/// keys cannot occur: putting an existing key replaces its value in place.
///
/// The third type parameter selects the [`ElementOps`] strategy and
/// defaults to [`NaturalOrder`] (`Clone`-based copies, `Ord`-based
/// comparison).
///
/// # Time Complexity
///
/// | Operation        | Complexity |
/// |------------------|------------|
/// | `with_ops`/`new` | O(1)       |
/// | `get`            | O(n)       |
/// | `put`            | O(n)       |
/// | `remove`         | O(n)       |
/// | `contains_key`   | O(n)       |
/// | `len`            | O(n)       |
/// | `is_empty`       | O(1)       |
/// | `clear`          | O(n)       |
///
/// # Cursor Iteration
///
/// Besides the borrow-checked [`iter`](Self::iter), the map carries one
/// resumable cursor driven by [`first_key`](Self::first_key) and
/// [`next_key`](Self::next_key). The cursor survives between calls but is
/// invalidated (reset to "unset") by every structural mutation,
/// successful or failed; a subsequent `next_key` then returns `None`
/// instead of touching stale state.
///
/// # Examples
///
/// ```rust
/// use chainmap::sorted::ChainMap;
///
/// let mut map: ChainMap<&str, i32> = ChainMap::new();
/// map.put(&"b", &2).unwrap();
/// map.put(&"a", &1).unwrap();
///
/// assert_eq!(map.get(&"a"), Some(&1));
/// assert!(map.contains_key(&"b"));
/// assert!(!map.contains_key(&"c"));
/// ```
pub struct ChainMap<K, V, O: ElementOps<K, V> = NaturalOrder> {
    /// Exclusive link to the first node (if any).
    head: Option<Box<Node<K, V>>>,
    /// Resumable iteration position; unset when iteration is not in
    /// progress or was invalidated by a mutation.
    cursor: Option<usize>,
    /// The element strategy, fixed for the map's whole life.
    ops: O,
}

static_assertions::assert_impl_all!(ChainMap<i32, String>: Send, Sync);

impl<K, V, O: ElementOps<K, V>> ChainMap<K, V, O> {
    /// Creates an empty map using the given element strategy.
    ///
    /// The strategy is stored in the map and used for every copy, release,
    /// and comparison until the map is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::{ChainMap, NaturalOrder};
    ///
    /// let map: ChainMap<i32, String, NaturalOrder> = ChainMap::with_ops(NaturalOrder);
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_ops(ops: O) -> Self {
        Self {
            head: None,
            cursor: None,
            ops,
        }
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// assert!(map.is_empty());
    /// map.put(&1, &10).unwrap();
    /// assert!(!map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(n); the chain is counted node by node, no length is cached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&1, &10).unwrap();
    /// map.put(&2, &20).unwrap();
    /// assert_eq!(map.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the map contains the given key.
    ///
    /// Walks the chain from the head and stops at the first stored key
    /// comparing strictly greater than the probe.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&2, &20).unwrap();
    /// assert!(map.contains_key(&2));
    /// assert!(!map.contains_key(&3));
    /// ```
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a reference to the stored value for the given key.
    ///
    /// The reference points at the map's own copy of the value, not at
    /// anything the caller ever passed in. The iteration cursor is not
    /// touched.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, String> = ChainMap::new();
    /// map.put(&1, &"one".to_string()).unwrap();
    /// assert_eq!(map.get(&1), Some(&"one".to_string()));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.head.as_deref();
        while let Some(node) = current {
            match self.ops.compare_keys(key, &node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => return None,
                Ordering::Greater => current = node.next.as_deref(),
            }
        }
        None
    }

    /// Returns a mutable reference to the stored value for the given key.
    ///
    /// Mutating through the reference edits the map's own copy in place;
    /// the chain structure and the iteration cursor are unaffected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&1, &10).unwrap();
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(map.get(&1), Some(&15));
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.locate(key) {
            KeySlot::Occupied(index) => self.node_at_mut(index).map(|node| &mut node.value),
            KeySlot::Vacant(_) => None,
        }
    }

    /// Inserts a key-value pair, or replaces the value of an existing key.
    ///
    /// The map stores fresh copies obtained from the strategy; the caller's
    /// key and value are only read. A single sorted walk decides between
    /// the two outcomes:
    ///
    /// - an equal stored key exists: the replacement value is copied first,
    ///   and only after that copy succeeds is the old value released; a
    ///   failed copy leaves the old value in place;
    /// - otherwise a new node is spliced in at the position that keeps the
    ///   chain sorted (head, between two nodes, or tail).
    ///
    /// The iteration cursor is reset whether the operation succeeds or
    /// fails.
    ///
    /// # Errors
    ///
    /// [`MapError::AllocationFailed`] if a copy operation returns `None`;
    /// the map is structurally unchanged in that case.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, String> = ChainMap::new();
    /// map.put(&1, &"one".to_string()).unwrap();
    /// map.put(&1, &"ONE".to_string()).unwrap();
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&1), Some(&"ONE".to_string()));
    /// ```
    pub fn put(&mut self, key: &K, value: &V) -> MapResult {
        self.cursor = None;
        match self.locate(key) {
            KeySlot::Occupied(index) => {
                let fresh = self
                    .ops
                    .copy_value(value)
                    .ok_or(MapError::AllocationFailed)?;
                let stale = match self.node_at_mut(index) {
                    Some(node) => mem::replace(&mut node.value, fresh),
                    None => unreachable!("located entry vanished before update"),
                };
                self.ops.release_value(stale);
                Ok(())
            }
            KeySlot::Vacant(0) => {
                let mut node = self.copy_entry(key, value)?;
                node.next = self.head.take();
                self.head = Some(node);
                Ok(())
            }
            KeySlot::Vacant(index) => {
                let mut node = self.copy_entry(key, value)?;
                match self.node_at_mut(index - 1) {
                    Some(tail) => {
                        node.next = tail.next.take();
                        tail.next = Some(node);
                        Ok(())
                    }
                    None => unreachable!("splice point vanished before insert"),
                }
            }
        }
    }

    /// Removes the entry with the given key.
    ///
    /// On a match the node is spliced out of the chain (the head link is
    /// updated when the first node matches) and both of its elements are
    /// released through the strategy. The walk stops early at the first
    /// strictly greater stored key. The iteration cursor is reset whether
    /// the operation succeeds or fails.
    ///
    /// # Errors
    ///
    /// [`MapError::KeyNotFound`] if the chain is empty, is exhausted
    /// without an exact match, or a strictly greater key is met first.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::{ChainMap, MapError};
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&1, &10).unwrap();
    ///
    /// assert_eq!(map.remove(&1), Ok(()));
    /// assert_eq!(map.remove(&1), Err(MapError::KeyNotFound));
    /// ```
    pub fn remove(&mut self, key: &K) -> MapResult {
        self.cursor = None;
        let index = match self.locate(key) {
            KeySlot::Occupied(index) => index,
            KeySlot::Vacant(_) => return Err(MapError::KeyNotFound),
        };
        let node = match self.unlink(index) {
            Some(node) => node,
            None => unreachable!("located entry vanished before removal"),
        };
        let Node {
            key: stored_key,
            value: stored_value,
            next: _,
        } = *node;
        self.ops.release_key(stored_key);
        self.ops.release_value(stored_value);
        Ok(())
    }

    /// Removes every entry, releasing each element through the strategy.
    ///
    /// The map stays usable afterwards; the iteration cursor is reset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&1, &10).unwrap();
    /// map.put(&2, &20).unwrap();
    ///
    /// map.clear();
    /// assert_eq!(map.len(), 0);
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.cursor = None;
        self.drain_chain();
    }

    /// Produces an independent copy of the map, element by element.
    ///
    /// The copy shares the strategy (cloned) and contains freshly copied
    /// entries in the same order. If any element copy fails mid-chain, all
    /// copies made so far are released through the strategy and `None` is
    /// returned: no partially built map ever escapes, and the source map
    /// (including its cursor) is untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, String> = ChainMap::new();
    /// map.put(&1, &"one".to_string()).unwrap();
    ///
    /// let copy = map.try_duplicate().unwrap();
    /// assert_eq!(copy.get(&1), Some(&"one".to_string()));
    /// ```
    #[must_use]
    pub fn try_duplicate(&self) -> Option<Self>
    where
        O: Clone,
    {
        let mut entries: Vec<(K, V)> = Vec::new();
        for (key, value) in self {
            let Some(key_copy) = self.ops.copy_key(key) else {
                self.release_collected(entries);
                return None;
            };
            let Some(value_copy) = self.ops.copy_value(value) else {
                self.ops.release_key(key_copy);
                self.release_collected(entries);
                return None;
            };
            entries.push((key_copy, value_copy));
        }

        // Rebuild back to front so each node can own its successor.
        let mut head = None;
        while let Some((key, value)) = entries.pop() {
            head = Some(Box::new(Node {
                key,
                value,
                next: head,
            }));
        }

        Some(Self {
            head,
            cursor: None,
            ops: self.ops.clone(),
        })
    }

    /// Starts cursor iteration and returns the smallest key.
    ///
    /// Returns `None` on an empty map, leaving the cursor unset. This is
    /// the only way to (re)start the cursor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// assert_eq!(map.first_key(), None);
    ///
    /// map.put(&2, &20).unwrap();
    /// map.put(&1, &10).unwrap();
    /// assert_eq!(map.first_key(), Some(&1));
    /// ```
    pub fn first_key(&mut self) -> Option<&K> {
        self.cursor = self.head.as_deref().map(|_| 0);
        self.head.as_deref().map(|node| &node.key)
    }

    /// Advances the cursor and returns the key at the new position.
    ///
    /// Returns `None` (leaving the cursor unset) when iteration was
    /// never started, was already exhausted, was invalidated by a
    /// structural mutation, or just ran off the end of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&1, &10).unwrap();
    /// map.put(&2, &20).unwrap();
    ///
    /// assert_eq!(map.next_key(), None); // not started
    /// assert_eq!(map.first_key(), Some(&1));
    /// assert_eq!(map.next_key(), Some(&2));
    /// assert_eq!(map.next_key(), None); // exhausted
    /// assert_eq!(map.next_key(), None); // stays exhausted
    /// ```
    pub fn next_key(&mut self) -> Option<&K> {
        let position = self.cursor? + 1;
        self.cursor = self.node_at(position).map(|_| position);
        let position = self.cursor?;
        self.node_at(position).map(|node| &node.key)
    }

    /// Returns an iterator over `(&key, &value)` pairs in key order.
    ///
    /// The iterator borrows the map, so the borrow checker rejects any
    /// structural mutation while it is alive; it does not interact with
    /// the resumable cursor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&2, &20).unwrap();
    /// map.put(&1, &10).unwrap();
    ///
    /// let entries: Vec<(&i32, &i32)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &10), (&2, &20)]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> ChainMapIterator<'_, K, V> {
        ChainMapIterator {
            current: self.head.as_deref(),
        }
    }

    /// Returns an iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&3, &30).unwrap();
    /// map.put(&1, &10).unwrap();
    ///
    /// let keys: Vec<&i32> = map.keys().collect();
    /// assert_eq!(keys, vec![&1, &3]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let mut map: ChainMap<i32, i32> = ChainMap::new();
    /// map.put(&3, &30).unwrap();
    /// map.put(&1, &10).unwrap();
    ///
    /// let values: Vec<&i32> = map.values().collect();
    /// assert_eq!(values, vec![&10, &30]);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Sorted walk from the head, classifying where the probe key lands.
    ///
    /// Stops at the first `Equal` (occupied) or the first `Less` (vacant,
    /// insert before that node); an exhausted walk is vacant at the tail.
    fn locate(&self, key: &K) -> KeySlot {
        let mut index = 0;
        let mut current = self.head.as_deref();
        while let Some(node) = current {
            match self.ops.compare_keys(key, &node.key) {
                Ordering::Equal => return KeySlot::Occupied(index),
                Ordering::Less => return KeySlot::Vacant(index),
                Ordering::Greater => {
                    index += 1;
                    current = node.next.as_deref();
                }
            }
        }
        KeySlot::Vacant(index)
    }

    /// Returns the node at `index`, if the chain is that long.
    fn node_at(&self, index: usize) -> Option<&Node<K, V>> {
        let mut current = self.head.as_deref();
        for _ in 0..index {
            current = current.and_then(|node| node.next.as_deref());
        }
        current
    }

    /// Mutable counterpart of [`node_at`](Self::node_at).
    fn node_at_mut(&mut self, index: usize) -> Option<&mut Node<K, V>> {
        let mut current = self.head.as_deref_mut();
        for _ in 0..index {
            current = current.and_then(|node| node.next.as_deref_mut());
        }
        current
    }

    /// Builds a detached node holding fresh copies of both elements.
    ///
    /// If the key copy succeeded but the value copy fails, the key copy is
    /// released before the error is reported, so nothing leaks.
    fn copy_entry(&self, key: &K, value: &V) -> MapResult<Box<Node<K, V>>> {
        let key_copy = self.ops.copy_key(key).ok_or(MapError::AllocationFailed)?;
        let Some(value_copy) = self.ops.copy_value(value) else {
            self.ops.release_key(key_copy);
            return Err(MapError::AllocationFailed);
        };
        Ok(Box::new(Node {
            key: key_copy,
            value: value_copy,
            next: None,
        }))
    }

    /// Detaches and returns the node at `index`, relinking its neighbours.
    fn unlink(&mut self, index: usize) -> Option<Box<Node<K, V>>> {
        if index == 0 {
            let mut node = self.head.take()?;
            self.head = node.next.take();
            return Some(node);
        }
        let tail = self.node_at_mut(index - 1)?;
        let mut node = tail.next.take()?;
        tail.next = node.next.take();
        Some(node)
    }

    /// Releases every node of the chain, head to tail, iteratively.
    ///
    /// Iterative so that dropping a long map cannot overflow the stack on
    /// recursive box drops.
    fn drain_chain(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            let Node { key, value, next } = *node;
            current = next;
            self.ops.release_key(key);
            self.ops.release_value(value);
        }
    }

    /// Releases a batch of copied elements after a failed duplication.
    fn release_collected(&self, entries: Vec<(K, V)>) {
        for (key, value) in entries {
            self.ops.release_key(key);
            self.ops.release_value(value);
        }
    }
}

impl<K: Clone + Ord, V: Clone> ChainMap<K, V> {
    /// Creates an empty map with the [`NaturalOrder`] strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainmap::sorted::ChainMap;
    ///
    /// let map: ChainMap<i32, String> = ChainMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_ops(NaturalOrder)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the `(&key, &value)` pairs of a [`ChainMap`].
///
/// Yields entries in ascending key order by following the chain links.
pub struct ChainMapIterator<'a, K, V> {
    current: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for ChainMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some((&node.key, &node.value))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Clone + Ord, V: Clone> Default for ChainMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, O: ElementOps<K, V>> Drop for ChainMap<K, V, O> {
    fn drop(&mut self) {
        self.drain_chain();
    }
}

impl<'a, K, V, O: ElementOps<K, V>> IntoIterator for &'a ChainMap<K, V, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = ChainMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V: PartialEq, O: ElementOps<K, V>> PartialEq for ChainMap<K, V, O> {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    if self.ops.compare_keys(left_key, right_key) != Ordering::Equal
                        || left_value != right_value
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl<K, V: Eq, O: ElementOps<K, V>> Eq for ChainMap<K, V, O> {}

impl<K: fmt::Debug, V: fmt::Debug, O: ElementOps<K, V>> fmt::Debug for ChainMap<K, V, O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, O: ElementOps<K, V>> fmt::Display for ChainMap<K, V, O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Implementations
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, O> serde::Serialize for ChainMap<K, V, O>
where
    K: serde::Serialize,
    V: serde::Serialize,
    O: ElementOps<K, V>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct ChainMapVisitor<K, V, O> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
    ops_marker: std::marker::PhantomData<O>,
}

#[cfg(feature = "serde")]
impl<K, V, O> ChainMapVisitor<K, V, O> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
            ops_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, O> serde::de::Visitor<'de> for ChainMapVisitor<K, V, O>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    O: ElementOps<K, V> + Default,
{
    type Value = ChainMap<K, V, O>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Entries re-enter through put so the copy contract still holds;
        // duplicate keys in the input overwrite, last write wins.
        let mut map = ChainMap::with_ops(O::default());
        while let Some((key, value)) = access.next_entry::<K, V>()? {
            map.put(&key, &value).map_err(serde::de::Error::custom)?;
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, O> serde::Deserialize<'de> for ChainMap<K, V, O>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    O: ElementOps<K, V> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(ChainMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Send/Sync Tests
// =============================================================================

#[cfg(test)]
mod send_sync_tests {
    use super::*;
    use rstest::rstest;

    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}

    #[rstest]
    fn test_chain_map_is_send() {
        assert_send::<ChainMap<i32, String>>();
        assert_send::<ChainMap<String, i32>>();
    }

    #[rstest]
    fn test_chain_map_is_sync() {
        assert_sync::<ChainMap<i32, String>>();
        assert_sync::<ChainMap<String, i32>>();
    }
}

// =============================================================================
// Serde Tests
// =============================================================================
