//! Sorted, strategy-driven key-value containers.
//!
//! This module provides [`ChainMap`], an ordered map backed by a singly
//! linked chain of exclusively owned nodes, together with the
//! [`ElementOps`] strategy that supplies element copying, releasing, and
//! key ordering:
//!
//! - [`ChainMap`]: the container itself
//! - [`ElementOps`]: the capability strategy for opaque elements
//! - [`NaturalOrder`]: the `Clone`/`Ord`-based default strategy
//! - [`MapError`] / [`MapResult`]: error reporting for fallible operations
//!
//! # Ownership Contract
//!
//! The map never stores a reference the caller passed in: entries enter as
//! deep copies produced by the strategy, and every stored element is handed
//! back to the strategy's release operation exactly once, whether that is
//! on removal, on clear, on value replacement, or when the map is dropped.
//!
//! # Examples
//!
//! ## Natural ordering
//!
//! ```rust
//! use chainmap::sorted::ChainMap;
//!
//! let mut map: ChainMap<i32, &str> = ChainMap::new();
//! map.put(&5, &"five").unwrap();
//! map.put(&1, &"one").unwrap();
//! map.put(&3, &"three").unwrap();
//!
//! // Entries are always in ascending key order
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![1, 3, 5]);
//! ```
//!
//! ## Caller-supplied ordering
//!
//! ```rust
//! use std::cmp::Ordering;
//!
//! use chainmap::sorted::{ChainMap, ElementOps};
//!
//! struct Descending;
//!
//! impl ElementOps<i32, String> for Descending {
//!     fn copy_key(&self, key: &i32) -> Option<i32> {
//!         Some(*key)
//!     }
//!
//!     fn copy_value(&self, value: &String) -> Option<String> {
//!         Some(value.clone())
//!     }
//!
//!     fn compare_keys(&self, probe: &i32, stored: &i32) -> Ordering {
//!         stored.cmp(probe)
//!     }
//! }
//!
//! let mut map = ChainMap::with_ops(Descending);
//! map.put(&1, &"one".to_string()).unwrap();
//! map.put(&3, &"three".to_string()).unwrap();
//!
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![3, 1]);
//! ```
//!
//! ## Cursor iteration
//!
//! ```rust
//! use chainmap::sorted::ChainMap;
//!
//! let mut map: ChainMap<i32, &str> = ChainMap::new();
//! map.put(&2, &"two").unwrap();
//! map.put(&1, &"one").unwrap();
//!
//! assert_eq!(map.first_key(), Some(&1));
//! assert_eq!(map.next_key(), Some(&2));
//! assert_eq!(map.next_key(), None);
//!
//! // Any structural mutation invalidates the cursor
//! assert_eq!(map.first_key(), Some(&1));
//! map.remove(&2).unwrap();
//! assert_eq!(map.next_key(), None);
//! ```

mod chain_map;
mod element;
mod error;

pub use chain_map::ChainMap;
pub use chain_map::ChainMapIterator;
pub use element::ElementOps;
pub use element::NaturalOrder;
pub use error::MapError;
pub use error::MapResult;
