//! # chainmap
//!
//! An ordered key-value map backed by a sorted singly-linked chain, with
//! caller-controlled element copying, releasing, and ordering.
//!
//! ## Overview
//!
//! This library provides [`ChainMap`](sorted::ChainMap), a container that
//! keeps entries sorted by key and treats keys and values as opaque
//! elements: every copy, release, and comparison goes through a
//! caller-supplied [`ElementOps`](sorted::ElementOps) strategy. It includes:
//!
//! - **Sorted iteration**: entries are always visited in ascending key order
//! - **Opaque elements**: the map never inspects key or value contents
//! - **Strict ownership**: elements enter as deep copies and leave through
//!   the strategy's release operations, exactly once
//! - **Resumable cursor**: a `first_key`/`next_key` protocol that survives
//!   across calls and is invalidated by structural mutation
//!
//! Lookup, insertion, and removal are O(n) linear scans with sorted
//! early-termination; this is a deliberate simplicity trade-off, not an
//! accident of implementation.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` implementations for the map
//!
//! ## Example
//!
//! ```rust
//! use chainmap::prelude::*;
//!
//! let mut map: ChainMap<i32, String> = ChainMap::new();
//! map.put(&3, &"three".to_string()).unwrap();
//! map.put(&1, &"one".to_string()).unwrap();
//! map.put(&2, &"two".to_string()).unwrap();
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use chainmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::sorted::*;
}

pub mod sorted;
