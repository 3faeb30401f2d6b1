//! Error reporting for fallible map operations.
//!
//! Query operations signal absence with `Option`; mutating operations
//! return [`MapResult`]. Errors are plain values: the map never panics on
//! a fallible path, never logs, and never retries.

use std::error::Error;
use std::fmt;

/// An error produced by a fallible [`ChainMap`](super::ChainMap) operation.
///
/// There is deliberately no invalid-argument variant: an absent map, key,
/// or value cannot be expressed through this API, so the corresponding
/// failure mode of the callback-style interface has nothing to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapError {
    /// An element copy could not be produced.
    ///
    /// Raised when the strategy's `copy_key` or `copy_value` returns
    /// `None`. The map is left structurally unchanged: a failed insertion
    /// adds nothing, and a failed in-place update keeps the old value.
    AllocationFailed,

    /// The target key is not present in the chain.
    ///
    /// Raised by removal when the walk exhausts the chain or meets a
    /// strictly greater key first.
    KeyNotFound,
}

impl fmt::Display for MapError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed => formatter.write_str("element copy could not be allocated"),
            Self::KeyNotFound => formatter.write_str("key not present in the map"),
        }
    }
}

impl Error for MapError {}

/// Result alias for map operations.
///
/// Mutating operations default the success type to `()`.
pub type MapResult<T = ()> = Result<T, MapError>;
