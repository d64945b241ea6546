//! Hash collections used for key diffing.
//!
//! Fx hashing is the default; the `std-hash` feature switches back to the
//! standard library's randomized hasher.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashSet;

    pub type BuildHasher = std::collections::hash_map::RandomState;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxBuildHasher as BuildHasher, FxHashSet as HashSet};
}

/// Insertion-ordered map keyed by card identity.
pub type KeyedMap<K, V> = indexmap::IndexMap<K, V, map::BuildHasher>;
