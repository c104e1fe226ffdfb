//! Construction and initialization logic for DafTree and DafIndex.
//!
//! This module contains capacity validation, constructors and `Default`
//! implementations, plus bulk loading for the composite index.

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::arena::NodeArena;
use crate::error::{DafError, InitResult};
use crate::existence_index::ExistenceIndex;
use crate::types::{DafIndex, DafTree, DEFAULT_CAPACITY, MIN_CAPACITY, NULL_NODE};

const _: () = assert!(DEFAULT_CAPACITY >= MIN_CAPACITY);

impl<K, V> DafTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: NULL_NODE,
            arena: NodeArena::new(),
            len: 0,
            unique_keys: 0,
        }
    }

    /// Creates an empty tree with room for `capacity` entries before the
    /// node arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: NULL_NODE,
            arena: NodeArena::with_capacity(capacity),
            len: 0,
            unique_keys: 0,
        }
    }
}

impl<K, V> Default for DafTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Hash, V: PartialEq> DafIndex<K, V, FxBuildHasher> {
    /// Create an empty index whose existence index starts with `capacity`
    /// buckets.
    ///
    /// # Returns
    ///
    /// Returns `Ok(DafIndex)` if capacity is valid, `Err(DafError)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafIndex;
    ///
    /// let index = DafIndex::<i32, String>::new(16).unwrap();
    /// assert!(index.is_empty());
    /// assert!(DafIndex::<i32, String>::new(4).is_err());
    /// ```
    pub fn new(capacity: usize) -> InitResult<Self> {
        Self::with_hasher(capacity, FxBuildHasher::default())
    }

    /// Create an index preloaded with `pairs`. Repeated pairs are kept once.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafIndex;
    ///
    /// let index = DafIndex::from_pairs(10, [(1, 'a'), (1, 'b'), (1, 'a')]).unwrap();
    /// assert_eq!(index.len(), 2);
    /// ```
    pub fn from_pairs<I>(capacity: usize, pairs: I) -> InitResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Clone,
    {
        let mut index = Self::new(capacity)?;
        index.extend(pairs);
        Ok(index)
    }
}

impl<K: Ord + Hash, V: PartialEq, S: BuildHasher> DafIndex<K, V, S> {
    /// Create an empty index using `hasher` for the existence index.
    pub fn with_hasher(capacity: usize, hasher: S) -> InitResult<Self> {
        Ok(Self {
            existence: ExistenceIndex::with_hasher(capacity, hasher)?,
            tree: DafTree::new(),
        })
    }
}

impl<K: Ord + Hash, V: PartialEq> Default for DafIndex<K, V, FxBuildHasher> {
    /// Create an index with `DEFAULT_CAPACITY` buckets.
    fn default() -> Self {
        Self {
            existence: ExistenceIndex::with_hasher_unchecked(
                DEFAULT_CAPACITY,
                FxBuildHasher::default(),
            ),
            tree: DafTree::new(),
        }
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;
    use crate::types::{MAX_LOAD_DENOMINATOR, MAX_LOAD_NUMERATOR};

    /// Validate that a capacity is acceptable for the existence index.
    pub fn validate_capacity(capacity: usize) -> InitResult<()> {
        if capacity < MIN_CAPACITY {
            Err(DafError::invalid_capacity(capacity, MIN_CAPACITY))
        } else {
            Ok(())
        }
    }

    /// Smallest capacity that holds `expected_keys` distinct keys without
    /// resizing (always >= MIN_CAPACITY).
    pub fn recommended_capacity(expected_keys: usize) -> usize {
        let needed = (expected_keys * MAX_LOAD_DENOMINATOR).div_ceil(MAX_LOAD_NUMERATOR);
        needed.max(MIN_CAPACITY)
    }
}
