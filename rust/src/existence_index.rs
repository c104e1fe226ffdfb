//! Chained hash table answering "is any entry with this key stored".
//!
//! Each distinct key is stored once together with the number of tree entries
//! that carry it. A key is present while that count is non-zero, so removing
//! one of several values for a key never hides the others.

use std::hash::{BuildHasher, Hash};

use tracing::debug;

use crate::error::{DafError, InitResult};
use crate::types::{MAX_LOAD_DENOMINATOR, MAX_LOAD_NUMERATOR, MIN_CAPACITY, RESIZE_FACTOR};

/// Separately chained hash set of keys with per-key multiplicity.
#[derive(Clone)]
pub struct ExistenceIndex<K, S> {
    buckets: Vec<Vec<(K, usize)>>,
    /// Number of distinct keys stored.
    len: usize,
    /// Bucket count restored by `clear`.
    initial_capacity: usize,
    hasher: S,
}

// Manual impl: the default `FxBuildHasher` does not implement `Debug`.
impl<K: std::fmt::Debug, S> std::fmt::Debug for ExistenceIndex<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistenceIndex")
            .field("buckets", &self.buckets)
            .field("len", &self.len)
            .field("initial_capacity", &self.initial_capacity)
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq, S: BuildHasher + Default> ExistenceIndex<K, S> {
    /// Create an empty index with `capacity` buckets.
    ///
    /// Returns `InvalidConfiguration` if `capacity < MIN_CAPACITY`.
    pub fn new(capacity: usize) -> InitResult<Self> {
        Self::with_hasher(capacity, S::default())
    }
}

impl<K: Hash + Eq, S: BuildHasher> ExistenceIndex<K, S> {
    /// Create an empty index with `capacity` buckets and the given hasher.
    pub fn with_hasher(capacity: usize, hasher: S) -> InitResult<Self> {
        if capacity < MIN_CAPACITY {
            return Err(DafError::invalid_capacity(capacity, MIN_CAPACITY));
        }
        Ok(Self::with_hasher_unchecked(capacity, hasher))
    }

    /// Caller guarantees `capacity >= MIN_CAPACITY`.
    pub(crate) fn with_hasher_unchecked(capacity: usize, hasher: S) -> Self {
        debug_assert!(capacity >= MIN_CAPACITY);
        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            initial_capacity: capacity,
            hasher,
        }
    }

    /// Record one occurrence of `key`.
    ///
    /// Returns `true` if the key was not present before.
    pub fn insert(&mut self, key: K) -> bool {
        let slot = self.bucket_of(&key);
        if let Some((_, count)) = self.buckets[slot].iter_mut().find(|(k, _)| *k == key) {
            *count += 1;
            return false;
        }

        // Grow before adding so the load factor holds right after the insert.
        let mut slot = slot;
        if exceeds_max_load(self.len + 1, self.buckets.len()) {
            let mut new_capacity = self.buckets.len() * RESIZE_FACTOR;
            while exceeds_max_load(self.len + 1, new_capacity) {
                new_capacity *= RESIZE_FACTOR;
            }
            self.rehash(new_capacity);
            slot = self.bucket_of(&key);
        }

        self.buckets[slot].push((key, 1));
        self.len += 1;
        true
    }

    /// Drop one occurrence of `key`.
    ///
    /// Returns `true` if this removed the last occurrence. Absent keys are a
    /// no-op returning `false`.
    pub fn delete(&mut self, key: &K) -> bool {
        let slot = self.bucket_of(key);
        let bucket = &mut self.buckets[slot];
        let Some(pos) = bucket.iter().position(|(k, _)| k == key) else {
            return false;
        };

        if bucket[pos].1 > 1 {
            bucket[pos].1 -= 1;
            return false;
        }
        bucket.swap_remove(pos);
        self.len -= 1;
        true
    }

    /// Remove `key` regardless of its multiplicity.
    ///
    /// Returns the multiplicity it had, 0 if absent.
    pub fn purge(&mut self, key: &K) -> usize {
        let slot = self.bucket_of(key);
        let bucket = &mut self.buckets[slot];
        match bucket.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                let (_, count) = bucket.swap_remove(pos);
                self.len -= 1;
                count
            }
            None => 0,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.multiplicity(key) > 0
    }

    /// Number of recorded occurrences of `key`.
    pub fn multiplicity(&self, key: &K) -> usize {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, count)| *count)
    }

    /// Iterate over the distinct keys in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.iter().flatten().map(|(k, _)| k)
    }

    /// Drop every key and shrink back to the construction capacity.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.initial_capacity);
        self.len = 0;
    }

    fn bucket_of(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.buckets.len();
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for (key, count) in old.into_iter().flatten() {
            let slot = self.bucket_of(&key);
            self.buckets[slot].push((key, count));
        }
        debug!(
            old_capacity,
            new_capacity,
            keys = self.len,
            "existence index resized"
        );
    }
}

impl<K, S> ExistenceIndex<K, S> {
    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

fn empty_buckets<K>(capacity: usize) -> Vec<Vec<(K, usize)>> {
    (0..capacity).map(|_| Vec::new()).collect()
}

fn exceeds_max_load(count: usize, capacity: usize) -> bool {
    count * MAX_LOAD_DENOMINATOR > capacity * MAX_LOAD_NUMERATOR
}
