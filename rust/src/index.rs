//! The composite index: a DafTree plus an ExistenceIndex over its keys.
//!
//! Every mutation goes through both structures. The existence index records
//! how many tree entries carry each key, so `lookup_any` can be answered
//! without descending the tree and stays correct after partial removals.

use std::hash::{BuildHasher, Hash};

use crate::existence_index::ExistenceIndex;
use crate::iteration::{ChainIterator, ItemIterator, KeyIterator, ValueIterator};
use crate::types::{DafIndex, DafTree, Entry};

impl<K, V, S> DafIndex<K, V, S> {
    /// Total number of (key, value) pairs.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of distinct keys.
    pub fn unique_keys(&self) -> usize {
        self.tree.unique_keys()
    }

    /// Smallest key stored, `None` if empty.
    pub fn min_key(&self) -> Option<&K> {
        self.tree.min_key()
    }

    /// Largest key stored, `None` if empty.
    pub fn max_key(&self) -> Option<&K> {
        self.tree.max_key()
    }

    /// All (key, value) pairs in ascending key order; equal keys in insertion
    /// order.
    pub fn iter(&self) -> ItemIterator<'_, K, V> {
        self.tree.iter()
    }

    /// Every key in ascending order, once per stored value.
    pub fn keys(&self) -> KeyIterator<'_, K, V> {
        self.tree.keys()
    }

    /// Every value in key order.
    pub fn values(&self) -> ValueIterator<'_, K, V> {
        self.tree.values()
    }

    pub fn tree(&self) -> &DafTree<K, V> {
        &self.tree
    }

    pub fn existence(&self) -> &ExistenceIndex<K, S> {
        &self.existence
    }
}

impl<K: Ord + Hash, V: PartialEq, S: BuildHasher> DafIndex<K, V, S> {
    /// Insert a (key, value) pair.
    ///
    /// Returns `false` if the exact pair is already stored.
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Clone,
    {
        if !self.tree.insert(key.clone(), value) {
            return false;
        }
        self.existence.insert(key);
        true
    }

    /// Insert a validated entry.
    pub fn insert_entry(&mut self, entry: Entry<K, V>) -> bool
    where
        K: Clone,
    {
        let (key, value) = entry.into_parts();
        self.insert(key, value)
    }

    /// True if any pair with `key` is stored. Answered by the existence index.
    pub fn lookup_any(&self, key: &K) -> bool {
        self.existence.contains(key)
    }

    /// True if the exact pair is stored.
    pub fn lookup_exact(&self, key: &K, value: &V) -> bool {
        self.tree.lookup_exact(key, value)
    }

    /// Values stored under `key` in insertion order.
    pub fn get_all(&self, key: &K) -> ChainIterator<'_, K, V> {
        self.tree.get_all(key)
    }

    /// Remove the exact pair. Returns `false` if it was not stored.
    ///
    /// The key stays visible to `lookup_any` while other values remain.
    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        if !self.tree.remove(key, value) {
            return false;
        }
        self.existence.delete(key);
        debug_assert_eq!(self.existence.contains(key), self.tree.lookup_any(key));
        true
    }

    /// Remove every pair stored under `key`. Returns `false` if none were.
    pub fn remove_all(&mut self, key: &K) -> bool {
        let removed = self.tree.remove_all(key);
        self.existence.purge(key);
        removed
    }

    /// Remove every pair stored under `key`, returning the values in
    /// insertion order.
    pub fn take_all(&mut self, key: &K) -> Vec<V> {
        let values = self.tree.take_all(key);
        self.existence.purge(key);
        values
    }

    /// Drop every pair and shrink the existence index to its initial capacity.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.existence.clear();
    }
}

impl<K: Ord + Hash + Clone, V: PartialEq, S: BuildHasher> Extend<(K, V)> for DafIndex<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Hash + Clone, V: PartialEq, S: BuildHasher> Extend<Entry<K, V>>
    for DafIndex<K, V, S>
{
    fn extend<I: IntoIterator<Item = Entry<K, V>>>(&mut self, iter: I) {
        for entry in iter {
            self.insert_entry(entry);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a DafIndex<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = ItemIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
