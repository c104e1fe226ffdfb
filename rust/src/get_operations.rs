//! GET operations for DafTree.
//!
//! This module contains the read-only operations of the tree: key and pair
//! lookup, per-key value retrieval, extremal keys and size accessors.

use std::cmp::Ordering;

use crate::arena::ArenaStats;
use crate::iteration::ChainIterator;
use crate::types::{DafTree, NodeId, NULL_NODE};

impl<K, V> DafTree<K, V> {
    // ============================================================================
    // SIZE ACCESSORS
    // ============================================================================

    /// Total number of (key, value) entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct keys.
    pub fn unique_keys(&self) -> usize {
        self.unique_keys
    }

    /// Statistics for the node arena.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    // ============================================================================
    // EXTREMAL KEYS
    // ============================================================================

    /// Smallest key stored, `None` if the tree is empty.
    pub fn min_key(&self) -> Option<&K> {
        self.arena
            .get(self.leftmost(self.root))
            .map(|node| &node.key)
    }

    /// Largest key stored, `None` if the tree is empty.
    pub fn max_key(&self) -> Option<&K> {
        let mut current = self.root;
        while current != NULL_NODE && self.arena[current].right != NULL_NODE {
            current = self.arena[current].right;
        }
        self.arena.get(current).map(|node| &node.key)
    }

    /// Leftmost node of the subtree rooted at `id` (NULL_NODE stays NULL_NODE).
    pub(crate) fn leftmost(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while current != NULL_NODE && self.arena[current].left != NULL_NODE {
            current = self.arena[current].left;
        }
        current
    }
}

impl<K: Ord, V> DafTree<K, V> {
    /// True if any entry carries `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafTree;
    ///
    /// let mut tree = DafTree::new();
    /// tree.insert(1, "one");
    /// assert!(tree.lookup_any(&1));
    /// assert!(!tree.lookup_any(&2));
    /// ```
    pub fn lookup_any(&self, key: &K) -> bool {
        self.find_head(key) != NULL_NODE
    }

    /// Values stored under `key`, in insertion order. Empty if absent.
    pub fn get_all(&self, key: &K) -> ChainIterator<'_, K, V> {
        ChainIterator::new(self, self.find_head(key))
    }

    /// Number of values stored under `key`.
    pub fn count(&self, key: &K) -> usize {
        self.get_all(key).count()
    }

    /// BST descent to the chain head for `key`, NULL_NODE if absent.
    pub(crate) fn find_head(&self, key: &K) -> NodeId {
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.arena[current];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return current,
            };
        }
        NULL_NODE
    }
}

impl<K: Ord, V: PartialEq> DafTree<K, V> {
    /// True if the exact (key, value) pair is stored.
    ///
    /// Values are compared with `PartialEq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafTree;
    ///
    /// let mut tree = DafTree::new();
    /// tree.insert(7, 1);
    /// tree.insert(7, 2);
    /// assert!(tree.lookup_exact(&7, &2));
    /// assert!(!tree.lookup_exact(&7, &3));
    /// ```
    pub fn lookup_exact(&self, key: &K, value: &V) -> bool {
        self.find_node(key, value) != NULL_NODE
    }

    /// Node holding the exact pair, NULL_NODE if absent.
    pub(crate) fn find_node(&self, key: &K, value: &V) -> NodeId {
        let mut current = self.find_head(key);
        while current != NULL_NODE {
            let node = &self.arena[current];
            if node.value == *value {
                return current;
            }
            current = node.dup;
        }
        NULL_NODE
    }
}
