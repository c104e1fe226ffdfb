//! Core types and data structures for the DAF index.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants shared by the tree, the existence index and the composite.

use rustc_hash::FxBuildHasher;

use crate::arena::NodeArena;
use crate::error::{DafError, DafResult};
use crate::existence_index::ExistenceIndex;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest bucket count the existence index accepts.
pub const MIN_CAPACITY: usize = 10;

/// Bucket count used by `Default`.
pub const DEFAULT_CAPACITY: usize = 16;

/// Growth multiplier applied to the bucket array on resize.
pub const RESIZE_FACTOR: usize = 2;

/// Maximum load factor, kept as a fraction so the check stays in integers.
pub const MAX_LOAD_NUMERATOR: usize = 2;
pub const MAX_LOAD_DENOMINATOR: usize = 3;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Sentinel for an empty link
pub const NULL_NODE: NodeId = u32::MAX;

/// The slot of its parent a node hangs from.
///
/// Duplicate-linked nodes are chain members: their `parent` is the previous
/// node of the same key, not a BST ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    Root,
    Left,
    Right,
    Duplicate,
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A single (key, value) entry in the tree.
#[derive(Debug, Clone)]
pub struct DafNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// Next node holding the same key.
    pub(crate) dup: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) link: Link,
}

impl<K, V> DafNode<K, V> {
    pub(crate) fn new(key: K, value: V, parent: NodeId, link: Link) -> Self {
        Self {
            key,
            value,
            left: NULL_NODE,
            right: NULL_NODE,
            dup: NULL_NODE,
            parent,
            link,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// True if this node occupies the BST position for its key.
    pub fn is_chain_head(&self) -> bool {
        self.link != Link::Duplicate
    }
}

/// Binary search tree keyed by `K` where every position heads a chain of
/// duplicate nodes carrying further values for the same key.
///
/// # Examples
///
/// ```
/// use dafindex::DafTree;
///
/// let mut tree = DafTree::new();
/// tree.insert(2, "b");
/// tree.insert(1, "a");
/// tree.insert(2, "c");
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.unique_keys(), 2);
/// assert_eq!(tree.get_all(&2).collect::<Vec<_>>(), [&"b", &"c"]);
/// ```
///
/// # Performance Characteristics
///
/// The tree is not self-balancing: descents are O(h) where h is the height,
/// O(log n) for random insertion order and O(n) for sorted input. Chain scans
/// are linear in the multiplicity of the key.
#[derive(Debug)]
pub struct DafTree<K, V> {
    pub(crate) root: NodeId,
    pub(crate) arena: NodeArena<DafNode<K, V>>,
    /// Total number of (key, value) entries.
    pub(crate) len: usize,
    /// Number of chain heads.
    pub(crate) unique_keys: usize,
}

/// Composite index: a [`DafTree`] kept in lockstep with an [`ExistenceIndex`]
/// over its keys.
///
/// # Examples
///
/// ```
/// use dafindex::DafIndex;
///
/// let mut index = DafIndex::new(16).unwrap();
/// index.insert(7, 1);
/// index.insert(7, 2);
/// index.insert(3, 1);
///
/// assert!(index.lookup_any(&7));
/// assert!(index.lookup_exact(&7, &2));
/// assert_eq!(index.keys().collect::<Vec<_>>(), [&3, &7, &7]);
///
/// index.remove(&7, &1);
/// assert!(index.lookup_any(&7));
/// ```
pub struct DafIndex<K, V, S = FxBuildHasher> {
    pub(crate) existence: ExistenceIndex<K, S>,
    pub(crate) tree: DafTree<K, V>,
}

// Manual impl: the default `FxBuildHasher` does not implement `Debug`.
impl<K: std::fmt::Debug, V: std::fmt::Debug, S> std::fmt::Debug for DafIndex<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DafIndex")
            .field("existence", &self.existence)
            .field("tree", &self.tree)
            .finish()
    }
}

/// A (key, value) pair whose halves are both known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Build an entry from possibly-absent parts.
    ///
    /// Returns `InvalidArgument` if either half is missing.
    pub fn try_new(key: Option<K>, value: Option<V>) -> DafResult<Self> {
        match (key, value) {
            (Some(key), Some(value)) => Ok(Self { key, value }),
            (None, _) => Err(DafError::invalid_argument("key", "must be present")),
            (_, None) => Err(DafError::invalid_argument("value", "must be present")),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> TryFrom<(Option<K>, Option<V>)> for Entry<K, V> {
    type Error = DafError;

    fn try_from((key, value): (Option<K>, Option<V>)) -> DafResult<Self> {
        Self::try_new(key, value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
