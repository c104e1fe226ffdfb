//! Duplicate-aware binary search tree with a hash-table existence index.
//!
//! [`DafIndex`] stores (key, value) pairs where a key may carry many values.
//! Each distinct key occupies one BST position; further values for the same
//! key hang off it in an insertion-ordered duplicate chain. A separately
//! chained [`ExistenceIndex`] answers "is this key present" without a tree
//! descent and is kept in lockstep with the tree on every mutation.
//!
//! ```
//! use dafindex::DafIndex;
//!
//! let mut index = DafIndex::new(16).unwrap();
//! index.insert("apple", 3);
//! index.insert("apple", 5);
//! index.insert("pear", 1);
//!
//! assert_eq!(index.get_all(&"apple").collect::<Vec<_>>(), [&3, &5]);
//! assert!(index.remove_all(&"apple"));
//! assert!(!index.lookup_any(&"apple"));
//! ```

mod arena;
mod construction;
mod delete_operations;
mod error;
mod existence_index;
mod get_operations;
mod index;
mod insert_operations;
mod iteration;
mod types;
mod validation;

pub use arena::{ArenaStats, NodeArena};
pub use construction::validation as capacity;
pub use error::{DafError, DafResult, InitResult};
pub use existence_index::ExistenceIndex;
pub use iteration::{ChainIterator, ItemIterator, KeyIterator, ValueIterator};
pub use types::{
    DafIndex, DafNode, DafTree, Entry, Link, NodeId, DEFAULT_CAPACITY, MAX_LOAD_DENOMINATOR,
    MAX_LOAD_NUMERATOR, MIN_CAPACITY, NULL_NODE, RESIZE_FACTOR,
};
