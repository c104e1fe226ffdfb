//! INSERT operations for DafTree.
//!
//! New entries either become a leaf of the BST (first entry for a key) or are
//! appended to the end of an existing key's duplicate chain.

use std::cmp::Ordering;

use crate::types::{DafNode, DafTree, Link, NodeId, NULL_NODE};

impl<K: Ord, V: PartialEq> DafTree<K, V> {
    /// Insert a (key, value) pair.
    ///
    /// Returns `false` and leaves the tree untouched if the exact pair is
    /// already stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafTree;
    ///
    /// let mut tree = DafTree::new();
    /// assert!(tree.insert(1, "one"));
    /// assert!(tree.insert(1, "uno"));
    /// assert!(!tree.insert(1, "one"));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.root == NULL_NODE {
            self.root = self
                .arena
                .allocate(DafNode::new(key, value, NULL_NODE, Link::Root));
            self.len += 1;
            self.unique_keys += 1;
            return true;
        }

        let mut current = self.root;
        loop {
            let node = &self.arena[current];
            match key.cmp(&node.key) {
                Ordering::Less if node.left == NULL_NODE => {
                    self.attach(current, Link::Left, key, value);
                    self.unique_keys += 1;
                    return true;
                }
                Ordering::Less => current = node.left,
                Ordering::Greater if node.right == NULL_NODE => {
                    self.attach(current, Link::Right, key, value);
                    self.unique_keys += 1;
                    return true;
                }
                Ordering::Greater => current = node.right,
                Ordering::Equal => return self.append_to_chain(current, key, value),
            }
        }
    }

    /// Walk the chain starting at `head` and append unless `value` is present.
    fn append_to_chain(&mut self, head: NodeId, key: K, value: V) -> bool {
        let mut current = head;
        loop {
            let node = &self.arena[current];
            if node.value == value {
                return false;
            }
            if node.dup == NULL_NODE {
                self.attach(current, Link::Duplicate, key, value);
                return true;
            }
            current = node.dup;
        }
    }

    /// Allocate a detached node and hang it from `parent`'s `link` slot.
    fn attach(&mut self, parent: NodeId, link: Link, key: K, value: V) -> NodeId {
        let id = self.arena.allocate(DafNode::new(key, value, parent, link));
        self.set_child(parent, link, id);
        self.len += 1;
        id
    }
}

impl<K, V> DafTree<K, V> {
    /// Point `parent`'s `link` slot (or the root) at `child`, without
    /// touching `child`'s own back-reference.
    pub(crate) fn set_child(&mut self, parent: NodeId, link: Link, child: NodeId) {
        match link {
            Link::Root => self.root = child,
            Link::Left => self.arena[parent].left = child,
            Link::Right => self.arena[parent].right = child,
            Link::Duplicate => self.arena[parent].dup = child,
        }
    }
}
