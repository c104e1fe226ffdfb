//! Iterator implementations for DafTree.
//!
//! In-order traversal uses an explicit stack of node ids. Equal keys come out
//! consecutively in chain order because a popped node's duplicate successor is
//! pushed before any right subtree is considered.

use crate::types::{DafTree, Link, NodeId, NULL_NODE};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over (key, value) pairs in ascending key order.
pub struct ItemIterator<'a, K, V> {
    tree: &'a DafTree<K, V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

/// Iterator over keys, repeated once per stored value.
pub struct KeyIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

/// Iterator over values in key order.
pub struct ValueIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

/// Iterator over the values of a single key's duplicate chain.
pub struct ChainIterator<'a, K, V> {
    tree: &'a DafTree<K, V>,
    current: NodeId,
}

// ============================================================================
// DAFTREE ITERATOR METHODS
// ============================================================================

impl<K, V> DafTree<K, V> {
    /// Returns an iterator over all (key, value) pairs in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafTree;
    ///
    /// let mut tree = DafTree::new();
    /// tree.insert(2, 'x');
    /// tree.insert(1, 'a');
    /// tree.insert(2, 'y');
    ///
    /// let items: Vec<_> = tree.iter().collect();
    /// assert_eq!(items, [(&1, &'a'), (&2, &'x'), (&2, &'y')]);
    /// ```
    pub fn iter(&self) -> ItemIterator<'_, K, V> {
        ItemIterator::new(self)
    }

    /// Returns every key in ascending order, once per stored value.
    pub fn keys(&self) -> KeyIterator<'_, K, V> {
        KeyIterator {
            items: ItemIterator::new(self),
        }
    }

    /// Returns every value in key order.
    pub fn values(&self) -> ValueIterator<'_, K, V> {
        ValueIterator {
            items: ItemIterator::new(self),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a DafTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = ItemIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// ITEMITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K, V> ItemIterator<'a, K, V> {
    pub fn new(tree: &'a DafTree<K, V>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len,
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, from: NodeId) {
        let mut current = from;
        while current != NULL_NODE {
            self.stack.push(current);
            current = self.tree.arena[current].left;
        }
    }

    /// Climb from a chain member to the head of its chain.
    fn chain_head(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while self.tree.arena[current].link == Link::Duplicate {
            current = self.tree.arena[current].parent;
        }
        current
    }
}

impl<'a, K, V> Iterator for ItemIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.arena[id];

        if node.dup != NULL_NODE {
            self.stack.push(node.dup);
        } else {
            // Chain exhausted: the head's right subtree is next.
            let head = self.chain_head(id);
            self.push_left_spine(tree.arena[head].right);
        }

        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for ItemIterator<'_, K, V> {}

// ============================================================================
// KEYITERATOR / VALUEITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K, V> Iterator for KeyIterator<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V> Iterator for ValueIterator<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

// ============================================================================
// CHAINITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K, V> ChainIterator<'a, K, V> {
    /// Iterate the chain starting at `head` (NULL_NODE yields nothing).
    pub(crate) fn new(tree: &'a DafTree<K, V>, head: NodeId) -> Self {
        Self {
            tree,
            current: head,
        }
    }
}

impl<'a, K, V> Iterator for ChainIterator<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.arena.get(self.current)?;
        self.current = node.dup;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree_iterates_nothing() {
        let tree = DafTree::<i32, i32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn test_duplicates_of_inner_node_precede_right_subtree() {
        let mut tree = DafTree::new();
        for (key, value) in [(4, 1), (2, 1), (6, 1), (2, 2), (1, 1), (3, 1), (2, 3), (4, 2)] {
            tree.insert(key, value);
        }

        let items: Vec<(i32, i32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            items,
            vec![(1, 1), (2, 1), (2, 2), (2, 3), (3, 1), (4, 1), (4, 2), (6, 1)]
        );
    }

    #[test]
    fn test_keys_repeat_per_value() {
        let mut tree = DafTree::new();
        for (key, value) in [(2, 'a'), (1, 'b'), (2, 'c')] {
            tree.insert(key, value);
        }
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 2]);
        assert_eq!(tree.values().copied().collect::<Vec<_>>(), vec!['b', 'a', 'c']);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut tree = DafTree::new();
        for key in [5, 3, 7] {
            tree.insert(key, ());
        }
        let first: Vec<_> = tree.keys().collect();
        let second: Vec<_> = tree.keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_hint_is_exact() {
        let mut tree = DafTree::new();
        for (key, value) in [(1, 1), (1, 2), (2, 1)] {
            tree.insert(key, value);
        }
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_into_iterator_for_reference() {
        let mut tree = DafTree::new();
        tree.insert(1, 10);
        let mut total = 0;
        for (_, value) in &tree {
            total += value;
        }
        assert_eq!(total, 10);
    }
}
