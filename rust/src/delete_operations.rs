//! DELETE operations for DafTree.
//!
//! Removal has three shapes:
//!
//! - the node has a duplicate successor: the successor is promoted into the
//!   node's slot and adopts its left and right subtrees;
//! - the node has two BST children and no successor: it trades places with
//!   its in-order successor (whole node identities, not values) and is then
//!   removed from the successor's old position;
//! - otherwise its single child (or nothing) takes its slot.
//!
//! Swapping identities rather than values keeps every `NodeId` bound to the
//! entry it was allocated for.

use tracing::{debug, trace};

use crate::types::{DafNode, DafTree, Link, NodeId, NULL_NODE};

impl<K: Ord, V: PartialEq> DafTree<K, V> {
    /// Remove the exact (key, value) pair.
    ///
    /// Returns `false` if the pair is not stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dafindex::DafTree;
    ///
    /// let mut tree = DafTree::new();
    /// tree.insert(1, 'a');
    /// tree.insert(1, 'b');
    /// assert!(tree.remove(&1, &'a'));
    /// assert!(!tree.remove(&1, &'a'));
    /// assert_eq!(tree.get_all(&1).collect::<Vec<_>>(), [&'b']);
    /// ```
    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        self.take(key, value).is_some()
    }

    /// Remove the exact pair and hand back the stored key and value.
    pub fn take(&mut self, key: &K, value: &V) -> Option<(K, V)> {
        let target = self.find_node(key, value);
        self.detach_node(target).map(|node| (node.key, node.value))
    }
}

impl<K: Ord, V> DafTree<K, V> {
    /// Remove every entry stored under `key`.
    ///
    /// Returns `false` if the key is absent.
    pub fn remove_all(&mut self, key: &K) -> bool {
        let head = self.find_head(key);
        if head == NULL_NODE {
            return false;
        }

        let mut current = head;
        let mut removed = 0usize;
        while current != NULL_NODE {
            let next = self.arena[current].dup;
            self.detach_node(current);
            removed += 1;
            current = next;
        }
        debug!(removed, "removed key chain");
        true
    }

    /// Remove every entry stored under `key`, returning the values in
    /// insertion order.
    pub fn take_all(&mut self, key: &K) -> Vec<V> {
        let mut values = Vec::new();
        let mut current = self.find_head(key);
        while current != NULL_NODE {
            let next = self.arena[current].dup;
            if let Some(node) = self.detach_node(current) {
                values.push(node.value);
            }
            current = next;
        }
        values
    }
}

impl<K, V> DafTree<K, V> {
    /// Drop every entry.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NULL_NODE;
        self.len = 0;
        self.unique_keys = 0;
    }

    /// Unlink `target` from the tree, update the counters and free its slot.
    fn detach_node(&mut self, target: NodeId) -> Option<DafNode<K, V>> {
        let node = self.arena.get(target)?;
        // Only the last representative of a key takes the key with it.
        if node.dup == NULL_NODE && node.link != Link::Duplicate {
            self.unique_keys -= 1;
        }
        self.unlink(target);
        self.len -= 1;
        self.arena.deallocate(target)
    }

    fn unlink(&mut self, target: NodeId) {
        let node = &self.arena[target];
        let (left, right, dup) = (node.left, node.right, node.dup);

        if dup != NULL_NODE {
            // Chain members own no subtrees, so the successor's slots are free.
            let successor = &mut self.arena[dup];
            successor.left = left;
            successor.right = right;
            self.reparent(left, dup);
            self.reparent(right, dup);
            self.replace_in_parent(target, dup);
        } else if left != NULL_NODE && right != NULL_NODE {
            let successor = self.leftmost(right);
            trace!(node = target, successor, "swapping node with in-order successor");
            self.swap_positions(target, successor);
            // The successor had no left child, so neither does target now.
            self.unlink(target);
        } else {
            let child = if left != NULL_NODE { left } else { right };
            self.replace_in_parent(target, child);
        }
    }

    /// Put `new` (possibly NULL_NODE) into the slot `old` hangs from.
    fn replace_in_parent(&mut self, old: NodeId, new: NodeId) {
        let (parent, link) = {
            let node = &self.arena[old];
            (node.parent, node.link)
        };
        self.set_child(parent, link, new);
        if new != NULL_NODE {
            let node = &mut self.arena[new];
            node.parent = parent;
            node.link = link;
        }
    }

    fn reparent(&mut self, child: NodeId, parent: NodeId) {
        if child != NULL_NODE {
            self.arena[child].parent = parent;
        }
    }

    /// Exchange the BST positions of `a` and `b`.
    ///
    /// Parent links, tags and left/right children trade places; each node keeps
    /// its own duplicate chain. Handles `a` and `b` being parent and child.
    pub(crate) fn swap_positions(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let swap = |id: NodeId| {
            if id == a {
                b
            } else if id == b {
                a
            } else {
                id
            }
        };

        let (a_parent, a_link, a_left, a_right) = self.position_of(a);
        let (b_parent, b_link, b_left, b_right) = self.position_of(b);

        {
            let node = &mut self.arena[a];
            node.parent = swap(b_parent);
            node.link = b_link;
            node.left = swap(b_left);
            node.right = swap(b_right);
        }
        {
            let node = &mut self.arena[b];
            node.parent = swap(a_parent);
            node.link = a_link;
            node.left = swap(a_left);
            node.right = swap(a_right);
        }

        // Fix the neighbours; links between a and b were handled by `swap`.
        for (id, other) in [(a, b), (b, a)] {
            let (parent, link, left, right) = self.position_of(id);
            if parent != other {
                self.set_child(parent, link, id);
            }
            for child in [left, right] {
                if child != other {
                    self.reparent(child, id);
                }
            }
        }
    }

    fn position_of(&self, id: NodeId) -> (NodeId, Link, NodeId, NodeId) {
        let node = &self.arena[id];
        (node.parent, node.link, node.left, node.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(pairs: &[(i32, i32)]) -> DafTree<i32, i32> {
        let mut tree = DafTree::new();
        for &(key, value) in pairs {
            tree.insert(key, value);
        }
        tree
    }

    fn pairs(tree: &DafTree<i32, i32>) -> Vec<(i32, i32)> {
        tree.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_remove_missing_pair() {
        let mut tree = tree_of(&[(1, 1), (2, 1)]);
        assert!(!tree.remove(&1, &2));
        assert!(!tree.remove(&3, &1));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree = tree_of(&[(2, 0), (1, 0), (3, 0)]);
        assert!(tree.remove(&1, &0));
        assert_eq!(pairs(&tree), vec![(2, 0), (3, 0)]);
        assert_eq!(tree.unique_keys(), 2);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_remove_only_node() {
        let mut tree = tree_of(&[(1, 0)]);
        assert!(tree.remove(&1, &0));
        assert!(tree.is_empty());
        assert_eq!(tree.root, NULL_NODE);
        assert_eq!(tree.unique_keys(), 0);
    }

    #[test]
    fn test_remove_chain_head_promotes_successor() {
        let mut tree = tree_of(&[(5, 1), (3, 1), (8, 1), (5, 2), (5, 3)]);
        let old_root = tree.root;
        assert!(tree.remove(&5, &1));

        let root = &tree.arena[tree.root];
        assert_ne!(tree.root, old_root);
        assert_eq!((root.key, root.value), (5, 2));
        assert_eq!(root.link, Link::Root);
        assert_eq!(tree.arena[root.left].parent, tree.root);
        assert_eq!(tree.arena[root.right].parent, tree.root);
        assert_eq!(tree.unique_keys(), 3);
        assert_eq!(tree.get_all(&5).copied().collect::<Vec<_>>(), vec![2, 3]);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_remove_middle_of_chain() {
        let mut tree = tree_of(&[(5, 1), (5, 2), (5, 3)]);
        assert!(tree.remove(&5, &2));
        assert_eq!(tree.get_all(&5).copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(tree.unique_keys(), 1);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_remove_tail_of_chain() {
        let mut tree = tree_of(&[(5, 1), (5, 2)]);
        assert!(tree.remove(&5, &2));
        assert_eq!(tree.arena[tree.root].dup, NULL_NODE);
        assert_eq!(tree.unique_keys(), 1);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_remove_two_children_adjacent_successor() {
        // 8 is the right child of 5 and has no left subtree.
        let mut tree = tree_of(&[(5, 0), (3, 0), (8, 0), (9, 0)]);
        let successor = tree.arena[tree.root].right;
        assert!(tree.remove(&5, &0));

        assert_eq!(tree.root, successor);
        assert_eq!(pairs(&tree), vec![(3, 0), (8, 0), (9, 0)]);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_remove_two_children_deep_successor() {
        let mut tree = tree_of(&[(10, 0), (5, 0), (20, 0), (15, 0), (25, 0), (12, 0), (13, 0)]);
        assert!(tree.remove(&10, &0));

        assert_eq!(tree.arena[tree.root].key, 12);
        assert_eq!(
            pairs(&tree),
            vec![(5, 0), (12, 0), (13, 0), (15, 0), (20, 0), (25, 0)]
        );
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_successor_keeps_its_chain() {
        let mut tree = tree_of(&[(10, 0), (5, 0), (20, 0), (15, 0), (15, 1), (15, 2)]);
        let successor = tree.find_head(&15);
        assert!(tree.remove(&10, &0));

        assert_eq!(tree.root, successor);
        assert_eq!(tree.get_all(&15).copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tree.unique_keys(), 3);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_node_ids_follow_their_entries() {
        let mut tree = tree_of(&[(10, 0), (5, 0), (20, 0), (15, 0)]);
        let id_15 = tree.find_head(&15);
        let id_20 = tree.find_head(&20);
        tree.remove(&10, &0);

        assert_eq!(tree.arena[id_15].key, 15);
        assert_eq!(tree.arena[id_20].key, 20);
        assert_eq!(tree.arena[id_20].parent, id_15);
    }

    #[test]
    fn test_remove_all() {
        let mut tree = tree_of(&[(3, 1), (1, 1), (1, 2), (1, 3), (4, 1), (2, 1)]);
        assert!(tree.remove_all(&1));
        assert!(!tree.remove_all(&1));
        assert!(!tree.lookup_any(&1));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.unique_keys(), 3);
        assert_eq!(tree.arena.len(), 3);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_take_all_returns_values_in_order() {
        let mut tree = tree_of(&[(3, 1), (3, 2), (3, 3), (1, 1)]);
        assert_eq!(tree.take_all(&3), vec![1, 2, 3]);
        assert_eq!(tree.take_all(&3), Vec::<i32>::new());
        assert_eq!(pairs(&tree), vec![(1, 1)]);
    }

    #[test]
    fn test_take_returns_owned_pair() {
        let mut tree = DafTree::new();
        tree.insert("k".to_string(), vec![1, 2]);
        assert_eq!(
            tree.take(&"k".to_string(), &vec![1, 2]),
            Some(("k".to_string(), vec![1, 2]))
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_of(&[(1, 1), (2, 2)]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.unique_keys(), 0);
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.insert(1, 1));
    }
}
