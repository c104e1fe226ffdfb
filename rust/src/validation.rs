//! Validation and debugging utilities for DafTree and DafIndex.
//!
//! This module walks the whole structure and reports the first broken
//! invariant it finds: BST ordering, chain shape, parent back-references and
//! tags, counters, arena accounting, and for the composite the agreement
//! between the existence index and the tree.

use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use crate::error::{DafError, TreeResult};
use crate::types::{DafIndex, DafNode, DafTree, Link, NodeId, NULL_NODE};

// ============================================================================
// TREE VALIDATION
// ============================================================================

impl<K: Ord + Debug, V> DafTree<K, V> {
    /// Check if the tree maintains its invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        let (nodes, heads) = self.check_structure()?;

        if nodes != self.len {
            return Err(DafError::corrupted_tree(
                "Entry count",
                &format!("{} reachable nodes but len is {}", nodes, self.len),
            ));
        }
        if heads != self.unique_keys {
            return Err(DafError::corrupted_tree(
                "Key count",
                &format!("{} chain heads but unique_keys is {}", heads, self.unique_keys),
            ));
        }
        if nodes != self.arena.len() {
            return Err(DafError::corrupted_tree(
                "Arena",
                &format!("{} in tree vs {} in arena", nodes, self.arena.len()),
            ));
        }

        self.check_iteration_order()
    }

    /// Walk every chain head with its key bounds; returns (nodes, heads).
    fn check_structure(&self) -> TreeResult<(usize, usize)> {
        if self.root == NULL_NODE {
            return Ok((0, 0));
        }
        let root = self.node_checked(self.root)?;
        if root.link != Link::Root || root.parent != NULL_NODE {
            return Err(DafError::corrupted_tree(
                "Root",
                &format!(
                    "root {} is tagged {:?} with parent {}",
                    self.root, root.link, root.parent
                ),
            ));
        }

        let mut nodes = 0;
        let mut heads = 0;
        let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> = vec![(self.root, None, None)];

        while let Some((id, lower, upper)) = stack.pop() {
            let node = self.node_checked(id)?;
            heads += 1;

            let below = lower.is_some_and(|min| node.key <= *min);
            let above = upper.is_some_and(|max| node.key >= *max);
            if below || above {
                return Err(DafError::corrupted_tree(
                    "BST order",
                    &format!("key {:?} at node {} is outside its subtree bounds", node.key, id),
                ));
            }

            nodes += self.check_chain(id)?;

            for (child, link) in [(node.left, Link::Left), (node.right, Link::Right)] {
                if child == NULL_NODE {
                    continue;
                }
                self.check_back_reference(child, id, link)?;
                if link == Link::Left {
                    stack.push((child, lower, Some(&node.key)));
                } else {
                    stack.push((child, Some(&node.key), upper));
                }
            }
        }

        Ok((nodes, heads))
    }

    /// Check the duplicate chain hanging from `head`; returns its length.
    fn check_chain(&self, head: NodeId) -> TreeResult<usize> {
        let key = &self.node_checked(head)?.key;
        let mut length = 1;
        let mut previous = head;
        let mut current = self.arena[head].dup;

        while current != NULL_NODE {
            self.check_back_reference(current, previous, Link::Duplicate)?;
            let node = &self.arena[current];
            if node.key != *key {
                return Err(DafError::corrupted_tree(
                    "Chain",
                    &format!("node {} holds {:?} in the chain of {:?}", current, node.key, key),
                ));
            }
            if node.left != NULL_NODE || node.right != NULL_NODE {
                return Err(DafError::corrupted_tree(
                    "Chain",
                    &format!("duplicate node {} owns a subtree", current),
                ));
            }
            length += 1;
            previous = current;
            current = node.dup;
        }
        Ok(length)
    }

    fn check_back_reference(&self, child: NodeId, parent: NodeId, link: Link) -> TreeResult<()> {
        let node = self.node_checked(child)?;
        if node.parent != parent || node.link != link {
            return Err(DafError::corrupted_tree(
                "Parent link",
                &format!(
                    "node {} reached as {:?} of {} but records {:?} of {}",
                    child, link, parent, node.link, node.parent
                ),
            ));
        }
        Ok(())
    }

    fn check_iteration_order(&self) -> TreeResult<()> {
        let keys: Vec<&K> = self.keys().collect();
        if let Some(i) = (1..keys.len()).find(|&i| keys[i - 1] > keys[i]) {
            return Err(DafError::corrupted_tree(
                "Traversal",
                &format!("iterator returned unsorted keys at index {}", i),
            ));
        }
        if keys.len() != self.len {
            return Err(DafError::corrupted_tree(
                "Traversal",
                &format!("iterator returned {} keys but tree has {} entries", keys.len(), self.len),
            ));
        }
        Ok(())
    }

    fn node_checked(&self, id: NodeId) -> TreeResult<&DafNode<K, V>> {
        self.arena
            .get(id)
            .ok_or_else(|| DafError::corrupted_tree("Arena", &format!("dangling node id {}", id)))
    }
}

// ============================================================================
// DEBUGGING UTILITIES
// ============================================================================

impl<K: Debug, V: Debug> DafTree<K, V> {
    /// Render the tree shape, one node per line, chains indented under their
    /// head (for debugging).
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, "root", &mut out);
        out
    }

    /// Prints the tree shape for debugging.
    pub fn print_tree(&self) {
        print!("{}", self.render());
    }

    fn render_node(&self, id: NodeId, depth: usize, label: &str, out: &mut String) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        out.push_str(&format!("{}{} {:?} => {:?}", indent, label, node.key, node.value));

        let mut dup = node.dup;
        while let Some(member) = self.arena.get(dup) {
            out.push_str(&format!(", {:?}", member.value));
            dup = member.dup;
        }
        out.push('\n');

        self.render_node(node.left, depth + 1, "L", out);
        self.render_node(node.right, depth + 1, "R", out);
    }
}

// ============================================================================
// COMPOSITE VALIDATION
// ============================================================================

impl<K: Ord + Hash + Debug, V, S: BuildHasher> DafIndex<K, V, S> {
    /// Check if the index maintains its invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check tree invariants plus existence-index/tree agreement.
    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        self.tree.check_invariants_detailed()?;

        if self.existence.len() != self.tree.unique_keys() {
            return Err(DafError::corrupted_tree(
                "Existence index",
                &format!(
                    "{} keys in existence index vs {} in tree",
                    self.existence.len(),
                    self.tree.unique_keys()
                ),
            ));
        }

        for key in self.existence.keys() {
            let in_tree = self.tree.count(key);
            let recorded = self.existence.multiplicity(key);
            if in_tree != recorded {
                return Err(DafError::corrupted_tree(
                    "Existence index",
                    &format!("key {:?} recorded {} times but stored {} times", key, recorded, in_tree),
                ));
            }
        }
        Ok(())
    }
}
