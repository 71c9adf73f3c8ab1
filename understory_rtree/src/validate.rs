// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural invariant checks.

use alloc::vec;

use crate::extract::Extractor;
use crate::node::{Children, Node};
use crate::rtree::RTree;

/// A broken structural invariant, located by the depth of the offending node
/// (the root is at depth 0).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// A node's stored bounding box differs from the union of its children.
    #[error("node at depth {depth} has a bounding box that is not the union of its children")]
    LooseBBox {
        /// Depth of the node.
        depth: usize,
    },
    /// A child's height is not exactly one less than its parent's.
    #[error("node at depth {depth} has height {found}, expected {expected}")]
    HeightMismatch {
        /// Depth of the child.
        depth: usize,
        /// Parent height minus one.
        expected: usize,
        /// Height stored in the child.
        found: usize,
    },
    /// A leaf whose height is not 1.
    #[error("leaf at depth {depth} has height {height}, expected 1")]
    LeafHeight {
        /// Depth of the leaf.
        depth: usize,
        /// Height stored in the leaf.
        height: usize,
    },
    /// A node with more children than the tree's capacity.
    #[error("node at depth {depth} has {len} children, more than the maximum of {max}")]
    Overflow {
        /// Depth of the node.
        depth: usize,
        /// Number of children.
        len: usize,
        /// Maximum number of children.
        max: usize,
    },
    /// A node without children. Only a root leaf may be empty.
    #[error("node at depth {depth} is empty")]
    EmptyNode {
        /// Depth of the node.
        depth: usize,
    },
}

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Check the structural invariants of the whole tree.
    ///
    /// Every bounding box must be exactly the union of its children's, all
    /// leaves must sit at height 1 with each branch one above its children, no
    /// node may exceed [`RTree::max_entries`] children, and only a root leaf
    /// may be empty. The minimum fill is not checked: removal may leave nodes
    /// underfull.
    pub fn validate(&self) -> Result<(), InvariantError> {
        self.validate_node(&self.root)
    }

    pub(crate) fn validate_node(&self, root: &Node<I, E::Scalar>) -> Result<(), InvariantError> {
        let mut stack = vec![(root, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            if node.len() > self.max_entries {
                return Err(InvariantError::Overflow {
                    depth,
                    len: node.len(),
                    max: self.max_entries,
                });
            }
            if node.is_empty() && (depth > 0 || !node.is_leaf()) {
                return Err(InvariantError::EmptyNode { depth });
            }
            let tight = node.dist_bbox(&self.extractor, 0, node.len());
            if tight != node.bbox() {
                return Err(InvariantError::LooseBBox { depth });
            }
            match node.children() {
                Children::Leaf(_) => {
                    if node.height() != 1 {
                        return Err(InvariantError::LeafHeight {
                            depth,
                            height: node.height(),
                        });
                    }
                }
                Children::Branch(nodes) => {
                    for child in nodes {
                        if child.height() + 1 != node.height() {
                            return Err(InvariantError::HeightMismatch {
                                depth: depth + 1,
                                expected: node.height() - 1,
                                found: child.height(),
                            });
                        }
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether every non-root node holds at least [`RTree::min_entries`] children.
    #[cfg(test)]
    pub(crate) fn is_min_filled(&self) -> bool {
        let mut stack = vec![(&self.root, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            if depth > 0 && node.len() < self.min_entries {
                return false;
            }
            if let Some(nodes) = node.nodes() {
                stack.extend(nodes.iter().map(|child| (child, depth + 1)));
            }
        }
        true
    }
}
