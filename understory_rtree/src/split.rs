// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow splitting in the R*-tree manner.
//!
//! The split axis is the one whose sorted distributions have the smallest
//! total margin. Along it, the split index minimizes the overlap of the two
//! halves, then their combined area. Both halves keep at least
//! [`RTree::min_entries`] children.

use alloc::vec;

use crate::extract::Extractor;
use crate::node::{Axis, Node};
use crate::rtree::RTree;
use crate::types::{ScalarAcc, area, intersection_area, margin};

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Split the node at depth `level` along `path` into two siblings.
    ///
    /// The new sibling joins the parent; splitting the root grows the tree.
    pub(crate) fn split(&mut self, path: &[usize], level: usize) {
        let extractor = &self.extractor;
        let min = self.min_entries;
        let node = self.root.descendant_mut(&path[..level]);
        let total = node.len();

        choose_split_axis(node, extractor, min, total);
        let at = choose_split_index(node, extractor, min, total);

        let mut sibling = node.split_off(at);
        node.recalc_bbox(extractor);
        sibling.recalc_bbox(extractor);

        if level == 0 {
            self.split_root(sibling);
        } else {
            self.root
                .descendant_mut(&path[..level - 1])
                .nodes_mut()
                .expect("parents of split nodes are branches")
                .push(sibling);
        }
    }

    /// Put the current root and `sibling` under a new root one level higher.
    pub(crate) fn split_root(&mut self, sibling: Node<I, E::Scalar>) {
        let old = core::mem::take(&mut self.root);
        self.root = Node::branch(vec![old, sibling]);
        log::trace!("root split, tree height is now {}", self.root.height());
    }
}

/// Sort the children of `node` along the axis with the smaller margin sum.
///
/// X is tried first, then Y; the children are sorted back to X only when X
/// is strictly better.
fn choose_split_axis<I, E>(
    node: &mut Node<I, E::Scalar>,
    extractor: &E,
    min: usize,
    total: usize,
) where
    E: Extractor<I>,
{
    let x_margin = all_dist_margin(node, extractor, min, total, Axis::X);
    let y_margin = all_dist_margin(node, extractor, min, total, Axis::Y);
    if x_margin < y_margin {
        node.sort_children(extractor, Axis::X);
    }
}

/// Sort by `axis` and sum the margins of every left and right distribution
/// with at least `min` children on each side.
fn all_dist_margin<I, E>(
    node: &mut Node<I, E::Scalar>,
    extractor: &E,
    min: usize,
    total: usize,
    axis: Axis,
) -> ScalarAcc<E::Scalar>
where
    E: Extractor<I>,
{
    node.sort_children(extractor, axis);

    let mut left = node.dist_bbox(extractor, 0, min);
    let mut right = node.dist_bbox(extractor, total - min, total);
    let mut sum = margin(&left) + margin(&right);

    for i in min..total - min {
        left.extend(&node.child_bbox(extractor, i));
        sum = sum + margin(&left);
    }
    for i in (min..total - min).rev() {
        right.extend(&node.child_bbox(extractor, i));
        sum = sum + margin(&right);
    }
    sum
}

/// Index of the first child of the right half.
///
/// Minimum overlap wins; equal overlap falls back to the smaller total area.
fn choose_split_index<I, E>(
    node: &Node<I, E::Scalar>,
    extractor: &E,
    min: usize,
    total: usize,
) -> usize
where
    E: Extractor<I>,
{
    // (index, least overlap, least area seen alongside it)
    let mut best: Option<(usize, ScalarAcc<E::Scalar>, ScalarAcc<E::Scalar>)> = None;
    for i in min..=total - min {
        let left = node.dist_bbox(extractor, 0, i);
        let right = node.dist_bbox(extractor, i, total);
        let overlap = intersection_area(&left, &right);
        let combined = area(&left) + area(&right);
        best = match best {
            None => Some((i, overlap, combined)),
            Some((_, min_overlap, min_area)) if overlap < min_overlap => {
                let min_area = if combined < min_area {
                    combined
                } else {
                    min_area
                };
                Some((i, overlap, min_area))
            }
            Some((_, min_overlap, min_area)) if overlap == min_overlap && combined < min_area => {
                Some((i, min_overlap, combined))
            }
            keep => keep,
        };
    }
    best.map_or(total - min, |(i, _, _)| i)
}
