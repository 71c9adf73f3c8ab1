// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item removal.
//!
//! The search for the item only descends into nodes whose bounding box
//! contains the item's rectangle. After removal, emptied nodes are dropped
//! bottom-up and the bounding boxes along the path are recomputed. Underfull
//! nodes are kept as they are; nothing is reinserted.

use alloc::vec::Vec;

use crate::extract::Extractor;
use crate::node::Node;
use crate::rtree::RTree;
use crate::types::{Aabb2D, Scalar};

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Remove one item equal to `item`. Returns whether anything was removed.
    ///
    /// Only the first match found is removed, even if the tree holds duplicates.
    pub fn remove(&mut self, item: &I) -> bool
    where
        I: PartialEq,
    {
        self.remove_by(item, |a, b| a == b)
    }

    /// Remove one item for which `eq(item, stored)` holds.
    ///
    /// The search is guided by `item`'s rectangle, so a stored item is only
    /// found if its rectangle lies within the same nodes; with an extractor that
    /// is consistent with `eq` this always holds.
    pub fn remove_by<F>(&mut self, item: &I, eq: F) -> bool
    where
        F: Fn(&I, &I) -> bool,
    {
        let bbox = self.extractor.bbox(item);
        let Some((trail, pos)) = locate(&self.root, &bbox, |stored| eq(item, stored)) else {
            return false;
        };

        self.root
            .descendant_mut(&trail)
            .items_mut()
            .expect("located items sit in leaves")
            .remove(pos);
        self.condense(&trail);
        true
    }

    /// Drop emptied nodes along `trail` and tighten the rest, deepest first.
    fn condense(&mut self, trail: &[usize]) {
        for depth in (0..=trail.len()).rev() {
            let node = self.root.descendant_mut(&trail[..depth]);
            if !node.is_empty() {
                node.recalc_bbox(&self.extractor);
            } else if depth > 0 {
                self.root
                    .descendant_mut(&trail[..depth - 1])
                    .nodes_mut()
                    .expect("ancestors are branches")
                    .remove(trail[depth - 1]);
            } else {
                self.clear();
            }
        }
    }
}

/// Depth-first search for a leaf holding an item accepted by `matches`.
///
/// Returns the child indices leading to that leaf and the item's position in
/// it. Backtracks with an explicit stack of `(branch, child being visited)`.
fn locate<I, T, F>(
    root: &Node<I, T>,
    bbox: &Aabb2D<T>,
    matches: F,
) -> Option<(Vec<usize>, usize)>
where
    T: Scalar,
    F: Fn(&I) -> bool,
{
    let mut path: Vec<(&Node<I, T>, usize)> = Vec::new();
    let mut next = Some(root);
    let mut going_up = false;

    loop {
        let node = match next {
            Some(node) => node,
            None => {
                let (branch, _) = path.pop()?;
                going_up = true;
                branch
            }
        };

        if let Some(items) = node.items()
            && let Some(pos) = items.iter().position(&matches)
        {
            let trail = path.iter().map(|&(_, i)| i).collect();
            return Some((trail, pos));
        }

        if !going_up && !node.is_leaf() && node.bbox().contains(bbox) {
            path.push((node, 0));
            next = node.nodes().and_then(<[_]>::first);
        } else if let Some(&mut (parent, ref mut i)) = path.last_mut() {
            *i += 1;
            next = parent.nodes().and_then(|nodes| nodes.get(*i));
            going_up = false;
        } else {
            next = None;
        }
    }
}
