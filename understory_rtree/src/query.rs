// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full traversal and rectangle search.
//!
//! Both walk the tree with an explicit stack, so result order follows the
//! stack discipline and is unspecified. Treat results as a set.

use alloc::vec;
use alloc::vec::Vec;

use crate::extract::Extractor;
use crate::node::{Children, Node};
use crate::rtree::RTree;
use crate::types::{Aabb2D, Scalar};

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Every item in the tree.
    pub fn all(&self) -> Vec<&I> {
        let mut out = Vec::new();
        collect_all(&self.root, &mut out);
        out
    }

    /// Every item whose rectangle intersects `query`. Touching counts.
    pub fn search(&self, query: Aabb2D<E::Scalar>) -> Vec<&I> {
        let mut out = Vec::new();
        if !query.intersects(&self.root.bbox()) {
            return out;
        }
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children() {
                Children::Leaf(items) => {
                    for item in items {
                        if query.intersects(&self.extractor.bbox(item)) {
                            out.push(item);
                        }
                    }
                }
                Children::Branch(nodes) => {
                    for child in nodes {
                        let bbox = child.bbox();
                        if !query.intersects(&bbox) {
                            continue;
                        }
                        if query.contains(&bbox) {
                            collect_all(child, &mut out);
                        } else {
                            stack.push(child);
                        }
                    }
                }
            }
        }
        out
    }

    /// Whether any item's rectangle intersects `query`.
    ///
    /// Stops at the first hit instead of collecting results.
    pub fn collides(&self, query: Aabb2D<E::Scalar>) -> bool {
        if !query.intersects(&self.root.bbox()) {
            return false;
        }
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children() {
                Children::Leaf(items) => {
                    if items
                        .iter()
                        .any(|item| query.intersects(&self.extractor.bbox(item)))
                    {
                        return true;
                    }
                }
                Children::Branch(nodes) => {
                    for child in nodes {
                        let bbox = child.bbox();
                        if !query.intersects(&bbox) {
                            continue;
                        }
                        // Non-empty subtrees are never stored, so containment is a hit.
                        if query.contains(&bbox) {
                            return true;
                        }
                        stack.push(child);
                    }
                }
            }
        }
        false
    }
}

/// Push every item below `node` onto `out`.
fn collect_all<'a, I, T: Scalar>(node: &'a Node<I, T>, out: &mut Vec<&'a I>) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node.children() {
            Children::Leaf(items) => out.extend(items),
            Children::Branch(nodes) => stack.extend(nodes),
        }
    }
}
