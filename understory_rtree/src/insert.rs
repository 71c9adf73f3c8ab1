// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-entry insertion: least-enlargement descent, overflow propagation and
//! bounding box repair along the insertion path.

use alloc::vec::Vec;

use crate::extract::Extractor;
use crate::node::{Children, Node};
use crate::rtree::RTree;
use crate::types::{Aabb2D, Scalar, ScalarAcc, area, enlarged_area};

/// Something placed into the tree: an item into a leaf, or a prebuilt subtree
/// into a branch.
pub(crate) enum Entry<I, T> {
    Item(I),
    Node(Node<I, T>),
}

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Insert one item.
    pub fn insert(&mut self, item: I) {
        let bbox = self.extractor.bbox(&item);
        let level = self.root.height() - 1;
        self.insert_entry(Entry::Item(item), bbox, level);
    }

    /// Place `entry` into the node at depth `level` best suited for `bbox`,
    /// splitting overflowing nodes on the way back up.
    pub(crate) fn insert_entry(
        &mut self,
        entry: Entry<I, E::Scalar>,
        bbox: Aabb2D<E::Scalar>,
        level: usize,
    ) {
        let mut path = Vec::new();
        choose_subtree(&self.root, &bbox, level, &mut path);

        let node = self.root.descendant_mut(&path);
        match entry {
            Entry::Item(item) => node
                .items_mut()
                .expect("items are placed into leaves")
                .push(item),
            Entry::Node(child) => node
                .nodes_mut()
                .expect("subtrees are placed into branches")
                .push(child),
        }
        node.extend_bbox(&bbox);

        let mut level = path.len();
        loop {
            if self.root.descendant(&path[..level]).len() <= self.max_entries {
                break;
            }
            self.split(&path, level);
            if level == 0 {
                // The old root now sits under a new one whose bbox is already tight.
                return;
            }
            level -= 1;
        }

        for depth in (0..=level).rev() {
            self.root.descendant_mut(&path[..depth]).extend_bbox(&bbox);
        }
    }
}

/// Descend from `root` towards depth `level`, recording the child index taken
/// at each step in `path`.
///
/// At each branch the child needing the least area enlargement to cover `bbox`
/// wins; ties go to the child with the smaller area. Stops early at a leaf.
pub(crate) fn choose_subtree<I, T: Scalar>(
    root: &Node<I, T>,
    bbox: &Aabb2D<T>,
    level: usize,
    path: &mut Vec<usize>,
) {
    let mut node = root;
    loop {
        let Children::Branch(nodes) = node.children() else {
            break;
        };
        if path.len() == level {
            break;
        }

        // (index, least enlargement, least area seen alongside it)
        let mut best: Option<(usize, ScalarAcc<T>, ScalarAcc<T>)> = None;
        for (i, child) in nodes.iter().enumerate() {
            let child_bbox = child.bbox();
            let child_area = area(&child_bbox);
            let enlargement = enlarged_area(bbox, &child_bbox) - child_area;
            best = match best {
                None => Some((i, enlargement, child_area)),
                Some((_, min_enlargement, min_area)) if enlargement < min_enlargement => {
                    let min_area = if child_area < min_area {
                        child_area
                    } else {
                        min_area
                    };
                    Some((i, enlargement, min_area))
                }
                Some((_, min_enlargement, min_area))
                    if enlargement == min_enlargement && child_area < min_area =>
                {
                    Some((i, min_enlargement, child_area))
                }
                keep => keep,
            };
        }

        let (i, _, _) = best.expect("branches are never empty");
        path.push(i);
        node = &nodes[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ByEnvelope;
    use alloc::vec;

    fn leaf(items: Vec<[f64; 4]>) -> Node<[f64; 4], f64> {
        Node::leaf(items, &ByEnvelope)
    }

    #[test]
    fn choose_subtree_prefers_least_enlargement() {
        let root = Node::branch(vec![
            leaf(vec![[0.0, 0.0, 10.0, 10.0]]),
            leaf(vec![[20.0, 0.0, 30.0, 10.0]]),
        ]);
        let mut path = Vec::new();
        choose_subtree(&root, &Aabb2D::new(25.0, 5.0, 26.0, 6.0), 1, &mut path);
        assert_eq!(path, vec![1]);
    }

    #[test]
    fn choose_subtree_breaks_ties_by_area() {
        // Both children already contain the point; the smaller one wins.
        let root = Node::branch(vec![
            leaf(vec![[0.0, 0.0, 10.0, 10.0]]),
            leaf(vec![[4.0, 4.0, 6.0, 6.0]]),
        ]);
        let mut path = Vec::new();
        choose_subtree(&root, &Aabb2D::from_point(5.0, 5.0), 1, &mut path);
        assert_eq!(path, vec![1]);
    }

    #[test]
    fn choose_subtree_stops_at_target_level() {
        let inner = Node::branch(vec![leaf(vec![[0.0, 0.0, 1.0, 1.0]])]);
        let root = Node::branch(vec![inner]);
        let mut path = Vec::new();
        choose_subtree(&root, &Aabb2D::from_point(0.5, 0.5), 1, &mut path);
        assert_eq!(path, vec![0]);
        path.clear();
        choose_subtree(&root, &Aabb2D::from_point(0.5, 0.5), 5, &mut path);
        assert_eq!(path, vec![0, 0]);
    }

    #[test]
    fn insert_grows_height_and_keeps_invariants() {
        let mut t = RTree::new();
        for i in 0..9_i64 {
            t.insert([i, i, i, i]);
        }
        assert_eq!(t.height(), 1);
        t.insert([9, 9, 9, 9]);
        assert_eq!(t.height(), 2);
        assert_eq!(t.raw().len(), 2);
        for i in 10..500_i64 {
            t.insert([i % 37, i / 37, i % 37 + 1, i / 37 + 1]);
            if i % 50 == 0 {
                assert_eq!(t.validate(), Ok(()));
            }
        }
        assert_eq!(t.validate(), Ok(()));
        assert_eq!(t.len(), 500);
        assert!(t.is_min_filled(), "insert-only trees keep the minimum fill");
    }

    #[test]
    fn insert_updates_root_bbox() {
        let mut t = RTree::new();
        t.insert(Aabb2D::new(0.0, 0.0, 1.0, 1.0));
        t.insert(Aabb2D::new(-3.0, 2.0, -2.0, 8.0));
        assert_eq!(t.bbox(), Aabb2D::new(-3.0, 0.0, 1.0, 8.0));
    }
}
