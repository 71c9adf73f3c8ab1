// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive node structure shared by every tree operation.
//!
//! Each node exclusively owns its children, so the structure is a strict tree.
//! [`RTree::raw`](crate::RTree::raw) exposes the root as-is and
//! [`RTree::load_raw`](crate::RTree::load_raw) takes one back.

use alloc::vec::Vec;

use crate::extract::Extractor;
use crate::types::{Aabb2D, Scalar, cmp_t, union_aabb};

/// A node of the tree: either a leaf holding items or a branch holding nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<I, T> {
    bbox: Aabb2D<T>,
    height: usize,
    children: Children<I, T>,
}

/// Children of a [`Node`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Children<I, T> {
    /// Items stored directly in a leaf.
    Leaf(Vec<I>),
    /// Subtrees of a branch, all of the same height.
    Branch(Vec<Node<I, T>>),
}

/// Sort axis used by splitting and packing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

impl<I, T: Scalar> Node<I, T> {
    /// An empty leaf with the empty bounding box.
    pub fn empty() -> Self {
        Self {
            bbox: Aabb2D::empty(),
            height: 1,
            children: Children::Leaf(Vec::new()),
        }
    }

    /// A leaf over `items`, with its bounding box computed by `extractor`.
    pub fn leaf<E>(items: Vec<I>, extractor: &E) -> Self
    where
        E: Extractor<I, Scalar = T>,
    {
        let mut node = Self {
            bbox: Aabb2D::empty(),
            height: 1,
            children: Children::Leaf(items),
        };
        node.recalc_bbox(extractor);
        node
    }

    /// A branch over `children`, one level above them.
    ///
    /// The children are expected to share a height; [`RTree::validate`](crate::RTree::validate)
    /// reports trees where they do not.
    pub fn branch(children: Vec<Self>) -> Self {
        let height = children.first().map(|c| c.height).unwrap_or(0) + 1;
        let bbox = children
            .iter()
            .fold(Aabb2D::empty(), |acc, c| union_aabb(acc, c.bbox));
        Self {
            bbox,
            height,
            children: Children::Branch(children),
        }
    }

    /// Tight bounding box of everything below this node.
    pub fn bbox(&self) -> Aabb2D<T> {
        self.bbox
    }

    /// 1 for leaves, one more than the children's height for branches.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the children are items.
    pub fn is_leaf(&self) -> bool {
        matches!(self.children, Children::Leaf(_))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        match &self.children {
            Children::Leaf(items) => items.len(),
            Children::Branch(nodes) => nodes.len(),
        }
    }

    /// Whether the node has no children at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The node's children.
    pub fn children(&self) -> &Children<I, T> {
        &self.children
    }

    /// Items of a leaf, `None` for branches.
    pub fn items(&self) -> Option<&[I]> {
        match &self.children {
            Children::Leaf(items) => Some(items),
            Children::Branch(_) => None,
        }
    }

    /// Child nodes of a branch, `None` for leaves.
    pub fn nodes(&self) -> Option<&[Self]> {
        match &self.children {
            Children::Leaf(_) => None,
            Children::Branch(nodes) => Some(nodes),
        }
    }

    pub(crate) fn items_mut(&mut self) -> Option<&mut Vec<I>> {
        match &mut self.children {
            Children::Leaf(items) => Some(items),
            Children::Branch(_) => None,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> Option<&mut Vec<Self>> {
        match &mut self.children {
            Children::Leaf(_) => None,
            Children::Branch(nodes) => Some(nodes),
        }
    }

    pub(crate) fn extend_bbox(&mut self, bbox: &Aabb2D<T>) {
        self.bbox.extend(bbox);
    }

    /// Bounding box of the children in `start..end`.
    pub(crate) fn dist_bbox<E>(&self, extractor: &E, start: usize, end: usize) -> Aabb2D<T>
    where
        E: Extractor<I, Scalar = T>,
    {
        match &self.children {
            Children::Leaf(items) => items[start..end]
                .iter()
                .fold(Aabb2D::empty(), |acc, item| {
                    union_aabb(acc, extractor.bbox(item))
                }),
            Children::Branch(nodes) => nodes[start..end]
                .iter()
                .fold(Aabb2D::empty(), |acc, node| union_aabb(acc, node.bbox)),
        }
    }

    /// Bounding box of child `i`.
    pub(crate) fn child_bbox<E>(&self, extractor: &E, i: usize) -> Aabb2D<T>
    where
        E: Extractor<I, Scalar = T>,
    {
        match &self.children {
            Children::Leaf(items) => extractor.bbox(&items[i]),
            Children::Branch(nodes) => nodes[i].bbox,
        }
    }

    /// Recompute the bounding box from scratch.
    pub(crate) fn recalc_bbox<E>(&mut self, extractor: &E)
    where
        E: Extractor<I, Scalar = T>,
    {
        self.bbox = self.dist_bbox(extractor, 0, self.len());
    }

    /// Stable sort of the children by their minimum along `axis`.
    pub(crate) fn sort_children<E>(&mut self, extractor: &E, axis: Axis)
    where
        E: Extractor<I, Scalar = T>,
    {
        match (&mut self.children, axis) {
            (Children::Leaf(items), Axis::X) => {
                items.sort_by(|a, b| cmp_t(&extractor.min_x(a), &extractor.min_x(b)));
            }
            (Children::Leaf(items), Axis::Y) => {
                items.sort_by(|a, b| cmp_t(&extractor.min_y(a), &extractor.min_y(b)));
            }
            (Children::Branch(nodes), Axis::X) => {
                nodes.sort_by(|a, b| cmp_t(&a.bbox.min_x, &b.bbox.min_x));
            }
            (Children::Branch(nodes), Axis::Y) => {
                nodes.sort_by(|a, b| cmp_t(&a.bbox.min_y, &b.bbox.min_y));
            }
        }
    }

    /// Move children `at..` into a new sibling of the same height and kind.
    ///
    /// Neither bounding box is updated.
    pub(crate) fn split_off(&mut self, at: usize) -> Self {
        let children = match &mut self.children {
            Children::Leaf(items) => Children::Leaf(items.split_off(at)),
            Children::Branch(nodes) => Children::Branch(nodes.split_off(at)),
        };
        Self {
            bbox: Aabb2D::empty(),
            height: self.height,
            children,
        }
    }

    /// Walk down `path`, a list of child indices starting at this node.
    pub(crate) fn descendant(&self, path: &[usize]) -> &Self {
        path.iter().fold(self, |node, &i| {
            &node.nodes().expect("descent path runs through branches")[i]
        })
    }

    /// Mutable counterpart of [`Node::descendant`].
    pub(crate) fn descendant_mut(&mut self, path: &[usize]) -> &mut Self {
        let mut node = self;
        for &i in path {
            node = &mut node
                .nodes_mut()
                .expect("descent path runs through branches")[i];
        }
        node
    }
}

impl<I, T: Scalar> Default for Node<I, T> {
    fn default() -> Self {
        Self::empty()
    }
}
