// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`RTree`] type: configuration, lifecycle and raw structure access.
//!
//! Operations live beside it: [`query`](crate::query), [`insert`](crate::insert),
//! [`split`](crate::split), [`bulk`](crate::bulk) and [`remove`](crate::remove).

use core::fmt::Debug;

use crate::extract::{ByEnvelope, Envelope, Extractor};
use crate::node::Node;
use crate::types::Aabb2D;
use crate::validate::InvariantError;

/// Default maximum number of children per node.
pub const DEFAULT_MAX_ENTRIES: usize = 9;

/// Smallest accepted maximum; lower requests are raised to this.
pub const MIN_MAX_ENTRIES: usize = 4;

/// Balanced 2D R-tree over items of type `I`.
///
/// Rectangles are read from items through the extractor `E`; by default items
/// implement [`Envelope`]. The tree owns its items and its whole node graph.
/// It is not synchronized: wrap it in a lock to share it across threads.
pub struct RTree<I, E = ByEnvelope>
where
    E: Extractor<I>,
{
    pub(crate) root: Node<I, E::Scalar>,
    pub(crate) max_entries: usize,
    pub(crate) min_entries: usize,
    pub(crate) extractor: E,
}

impl<I: Envelope> RTree<I> {
    /// Create an empty tree with the default node capacity of 9.
    pub fn new() -> Self {
        Self::with_extractor(DEFAULT_MAX_ENTRIES, ByEnvelope)
    }

    /// Create an empty tree holding at most `max_entries` children per node.
    ///
    /// `0` selects the default; other values are raised to at least 4.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self::with_extractor(max_entries, ByEnvelope)
    }
}

impl<I: Envelope> Default for RTree<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Create an empty tree with a custom extractor.
    ///
    /// `max_entries` follows the same clamping as [`RTree::with_max_entries`].
    /// The minimum fill is 40% of the maximum, and never below 2.
    pub fn with_extractor(max_entries: usize, extractor: E) -> Self {
        let max_entries = if max_entries == 0 {
            DEFAULT_MAX_ENTRIES
        } else {
            max_entries.max(MIN_MAX_ENTRIES)
        };
        let min_entries = (2 * max_entries).div_ceil(5).max(2);
        Self {
            root: Node::empty(),
            max_entries,
            min_entries,
            extractor,
        }
    }

    /// Maximum number of children per node.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum fill targeted by splits.
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// The extractor used to read item rectangles.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Height of the tree; 1 for a tree that is a single leaf (including the empty tree).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Bounding box of all items; [`Aabb2D::empty`] for an empty tree.
    pub fn bbox(&self) -> Aabb2D<E::Scalar> {
        self.root.bbox()
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of items. Walks the whole tree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = alloc::vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.nodes() {
                Some(nodes) => stack.extend(nodes),
                None => count += node.len(),
            }
        }
        count
    }

    /// Remove every item, leaving an empty leaf root.
    pub fn clear(&mut self) {
        self.root = Node::empty();
    }

    /// The root node, structurally as stored.
    pub fn raw(&self) -> &Node<I, E::Scalar> {
        &self.root
    }

    /// Consume the tree and return its root node.
    pub fn into_raw(self) -> Node<I, E::Scalar> {
        self.root
    }

    /// Replace the whole structure with `root`, returning the previous root.
    ///
    /// The new structure is trusted as-is; use [`RTree::try_load_raw`] to check it first.
    /// The node capacity and extractor of this tree stay in effect.
    pub fn load_raw(&mut self, root: Node<I, E::Scalar>) -> Node<I, E::Scalar> {
        log::debug!(
            "importing raw structure of height {} with {} root children",
            root.height(),
            root.len()
        );
        core::mem::replace(&mut self.root, root)
    }

    /// Like [`RTree::load_raw`], but reject structures that break the tree invariants.
    ///
    /// On error the tree is left untouched and `root` is dropped.
    pub fn try_load_raw(
        &mut self,
        root: Node<I, E::Scalar>,
    ) -> Result<Node<I, E::Scalar>, InvariantError> {
        self.validate_node(&root)?;
        Ok(self.load_raw(root))
    }
}

impl<I, E: Extractor<I>> Debug for RTree<I, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_entries", &self.max_entries)
            .field("min_entries", &self.min_entries)
            .field("height", &self.root.height())
            .field("len", &self.len())
            .field("bbox", &self.root.bbox())
            .finish_non_exhaustive()
    }
}
