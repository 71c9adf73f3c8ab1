// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk loading with OMT (overlap minimizing top-down) packing.
//!
//! Items are partitioned in place: first into vertical slabs by minimum x,
//! then each slab into tiles by minimum y, recursively down to leaves. Only
//! group boundaries are established ([`multi_select`]), not a full sort.
//!
//! Packing runs in two phases. [`pack`] reorders the items and records the
//! tile shape; [`build`] then moves the items, in their new order, into nodes.

use alloc::vec;
use alloc::vec::Vec;

use crate::extract::Extractor;
use crate::insert::Entry;
use crate::node::Node;
use crate::rtree::RTree;
use crate::select::multi_select;

impl<I, E: Extractor<I>> RTree<I, E> {
    /// Insert many items at once.
    ///
    /// Into an empty tree this is typically several times faster than
    /// inserting one by one and yields better query performance. When the tree
    /// already holds items, the new ones are packed into a separate subtree
    /// which is then merged in, so loading batches of similar extent works
    /// best. Fewer items than [`RTree::min_entries`] are inserted one by one.
    pub fn load<It>(&mut self, items: It)
    where
        It: IntoIterator<Item = I>,
    {
        let mut items: Vec<I> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }
        if items.len() < self.min_entries {
            for item in items {
                self.insert(item);
            }
            return;
        }

        let count = items.len();
        let tile = pack(&self.extractor, &mut items, 0, self.max_entries);
        let mut node = build(&self.extractor, tile, &mut items.into_iter());

        if self.root.is_empty() {
            log::debug!("bulk loaded {count} items, height {}", node.height());
            self.root = node;
        } else if self.root.height() == node.height() {
            log::debug!("bulk loaded {count} items beside a root of equal height");
            self.split_root(node);
        } else {
            if self.root.height() < node.height() {
                core::mem::swap(&mut self.root, &mut node);
            }
            log::debug!(
                "bulk loaded {count} items, merging a subtree of height {} into height {}",
                node.height(),
                self.root.height()
            );
            let level = self.root.height() - node.height() - 1;
            let bbox = node.bbox();
            self.insert_entry(Entry::Node(node), bbox, level);
        }
    }
}

/// Shape of a packed subtree over a contiguous run of items.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Tile {
    /// A leaf over the next `n` items.
    Leaf(usize),
    Branch(Vec<Tile>),
}

/// Partition `items` into tiles for a subtree of the given height.
///
/// A `height` of 0 marks the top call: the height is derived from the item
/// count, and the root fan-out is reduced so the lower levels come out full.
/// Runs of at most `max` items above leaf level are wrapped in single-child
/// branches so that every leaf ends up at the same depth.
fn pack<I, E>(extractor: &E, items: &mut [I], height: usize, max: usize) -> Tile
where
    E: Extractor<I>,
{
    let n = items.len();
    if n <= max {
        return if height > 1 {
            Tile::Branch(vec![pack(extractor, items, height - 1, max)])
        } else {
            Tile::Leaf(n)
        };
    }

    let (height, fanout) = if height == 0 {
        let (height, below) = packed_height(n, max);
        (height, n.div_ceil(below))
    } else {
        (height, max)
    };

    let per_child = n.div_ceil(fanout);
    let per_slab = per_child * ceil_sqrt(fanout);

    multi_select(items, per_slab, |item| extractor.min_x(item));

    let mut tiles = Vec::with_capacity(fanout);
    for slab in items.chunks_mut(per_slab) {
        multi_select(slab, per_child, |item| extractor.min_y(item));
        for run in slab.chunks_mut(per_child) {
            tiles.push(pack(extractor, run, height - 1, max));
        }
    }
    Tile::Branch(tiles)
}

/// Materialize `tile`, taking items from `items` in order.
fn build<I, E, It>(extractor: &E, tile: Tile, items: &mut It) -> Node<I, E::Scalar>
where
    E: Extractor<I>,
    It: Iterator<Item = I>,
{
    match tile {
        Tile::Leaf(n) => Node::leaf(items.by_ref().take(n).collect(), extractor),
        Tile::Branch(tiles) => {
            let mut children = Vec::with_capacity(tiles.len());
            for tile in tiles {
                children.push(build(extractor, tile, items));
            }
            Node::branch(children)
        }
    }
}

/// Smallest height whose full capacity `max^height` holds `n` items, together
/// with the capacity of one subtree below the root, `max^(height - 1)`.
fn packed_height(n: usize, max: usize) -> (usize, usize) {
    let mut height = 1;
    let mut below = 1_usize;
    while below.saturating_mul(max) < n {
        below = below.saturating_mul(max);
        height += 1;
    }
    (height, below)
}

fn ceil_sqrt(n: usize) -> usize {
    let mut s = 1;
    while s * s < n {
        s += 1;
    }
    s
}
