// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory R-tree: insert, bulk load, search, and remove.

use understory_rtree::{Aabb2D, RTree};

fn main() {
    let mut tree: RTree<Aabb2D<i64>> = RTree::new();
    tree.insert(Aabb2D::new(0, 0, 10, 10));
    tree.insert(Aabb2D::new(5, 5, 15, 15));

    // Bulk load a 10x10 grid of small cells.
    let grid: Vec<_> = (0..100)
        .map(|i| Aabb2D::<i64>::from_xywh(i % 10 * 20, i / 10 * 20, 4, 4))
        .collect();
    tree.load(grid);
    println!("{} items, height {}", tree.len(), tree.height());

    // Query a rectangle
    let hits = tree.search(Aabb2D::new(6, 6, 22, 22));
    println!("hits in (6,6)-(22,22): {hits:?}");

    // Remove one box and query again
    let removed = tree.remove(&Aabb2D::new(5, 5, 15, 15));
    println!("removed: {removed}");
    println!(
        "hits after removal: {:?}",
        tree.search(Aabb2D::new(6, 6, 22, 22))
    );
    assert!(tree.validate().is_ok());
}
