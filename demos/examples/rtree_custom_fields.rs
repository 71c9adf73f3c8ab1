// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexing a caller-defined struct.
//!
//! Map records to rectangles with `Fields` selectors, then export the raw tree
//! as JSON and import it into a fresh tree without rebuilding.
//!
//! Run:
//! - `cargo run -p understory_rtree_demos --example rtree_custom_fields`

use serde::{Deserialize, Serialize};
use understory_rtree::{Aabb2D, Fields, Node, RTree};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Parcel {
    id: u32,
    west: i64,
    south: i64,
    east: i64,
    north: i64,
}

fn parcel_fields() -> Fields<Parcel, i64> {
    Fields::new(|p| p.west, |p| p.south, |p| p.east, |p| p.north)
}

fn main() {
    let parcels: Vec<Parcel> = (0..64)
        .map(|id| {
            let x = i64::from(id % 8) * 100;
            let y = i64::from(id / 8) * 100;
            Parcel {
                id,
                west: x,
                south: y,
                east: x + 90,
                north: y + 90,
            }
        })
        .collect();

    let mut tree = RTree::with_extractor(16, parcel_fields());
    tree.load(parcels);

    let survey = Aabb2D::new(250, 250, 420, 330);
    let mut ids: Vec<u32> = tree.search(survey).iter().map(|p| p.id).collect();
    ids.sort_unstable();
    println!("parcels in survey area: {ids:?}");

    // Export the structure and import it elsewhere as-is.
    let json = serde_json::to_string(tree.raw()).expect("tree serializes");
    println!("exported {} bytes of JSON", json.len());
    let root: Node<Parcel, i64> = serde_json::from_str(&json).expect("tree deserializes");

    let mut copy = RTree::with_extractor(16, parcel_fields());
    copy.try_load_raw(root).expect("exported tree is well formed");
    let mut copy_ids: Vec<u32> = copy.search(survey).iter().map(|p| p.id).collect();
    copy_ids.sort_unstable();
    assert_eq!(ids, copy_ids);

    // Remove by identity rather than full equality.
    let first = copy
        .all()
        .into_iter()
        .find(|p| p.id == ids[0])
        .cloned()
        .expect("parcel is indexed");
    assert!(copy.remove_by(&first, |a, b| a.id == b.id));
    println!("{} parcels left after removing #{}", copy.len(), first.id);
}
