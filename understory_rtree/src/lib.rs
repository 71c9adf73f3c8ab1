// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a balanced 2D R-tree for rectangle search.
//!
//! Understory R-tree indexes items by axis-aligned rectangles and answers
//! "which items intersect this rectangle?" without scanning everything.
//!
//! - Insert items one at a time; overflowing nodes split R*-style, choosing the
//!   axis by total margin and the split point by minimum overlap.
//! - Bulk load many items with OMT packing, either into an empty tree or merged
//!   into an existing one.
//! - Search by rectangle, test for any collision, list everything, remove by
//!   equality.
//! - Export the node structure with [`RTree::raw`] and import it again with
//!   [`RTree::load_raw`]; with the `serde` feature it serializes as-is.
//!
//! The tree owns its items. Rectangles are read from them through an
//! [`Extractor`]: by default items implement [`Envelope`] (as [`Aabb2D`],
//! `[T; 4]` and `(T, T, T, T)` do), or [`Fields`] picks coordinates out of any
//! type with four selector functions. Coordinates can be `f32`, `f64` or `i64`;
//! area and margin metrics are computed in a widened type (f32→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{Aabb2D, RTree};
//!
//! let mut tree = RTree::new();
//! tree.insert([0.0, 0.0, 10.0, 10.0]);
//! tree.load([[20.0, 20.0, 30.0, 30.0], [5.0, 5.0, 25.0, 6.0]]);
//!
//! let hits = tree.search(Aabb2D::new(8.0, 4.0, 12.0, 8.0));
//! assert_eq!(hits.len(), 2);
//!
//! assert!(tree.remove(&[5.0, 5.0, 25.0, 6.0]));
//! assert_eq!(tree.search(Aabb2D::new(8.0, 4.0, 12.0, 8.0)).len(), 1);
//! assert_eq!(tree.validate(), Ok(()));
//! ```
//!
//! ## Choosing a node capacity
//!
//! [`RTree::with_max_entries`] sets the maximum number of children per node
//! (default 9, at least 4). Higher values make inserts faster and searches
//! slower. When most work is bulk loading followed by queries, 16 is a good
//! starting point.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in coordinates. Search results are returned in
//! no particular order.
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: float math for `no_std` builds. One of `std` or `libm` is required.
//! - `kurbo`: [`Envelope`] impls for `kurbo::Rect` and `kurbo::Point`.
//! - `serde`: `Serialize`/`Deserialize` for [`Aabb2D`] and [`Node`].

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_rtree requires either the `std` or `libm` feature to be enabled");

pub mod bulk;
pub mod extract;
mod float;
pub mod insert;
pub mod node;
pub mod query;
pub mod remove;
pub mod rtree;
pub mod select;
pub mod split;
pub mod types;
pub mod validate;

#[cfg(test)]
mod test_util;

pub use extract::{ByEnvelope, Envelope, Extractor, Fields};
pub use node::{Children, Node};
pub use rtree::{DEFAULT_MAX_ENTRIES, MIN_MAX_ENTRIES, RTree};
pub use types::{
    Aabb2D, Scalar, ScalarAcc, area, enlarged_area, intersection_area, margin, union_aabb,
};
pub use validate::InvariantError;
