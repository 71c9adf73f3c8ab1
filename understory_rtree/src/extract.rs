// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate extraction: how the tree turns an item into a rectangle.
//!
//! The tree calls an [`Extractor`] on every comparison during insertion,
//! splitting and bulk packing, so implementations should be pure, total and
//! allocation-free. Results are unspecified (but memory safe) if an extractor
//! returns different rectangles for the same item over time, or returns
//! inverted rectangles.

use core::fmt::Debug;

use crate::types::{Aabb2D, Scalar};

/// Types that know their own bounding rectangle.
///
/// This is the default extraction used by [`ByEnvelope`].
pub trait Envelope {
    /// Coordinate type of the rectangle.
    type Scalar: Scalar;

    /// The item's bounding rectangle.
    fn envelope(&self) -> Aabb2D<Self::Scalar>;
}

impl<T: Scalar> Envelope for Aabb2D<T> {
    type Scalar = T;

    #[inline]
    fn envelope(&self) -> Aabb2D<T> {
        *self
    }
}

/// `[min_x, min_y, max_x, max_y]`.
impl<T: Scalar> Envelope for [T; 4] {
    type Scalar = T;

    #[inline]
    fn envelope(&self) -> Aabb2D<T> {
        Aabb2D::new(self[0], self[1], self[2], self[3])
    }
}

/// `(min_x, min_y, max_x, max_y)`.
impl<T: Scalar> Envelope for (T, T, T, T) {
    type Scalar = T;

    #[inline]
    fn envelope(&self) -> Aabb2D<T> {
        Aabb2D::new(self.0, self.1, self.2, self.3)
    }
}

impl<E: Envelope + ?Sized> Envelope for &E {
    type Scalar = E::Scalar;

    #[inline]
    fn envelope(&self) -> Aabb2D<E::Scalar> {
        (**self).envelope()
    }
}

#[cfg(feature = "kurbo")]
impl Envelope for kurbo::Rect {
    type Scalar = f64;

    #[inline]
    fn envelope(&self) -> Aabb2D<f64> {
        let r = self.abs();
        Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo")]
impl Envelope for kurbo::Point {
    type Scalar = f64;

    #[inline]
    fn envelope(&self) -> Aabb2D<f64> {
        Aabb2D::from_point(self.x, self.y)
    }
}

/// Maps items of type `I` to rectangles.
///
/// `min_x` and `min_y` are the sort keys used when splitting leaves and when
/// bulk packing. Override them when the minimum corner can be read without
/// building the whole rectangle.
pub trait Extractor<I> {
    /// Coordinate type produced by this extractor.
    type Scalar: Scalar;

    /// The item's bounding rectangle.
    fn bbox(&self, item: &I) -> Aabb2D<Self::Scalar>;

    /// The item's minimum x.
    #[inline]
    fn min_x(&self, item: &I) -> Self::Scalar {
        self.bbox(item).min_x
    }

    /// The item's minimum y.
    #[inline]
    fn min_y(&self, item: &I) -> Self::Scalar {
        self.bbox(item).min_y
    }
}

/// Default extractor: defers to the item's [`Envelope`] impl.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ByEnvelope;

impl<I: Envelope> Extractor<I> for ByEnvelope {
    type Scalar = I::Scalar;

    #[inline]
    fn bbox(&self, item: &I) -> Aabb2D<I::Scalar> {
        item.envelope()
    }
}

/// Extractor assembled from four per-axis field selectors.
///
/// ```rust
/// use understory_rtree::{Aabb2D, Fields, RTree};
///
/// struct Building {
///     name: &'static str,
///     west: f64,
///     south: f64,
///     east: f64,
///     north: f64,
/// }
///
/// let fields = Fields::new(
///     |b: &Building| b.west,
///     |b: &Building| b.south,
///     |b: &Building| b.east,
///     |b: &Building| b.north,
/// );
/// let mut tree = RTree::with_extractor(9, fields);
/// tree.insert(Building { name: "hall", west: 0.0, south: 0.0, east: 5.0, north: 3.0 });
/// let hits = tree.search(Aabb2D::new(4.0, 2.0, 6.0, 6.0));
/// assert_eq!(hits[0].name, "hall");
/// ```
pub struct Fields<I, T> {
    min_x: fn(&I) -> T,
    min_y: fn(&I) -> T,
    max_x: fn(&I) -> T,
    max_y: fn(&I) -> T,
}

impl<I, T> Fields<I, T> {
    /// Build an extractor from min-x, min-y, max-x and max-y selectors.
    pub const fn new(
        min_x: fn(&I) -> T,
        min_y: fn(&I) -> T,
        max_x: fn(&I) -> T,
        max_y: fn(&I) -> T,
    ) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<I, T> Clone for Fields<I, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, T> Copy for Fields<I, T> {}

impl<I, T> Debug for Fields<I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fields").finish_non_exhaustive()
    }
}

impl<I, T: Scalar> Extractor<I> for Fields<I, T> {
    type Scalar = T;

    #[inline]
    fn bbox(&self, item: &I) -> Aabb2D<T> {
        Aabb2D::new(
            (self.min_x)(item),
            (self.min_y)(item),
            (self.max_x)(item),
            (self.max_y)(item),
        )
    }

    #[inline]
    fn min_x(&self, item: &I) -> T {
        (self.min_x)(item)
    }

    #[inline]
    fn min_y(&self, item: &I) -> T {
        (self.min_y)(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_and_array_envelopes_agree() {
        let arr = [1_i64, 2, 3, 4];
        let tup = (1_i64, 2, 3, 4);
        assert_eq!(arr.envelope(), tup.envelope());
        assert_eq!(
            <&[i64; 4] as Envelope>::envelope(&&arr),
            Aabb2D::new(1, 2, 3, 4)
        );
    }

    #[test]
    fn fields_extractor_reads_selectors() {
        struct Pin {
            x: f32,
            y: f32,
        }
        let fields = Fields::new(|p: &Pin| p.x, |p: &Pin| p.y, |p: &Pin| p.x, |p: &Pin| p.y);
        let pin = Pin { x: 3.0, y: -1.0 };
        assert_eq!(fields.bbox(&pin), Aabb2D::from_point(3.0, -1.0));
        assert_eq!(fields.min_x(&pin), 3.0);
        assert_eq!(fields.min_y(&pin), -1.0);
    }

    #[cfg(feature = "kurbo")]
    #[test]
    fn kurbo_rect_is_normalized() {
        let r = kurbo::Rect::new(10.0, 8.0, 2.0, 4.0);
        assert_eq!(r.envelope(), Aabb2D::new(2.0, 4.0, 10.0, 8.0));
        assert_eq!(kurbo::Point::new(1.0, 2.0).envelope(), Aabb2D::from_point(1.0, 2.0));
    }
}
