// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic data and reference answers shared by the unit tests.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::types::Aabb2D;

/// Xorshift64 generator; fixed seeds keep the tests reproducible.
pub(crate) struct Rng(u64);

impl Rng {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[0, 1)`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "53 random bits fit an f64 mantissa exactly."
    )]
    pub(crate) fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    /// A rectangle with its minimum corner in `[0, extent)` and sides in `[0, max_size)`.
    pub(crate) fn rect(&mut self, extent: f64, max_size: f64) -> Aabb2D<f64> {
        let x = self.next_f64() * extent;
        let y = self.next_f64() * extent;
        let w = self.next_f64() * max_size;
        let h = self.next_f64() * max_size;
        Aabb2D::new(x, y, x + w, y + h)
    }

    pub(crate) fn rects(&mut self, n: usize, extent: f64, max_size: f64) -> Vec<Aabb2D<f64>> {
        (0..n).map(|_| self.rect(extent, max_size)).collect()
    }
}

/// Linear-scan answer to a search query.
pub(crate) fn brute_force(items: &[Aabb2D<f64>], query: &Aabb2D<f64>) -> Vec<Aabb2D<f64>> {
    items
        .iter()
        .filter(|r| query.intersects(r))
        .copied()
        .collect()
}

/// Sort rectangles so result sets can be compared regardless of order.
pub(crate) fn sorted(mut rects: Vec<Aabb2D<f64>>) -> Vec<Aabb2D<f64>> {
    rects.sort_by(|a, b| {
        (a.min_x, a.min_y, a.max_x, a.max_y)
            .partial_cmp(&(b.min_x, b.min_y, b.max_x, b.max_y))
            .unwrap_or(Ordering::Equal)
    });
    rects
}
