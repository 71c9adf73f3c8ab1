// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-place order statistics used by bulk loading.
//!
//! [`select`] is Floyd–Rivest selection: expected linear time, with the search
//! window narrowed by recursive sampling once a range exceeds
//! [`SAMPLE_THRESHOLD`] elements. [`multi_select`] builds on it to arrange a
//! slice into consecutive groups of `n` elements, each group holding keys no
//! greater than the next group's, in no particular order inside a group.
//!
//! Both take a key function rather than a comparator; keys are compared with
//! `PartialOrd` and must not be NaN.

use alloc::vec;

use crate::float;

/// Ranges wider than this are narrowed by sampling before partitioning.
pub const SAMPLE_THRESHOLD: usize = 600;

/// Rearrange `items[left..=right]` so that `items[k]` holds the element that
/// would be there if the range were sorted by `key`, with no greater keys
/// before it and no smaller keys after it.
///
/// `left <= k <= right < items.len()` must hold.
pub fn select<I, K, F>(items: &mut [I], left: usize, right: usize, k: usize, key: &F)
where
    K: PartialOrd + Copy,
    F: Fn(&I) -> K,
{
    debug_assert!(
        left <= k && k <= right && right < items.len(),
        "selection bounds out of range"
    );
    let mut left = left;
    let mut right = right;

    while right > left {
        if right - left > SAMPLE_THRESHOLD {
            let (new_left, new_right) = sample_window(left, right, k);
            select(items, new_left, new_right, k, key);
        }

        let t = key(&items[k]);
        let mut i = left;
        let mut j = right;

        items.swap(left, k);
        if key(&items[right]) > t {
            items.swap(left, right);
        }

        while i < j {
            items.swap(i, j);
            i += 1;
            j -= 1;
            while key(&items[i]) < t {
                i += 1;
            }
            while key(&items[j]) > t {
                j -= 1;
            }
        }

        if key(&items[left]) == t {
            items.swap(left, j);
        } else {
            j += 1;
            items.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            if j == 0 {
                break;
            }
            right = j - 1;
        }
    }
}

/// Floyd–Rivest sampling window around `k` for the range `left..=right`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "window bounds are clamped into `left..=right` before the cast back to usize."
)]
fn sample_window(left: usize, right: usize, k: usize) -> (usize, usize) {
    let n = (right - left + 1) as f64;
    let i = (k - left + 1) as f64;
    let z = float::ln(n);
    let s = 0.5 * float::exp(2.0 * z / 3.0);
    let sign = if i - n / 2.0 < 0.0 { -1.0 } else { 1.0 };
    let sd = 0.5 * float::sqrt(z * s * (n - s) / n) * sign;
    let k = k as f64;
    let new_left = float::floor(k - i * s / n + sd).max(left as f64);
    let new_right = float::floor(k + (n - i) * s / n + sd).min(right as f64);
    (new_left as usize, new_right as usize)
}

/// Arrange `items` into consecutive groups of `n` so that every key in a group
/// is no greater than any key in a later group.
///
/// Divide and conquer over an explicit stack: each range wider than `n` is
/// split at a multiple of `n` near its middle with [`select`]. A range whose
/// inclusive bounds differ by at most `n` is left as is.
pub fn multi_select<I, K, F>(items: &mut [I], n: usize, key: F)
where
    K: PartialOrd + Copy,
    F: Fn(&I) -> K,
{
    if items.is_empty() || n == 0 {
        return;
    }
    let mut stack = vec![(0_usize, items.len() - 1)];

    while let Some((left, right)) = stack.pop() {
        if right - left <= n {
            continue;
        }

        let mid = left + (right - left).div_ceil(2 * n) * n;
        select(items, left, right, mid, &key);

        stack.push((left, mid));
        stack.push((mid, right));
    }
}
