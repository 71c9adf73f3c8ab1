// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `f64` math for `no_std` builds: `std` when available, otherwise `libm`.

#[cfg(feature = "std")]
mod imp {
    #[inline]
    pub(crate) fn ln(x: f64) -> f64 {
        x.ln()
    }

    #[inline]
    pub(crate) fn exp(x: f64) -> f64 {
        x.exp()
    }

    #[inline]
    pub(crate) fn sqrt(x: f64) -> f64 {
        x.sqrt()
    }

    #[inline]
    pub(crate) fn floor(x: f64) -> f64 {
        x.floor()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod imp {
    #[inline]
    pub(crate) fn ln(x: f64) -> f64 {
        libm::log(x)
    }

    #[inline]
    pub(crate) fn exp(x: f64) -> f64 {
        libm::exp(x)
    }

    #[inline]
    pub(crate) fn sqrt(x: f64) -> f64 {
        libm::sqrt(x)
    }

    #[inline]
    pub(crate) fn floor(x: f64) -> f64 {
        libm::floor(x)
    }
}

pub(crate) use imp::{exp, floor, ln, sqrt};
