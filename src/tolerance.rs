// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerance-based comparison of floating point values.
//!
//! Derived quantities such as the discriminant accumulate rounding error
//! across several operations, so exact comparison with zero is useless for
//! branch decisions. Every decision in the solver goes through [`is_zero`],
//! which makes [`EPSILON`] the single notion of "zero" in this crate.

#[cfg(all(feature = "libm", not(feature = "std")))]
use crate::libm_polyfill::FloatFuncs as _;

/// Values with a magnitude below this are treated as exactly zero.
pub const EPSILON: f64 = 1e-11;

/// Returns `true` if `x` is zero within [`EPSILON`].
///
/// `x` must be finite; this is checked in debug builds.
///
/// # Examples
///
/// ```
/// use quadroot::is_zero;
///
/// assert!(is_zero(2e-16));
/// assert!(!is_zero(0.02));
/// ```
#[inline]
pub fn is_zero(x: f64) -> bool {
    debug_assert!(x.is_finite(), "is_zero called with non-finite value {x}");
    x.abs() < EPSILON
}

/// Returns `true` if `x` and `y` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(x: f64, y: f64) -> bool {
    is_zero(x - y)
}
