// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear and quadratic equation solvers.

#[cfg(all(feature = "libm", not(feature = "std")))]
use crate::libm_polyfill::FloatFuncs as _;

use crate::{is_zero, Solution};

/// Find the real root of the linear equation `k x + b = 0`.
///
/// If `k` is zero (within [`EPSILON`](crate::EPSILON)) the equation is
/// either `0 = 0`, satisfied by every real number, or has no roots at all.
/// If `-b / k` would overflow, [`Solution::OutOfRange`] is returned instead
/// of an infinite root.
///
/// Both coefficients must be finite.
///
/// # Examples
///
/// ```
/// use quadroot::{solve_linear, Solution};
///
/// assert_eq!(solve_linear(2.0, -3.0), Solution::OneRoot(1.5));
/// assert_eq!(solve_linear(0.0, 0.0), Solution::InfiniteRoots);
/// assert_eq!(solve_linear(0.0, 5.0), Solution::NoRoots);
/// ```
pub fn solve_linear(k: f64, b: f64) -> Solution {
    debug_assert!(
        k.is_finite() && b.is_finite(),
        "non-finite coefficients: k = {k}, b = {b}"
    );
    if is_zero(k) {
        return if is_zero(b) {
            Solution::InfiniteRoots
        } else {
            Solution::NoRoots
        };
    }
    if b.abs() >= f64::MAX * k.abs() {
        return Solution::OutOfRange;
    }
    Solution::OneRoot(tidy(-b / k))
}

/// Find the real roots of the quadratic equation `a x² + b x + c = 0`.
///
/// The coefficients are checked for magnitude before anything is computed:
/// if `b²`, `4 a c` or the discriminant would overflow,
/// [`Solution::OutOfRange`] is returned.
///
/// If `a` is zero (within [`EPSILON`](crate::EPSILON)) the equation is
/// solved as the linear equation `b x + c = 0`, see [`solve_linear`].
///
/// Otherwise the discriminant decides between no roots, a double root
/// (reported once) and two distinct roots. The two roots are in no
/// particular order. When `b` or `c` vanishes the roots are computed
/// directly; in the general case the formula avoids subtracting nearly
/// equal quantities.
///
/// All coefficients must be finite.
///
/// # Examples
///
/// ```
/// use quadroot::{solve_quadratic, Solution};
///
/// assert_eq!(solve_quadratic(1.0, -2.0, 1.0), Solution::OneRoot(1.0));
/// assert_eq!(solve_quadratic(1.0, 0.0, 1.0), Solution::NoRoots);
///
/// let roots = solve_quadratic(1.0, 0.0, -4.0).roots();
/// assert!(roots.contains(&2.0) && roots.contains(&-2.0));
/// ```
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Solution {
    debug_assert!(
        a.is_finite() && b.is_finite() && c.is_finite(),
        "non-finite coefficients: a = {a}, b = {b}, c = {c}"
    );
    // Each check relies on the quantities bounded by the previous ones.
    if b.abs() > f64::MAX.sqrt() {
        return Solution::OutOfRange;
    }
    // An overflowing product compares as infinite, so this also covers it.
    let ac = a * c;
    if ac.abs() > f64::MAX / 4.0 {
        return Solution::OutOfRange;
    }
    let b_sq = b * b;
    let four_ac = 4.0 * ac;
    if b_sq > f64::MAX + four_ac {
        return Solution::OutOfRange;
    }

    if is_zero(a) {
        return solve_linear(b, c);
    }

    let disc = b_sq - four_ac;
    if is_zero(disc) {
        Solution::OneRoot(tidy(-b / (2.0 * a)))
    } else if disc < 0.0 {
        Solution::NoRoots
    } else if is_zero(b) {
        // Here a and c have opposite signs; dividing the square roots keeps
        // the quotient from overflowing when a is tiny.
        let root = c.abs().sqrt() / a.abs().sqrt();
        Solution::TwoRoots(-root, root)
    } else if is_zero(c) {
        Solution::TwoRoots(0.0, tidy(-b / a))
    } else {
        // See https://math.stackexchange.com/questions/866331
        let q = -0.5 * (b + disc.sqrt().copysign(b));
        Solution::TwoRoots(q / a, c / q)
    }
}

/// Turns a negative zero into a positive one.
#[inline]
fn tidy(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}
