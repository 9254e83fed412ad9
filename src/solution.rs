// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outcome of solving an equation.

use core::fmt;

use arrayvec::ArrayVec;

/// How many roots an equation has, or why it could not be solved.
///
/// Each variant has an integer [code](RootCount::code), which is what case
/// files for the [harness](crate::harness) use.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RootCount {
    /// Two distinct real roots.
    TwoRoots,
    /// A single real root.
    OneRoot,
    /// No real roots.
    NoRoots,
    /// Every real number is a root (the equation is `0 = 0`).
    InfiniteRoots,
    /// Intermediate arithmetic would overflow `f64`.
    OutOfRange,
}

impl RootCount {
    /// The integer code of this count.
    ///
    /// `2`, `1` and `0` are literal root counts; `-1` stands for infinitely
    /// many roots and `-2` for a range error.
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::TwoRoots => 2,
            Self::OneRoot => 1,
            Self::NoRoots => 0,
            Self::InfiniteRoots => -1,
            Self::OutOfRange => -2,
        }
    }

    /// The count with the given [code](Self::code), if there is one.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            2 => Some(Self::TwoRoots),
            1 => Some(Self::OneRoot),
            0 => Some(Self::NoRoots),
            -1 => Some(Self::InfiniteRoots),
            -2 => Some(Self::OutOfRange),
            _ => None,
        }
    }
}

/// The result of [`solve_linear`](crate::solve_linear) or
/// [`solve_quadratic`](crate::solve_quadratic).
///
/// A root can only be read through a variant that actually carries one.
/// The two roots of [`Solution::TwoRoots`] are in no particular order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Solution {
    /// No real roots.
    NoRoots,
    /// Exactly one root.
    OneRoot(f64),
    /// Two distinct roots, unordered.
    TwoRoots(f64, f64),
    /// Every real number is a root.
    InfiniteRoots,
    /// The coefficients are too large to solve without overflow.
    OutOfRange,
}

impl Solution {
    /// The [`RootCount`] of this solution.
    #[inline]
    pub const fn root_count(&self) -> RootCount {
        match self {
            Self::NoRoots => RootCount::NoRoots,
            Self::OneRoot(_) => RootCount::OneRoot,
            Self::TwoRoots(..) => RootCount::TwoRoots,
            Self::InfiniteRoots => RootCount::InfiniteRoots,
            Self::OutOfRange => RootCount::OutOfRange,
        }
    }

    /// The roots carried by this solution.
    ///
    /// Empty for [`NoRoots`](Self::NoRoots),
    /// [`InfiniteRoots`](Self::InfiniteRoots) and
    /// [`OutOfRange`](Self::OutOfRange).
    pub fn roots(&self) -> ArrayVec<f64, 2> {
        let mut result = ArrayVec::new();
        match *self {
            Self::OneRoot(x) => result.push(x),
            Self::TwoRoots(x1, x2) => {
                result.push(x1);
                result.push(x2);
            }
            Self::NoRoots | Self::InfiniteRoots | Self::OutOfRange => {}
        }
        result
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoRoots(x1, x2) => write!(f, "2 solutions: {x1:.3e} and {x2:.3e}"),
            Self::OneRoot(x) => write!(f, "1 solution: {x:.3e}"),
            Self::NoRoots => f.write_str("No solutions"),
            Self::InfiniteRoots => f.write_str("Infinitive number of roots"),
            Self::OutOfRange => f.write_str("Failed to solve equation: Coefficients out of range"),
        }
    }
}

/// Writes the human-readable line for `solution`, newline included.
///
/// # Errors
///
/// Returns any error from writing to `out`.
#[cfg(feature = "std")]
pub fn print_solution<W: std::io::Write>(out: &mut W, solution: &Solution) -> std::io::Result<()> {
    writeln!(out, "{solution}")
}
