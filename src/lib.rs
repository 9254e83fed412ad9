// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real roots of linear and quadratic equations.
//!
//! The quadroot library solves `k x + b = 0` and `a x² + b x + c = 0` for
//! real coefficients. Every branch decision (is the leading coefficient
//! zero, is the discriminant zero) is made with a single tolerance,
//! [`EPSILON`], and coefficients large enough to overflow `f64` arithmetic
//! are rejected before any arithmetic is done.
//!
//! # Examples
//!
//! ```
//! use quadroot::{solve_quadratic, Solution};
//!
//! match solve_quadratic(1.0, -3.0, 2.0) {
//!     Solution::TwoRoots(x1, x2) => assert_eq!(x1 * x2, 2.0),
//!     other => panic!("unexpected {other}"),
//! }
//! assert_eq!(solve_quadratic(0.0, 2.0, -1.0), Solution::OneRoot(0.5));
//! assert_eq!(solve_quadratic(1e300, 0.0, 1e300), Solution::OutOfRange);
//! ```
//!
//! # Features
//!
//! The solvers work without the standard library, as long as the `libm`
//! feature is enabled. The `std` feature (on by default) adds the
//! interactive [coefficient reader](read_coefficients) and the
//! [case harness](harness). The `cli` feature (also on by default) builds
//! the `quadroot` binary.

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::many_single_char_names,
    reason = "equation coefficients are single letters"
)]
#![expect(
    clippy::exhaustive_enums,
    reason = "solution and error enums are meant to be matched exhaustively"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("quadroot requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

#[cfg(feature = "std")]
pub mod harness;
#[cfg(feature = "std")]
mod input;
#[cfg(all(feature = "libm", not(feature = "std")))]
mod libm_polyfill;
mod solution;
mod solve;
mod tolerance;

#[cfg(feature = "std")]
pub use crate::input::{parse_finite, read_coefficients, InputError, INVALID_INPUT_MESSAGE};
#[cfg(feature = "std")]
pub use crate::solution::print_solution;
pub use crate::solution::{RootCount, Solution};
pub use crate::solve::{solve_linear, solve_quadratic};
pub use crate::tolerance::{approx_eq, is_zero, EPSILON};
