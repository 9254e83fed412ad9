// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File-driven regression cases for the solvers.
//!
//! A case file holds one case per line. Blank lines and lines starting with
//! `#` are skipped. Fields are separated by whitespace:
//!
//! ```text
//! # linear:    k b count [x]
//! 3 2 1 -0.6666666666666666
//! 0 0 -1
//!
//! # quadratic: a b c count [x1 [x2]]
//! 1 0 -4 2 2 -2
//! 1 0 1 0
//! ```
//!
//! `count` is a [`RootCount` code](RootCount::code). Expected roots are
//! compared with the produced ones as an unordered set, and every produced
//! root is also substituted back into its equation.
//!
//! Besides case files there are three fixed checks:
//! [`check_input`] reads a sample input stream through the coefficient
//! reader, [`check_output`] compares the rendering of
//! [`SAMPLE_SOLUTIONS`] with a reference file, and [`run_self_check`]
//! solves randomly generated equations from a seed.

use std::fmt;
use std::io::{self, BufRead, Write};

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::input::{parse_finite, read_coefficients, InputError};
use crate::{
    approx_eq, is_zero, print_solution, solve_linear, solve_quadratic, RootCount, Solution,
};

/// What every coefficient triple in a sample input stream must read as.
pub const SAMPLE_COEFFICIENTS: [f64; 3] = [5.0, 5.0, 5.0];

/// The solutions rendered by [`check_output`], in order.
pub const SAMPLE_SOLUTIONS: [Solution; 5] = [
    Solution::OutOfRange,
    Solution::InfiniteRoots,
    Solution::NoRoots,
    Solution::OneRoot(228.0),
    Solution::TwoRoots(228.0, 282.0),
];

/// Failure to run a case file.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A line could not be parsed as a case.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
    /// Reading cases or writing the report failed.
    #[error("i/o error in case harness: {0}")]
    Io(#[from] io::Error),
}

/// Tally of a harness run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of cases that were run.
    pub total: usize,
    /// Number of cases whose outcome matched the expectation.
    pub passed: usize,
}

impl Summary {
    /// Number of cases that did not match.
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// Whether every case passed.
    pub fn is_success(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} cases passed", self.passed, self.total)
    }
}

/// Runs linear cases (`k b count [x]`) from `cases`, reporting to `report`.
///
/// # Errors
///
/// Returns [`HarnessError::Parse`] on the first malformed line and
/// [`HarnessError::Io`] on read or write failure. Cases that merely fail are
/// reported and counted, not returned as errors.
pub fn run_linear_cases<R, W>(cases: R, report: &mut W) -> Result<Summary, HarnessError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    run_cases(cases, report, 2, |c| {
        let solution = solve_linear(c[0], c[1]);
        let satisfied = solution.roots().iter().all(|&x| vanishes(c[0] * x + c[1]));
        (solution, satisfied)
    })
}

/// Runs quadratic cases (`a b c count [x1 [x2]]`) from `cases`, reporting
/// to `report`.
///
/// # Errors
///
/// Same as [`run_linear_cases`].
pub fn run_quadratic_cases<R, W>(cases: R, report: &mut W) -> Result<Summary, HarnessError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    run_cases(cases, report, 3, |c| {
        let solution = solve_quadratic(c[0], c[1], c[2]);
        let satisfied = solution
            .roots()
            .iter()
            .all(|&x| vanishes(c[0] * x * x + c[1] * x + c[2]));
        (solution, satisfied)
    })
}

struct Case {
    coeffs: ArrayVec<f64, 3>,
    expected: RootCount,
    roots: ArrayVec<f64, 2>,
}

fn run_cases<R, W>(
    cases: R,
    report: &mut W,
    arity: usize,
    solve: impl Fn(&[f64]) -> (Solution, bool),
) -> Result<Summary, HarnessError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut summary = Summary::default();
    for (index, line) in cases.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let Some(case) = parse_case(&line, arity)
            .map_err(|message| HarnessError::Parse { line: line_no, message })?
        else {
            continue;
        };
        summary.total += 1;
        let (solution, satisfied) = solve(case.coeffs.as_slice());
        match check(&case, &solution, satisfied) {
            Ok(()) => {
                debug!(line = line_no, %solution, "case passed");
                summary.passed += 1;
            }
            Err(reason) => {
                warn!(line = line_no, %solution, reason = reason.as_str(), "case failed");
                writeln!(
                    report,
                    "FAILED line {line_no}: coefficients {:?}: expected {:?} {:?}, got {solution:?}: {reason}",
                    case.coeffs.as_slice(),
                    case.expected,
                    case.roots.as_slice(),
                )?;
            }
        }
    }
    info!(passed = summary.passed, total = summary.total, "case run finished");
    writeln!(report, "{summary}")?;
    Ok(summary)
}

/// Parses one line; `Ok(None)` for blank and comment lines.
fn parse_case(line: &str, arity: usize) -> Result<Option<Case>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut fields = line.split_whitespace();
    let mut coeffs = ArrayVec::new();
    for _ in 0..arity {
        let field = fields.next().ok_or("missing coefficient")?;
        coeffs.push(parse_number(field)?);
    }
    let code = fields.next().ok_or("missing root count")?;
    let expected = code
        .parse()
        .ok()
        .and_then(RootCount::from_code)
        .ok_or_else(|| format!("invalid root count `{code}`"))?;
    let wanted = match expected {
        RootCount::TwoRoots if arity == 3 => 2,
        RootCount::TwoRoots => return Err("a linear equation cannot have two roots".into()),
        RootCount::OneRoot => 1,
        RootCount::NoRoots | RootCount::InfiniteRoots | RootCount::OutOfRange => 0,
    };
    let mut roots = ArrayVec::new();
    for field in fields.by_ref().take(wanted) {
        roots.push(parse_number(field)?);
    }
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field `{extra}`"));
    }
    Ok(Some(Case {
        coeffs,
        expected,
        roots,
    }))
}

/// Whether a residual is zero; an overflowing residual never is.
fn vanishes(residual: f64) -> bool {
    residual.is_finite() && is_zero(residual)
}

fn parse_number(field: &str) -> Result<f64, String> {
    parse_finite(field).ok_or_else(|| format!("invalid number `{field}`"))
}

fn check(case: &Case, solution: &Solution, satisfied: bool) -> Result<(), String> {
    if solution.root_count() != case.expected {
        return Err("wrong number of roots".into());
    }
    let actual = solution.roots();
    let matches = match (case.roots.as_slice(), actual.as_slice()) {
        ([], _) => true,
        ([x], _) => actual.iter().any(|y| approx_eq(*x, *y)),
        ([x1, x2], [y1, y2]) => {
            (approx_eq(*x1, *y1) && approx_eq(*x2, *y2))
                || (approx_eq(*x1, *y2) && approx_eq(*x2, *y1))
        }
        _ => false,
    };
    if !matches {
        return Err("roots differ".into());
    }
    if !satisfied {
        return Err("root does not satisfy the equation".into());
    }
    Ok(())
}

/// Reads coefficient triples from `input` until it ends, checking that
/// each one equals [`SAMPLE_COEFFICIENTS`].
///
/// Malformed tokens in `input` are skipped the way the interactive reader
/// skips them, and prompts are discarded. Each triple starts on a fresh
/// line. A stream that ends in the middle of a triple counts as a failed
/// case.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] on read or write failure.
pub fn check_input<R, W>(mut input: R, report: &mut W) -> Result<Summary, HarnessError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut summary = Summary::default();
    loop {
        let triple = summary.total + 1;
        match read_coefficients(&mut input, &mut io::sink(), ["a", "b", "c"]) {
            Ok(values) => {
                summary.total += 1;
                if values.iter().zip(&SAMPLE_COEFFICIENTS).all(|(x, y)| approx_eq(*x, *y)) {
                    debug!(triple, "sample input read");
                    summary.passed += 1;
                } else {
                    warn!(triple, ?values, "sample input read wrongly");
                    writeln!(
                        report,
                        "FAILED input triple {triple}: read {values:?}, expected {SAMPLE_COEFFICIENTS:?}"
                    )?;
                }
            }
            Err(InputError::UnexpectedEof { name }) if name == "a" => break,
            Err(InputError::UnexpectedEof { name }) => {
                summary.total += 1;
                warn!(triple, name = name.as_str(), "sample input truncated");
                writeln!(report, "FAILED input triple {triple}: input ends before `{name}`")?;
                break;
            }
            Err(InputError::Io(err)) => return Err(err.into()),
        }
    }
    info!(passed = summary.passed, total = summary.total, "input check finished");
    writeln!(report, "{summary}")?;
    Ok(summary)
}

/// Renders [`SAMPLE_SOLUTIONS`] with [`print_solution`] and compares the
/// result line by line with `reference`.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] on read or write failure.
pub fn check_output<R, W>(reference: R, report: &mut W) -> Result<Summary, HarnessError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut rendered = Vec::new();
    for solution in &SAMPLE_SOLUTIONS {
        print_solution(&mut rendered, solution)?;
    }
    let text = String::from_utf8_lossy(&rendered);
    let reference_lines = reference.lines().collect::<Result<Vec<_>, _>>()?;

    let mut summary = Summary::default();
    let mut actual = text.lines();
    let mut expected = reference_lines.iter().map(String::as_str);
    for line_no in 1.. {
        let (want, got) = match (expected.next(), actual.next()) {
            (None, None) => break,
            pair => pair,
        };
        summary.total += 1;
        if want == got {
            summary.passed += 1;
        } else {
            warn!(line = line_no, ?want, ?got, "output differs from reference");
            writeln!(
                report,
                "FAILED output line {line_no}: expected {:?}, got {:?}",
                want.unwrap_or("<nothing>"),
                got.unwrap_or("<nothing>"),
            )?;
        }
    }
    info!(passed = summary.passed, total = summary.total, "output check finished");
    writeln!(report, "{summary}")?;
    Ok(summary)
}

/// Solves `count` random linear and `count` random quadratic equations
/// drawn from `seed`, and checks every outcome against its equation.
///
/// Linear equations have `k, b` in `[-100, 100)`; quadratic ones have
/// `|a|` in `[1, 10)` and `b, c` in `[-10, 10)`. The same seed always
/// produces the same equations.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] on write failure.
pub fn run_self_check<W>(seed: u64, count: usize, report: &mut W) -> Result<Summary, HarnessError>
where
    W: Write + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut summary = Summary::default();
    for index in 1..=count {
        let k = rng.random_range(-100.0..100.0);
        let b = rng.random_range(-100.0..100.0);
        let solution = solve_linear(k, b);
        let ok = match solution {
            Solution::OneRoot(x) => vanishes(k * x + b),
            Solution::NoRoots | Solution::InfiniteRoots => is_zero(k),
            Solution::TwoRoots(..) | Solution::OutOfRange => false,
        };
        tally(&mut summary, report, ok, format_args!("{k} x + {b} = 0"), &solution)?;

        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let a = sign * rng.random_range(1.0..10.0);
        let b = rng.random_range(-10.0..10.0);
        let c = rng.random_range(-10.0..10.0);
        let solution = solve_quadratic(a, b, c);
        let ok = match solution {
            Solution::NoRoots => b * b - 4.0 * (a * c) < 0.0,
            Solution::OneRoot(_) | Solution::TwoRoots(..) => solution
                .roots()
                .iter()
                .all(|&x| vanishes(a * x * x + b * x + c)),
            Solution::InfiniteRoots | Solution::OutOfRange => false,
        };
        tally(&mut summary, report, ok, format_args!("{a} x^2 + {b} x + {c} = 0"), &solution)?;
        debug!(index, "self-check round done");
    }
    info!(seed, passed = summary.passed, total = summary.total, "self-check finished");
    writeln!(report, "{summary}")?;
    Ok(summary)
}

fn tally<W>(
    summary: &mut Summary,
    report: &mut W,
    ok: bool,
    equation: fmt::Arguments<'_>,
    solution: &Solution,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    summary.total += 1;
    if ok {
        summary.passed += 1;
        return Ok(());
    }
    warn!(%equation, %solution, "self-check case failed");
    writeln!(report, "FAILED self-check: {equation}: got {solution:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_quadratic(text: &str) -> (Summary, String) {
        let mut report = Vec::new();
        let summary = run_quadratic_cases(text.as_bytes(), &mut report).unwrap();
        (summary, String::from_utf8(report).unwrap())
    }

    #[test]
    fn passing_cases() {
        let text = "\
# a b c count x1 x2
1 0 -4 2 2 -2

6 -1 -2 2 -0.5 0.6666666666666666
1 -2 1 1 1
1 0 1 0
0 0 0 -1
1e300 0 1e300 -2
";
        let (summary, report) = run_quadratic(text);
        assert_eq!(summary, Summary { total: 6, passed: 6 });
        assert!(summary.is_success());
        assert_eq!(report, "6/6 cases passed\n");
    }

    #[test]
    fn failing_cases_are_reported() {
        let text = "1 0 -4 2 2 3\n1 0 1 1 0\n5 0 0 1 0\n";
        let (summary, report) = run_quadratic(text);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.failed(), 2);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FAILED line 1:"), "{report}");
        assert!(lines[0].ends_with("roots differ"), "{report}");
        assert!(lines[1].starts_with("FAILED line 2:"), "{report}");
        assert!(lines[1].ends_with("wrong number of roots"), "{report}");
        assert_eq!(lines[2], "1/3 cases passed");
    }

    #[test]
    fn linear_cases() {
        let text = "# k b count x\n3 2 1 -0.6666666666666666\n0 0 -1\n0 5 0\n0.5 1e308 -2\n";
        let mut report = Vec::new();
        let summary = run_linear_cases(text.as_bytes(), &mut report).unwrap();
        assert_eq!(summary, Summary { total: 4, passed: 4 });
    }

    #[test]
    fn malformed_lines() {
        let mut sink = Vec::new();
        for (text, line) in [
            ("1 2\n", 1),
            ("# ok\n1 0 -4 7\n", 2),
            ("1 0 -4 2 2 -2 9\n", 1),
            ("1 x -4 2\n", 1),
        ] {
            match run_quadratic_cases(text.as_bytes(), &mut sink) {
                Err(HarnessError::Parse { line: l, .. }) => assert_eq!(l, line, "{text:?}"),
                other => panic!("expected parse error for {text:?}, got {other:?}"),
            }
        }
        assert!(matches!(
            run_linear_cases("1 2 2 0 0\n".as_bytes(), &mut sink),
            Err(HarnessError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn sample_input() {
        let text = "5 5 5\n5\n  5\toops 9\n5\n\n1e400\n5 5 5\n";
        let mut report = Vec::new();
        let summary = check_input(text.as_bytes(), &mut report).unwrap();
        assert_eq!(summary, Summary { total: 3, passed: 3 });
        assert_eq!(String::from_utf8(report).unwrap(), "3/3 cases passed\n");
    }

    #[test]
    fn sample_input_mismatch_and_truncation() {
        let mut report = Vec::new();
        let summary = check_input("5 5 5\n5 4 5\n5\n".as_bytes(), &mut report).unwrap();
        assert_eq!(summary, Summary { total: 3, passed: 1 });
        let report = String::from_utf8(report).unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert!(lines[0].starts_with("FAILED input triple 2:"), "{report}");
        assert_eq!(lines[1], "FAILED input triple 3: input ends before `b`");
        assert_eq!(lines[2], "1/3 cases passed");
    }

    #[test]
    fn output_matches_reference() {
        let golden = include_str!("../tests/data/print_solution.golden");
        let mut report = Vec::new();
        let summary = check_output(golden.as_bytes(), &mut report).unwrap();
        assert_eq!(summary, Summary { total: 5, passed: 5 });
        assert_eq!(String::from_utf8(report).unwrap(), "5/5 cases passed\n");
    }

    #[test]
    fn output_differences_are_reported() {
        let reference = "\
Failed to solve equation: Coefficients out of range
Infinite number of roots
No solutions
1 solution: 2.280e2
2 solutions: 2.280e2 and 2.820e2
extra line
";
        let mut report = Vec::new();
        let summary = check_output(reference.as_bytes(), &mut report).unwrap();
        assert_eq!(summary, Summary { total: 6, passed: 4 });
        let report = String::from_utf8(report).unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3, "{report}");
        assert!(lines[0].starts_with("FAILED output line 2:"), "{report}");
        assert_eq!(
            lines[1],
            "FAILED output line 6: expected \"extra line\", got \"<nothing>\""
        );
    }

    #[test]
    fn self_check_passes_and_is_repeatable() {
        let mut first = Vec::new();
        let summary = run_self_check(2024, 500, &mut first).unwrap();
        assert_eq!(summary, Summary { total: 1000, passed: 1000 });
        let mut second = Vec::new();
        run_self_check(2024, 500, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap(), "1000/1000 cases passed\n");
    }
}
