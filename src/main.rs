// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `quadroot`: solve `a*x^2 + b*x + c = 0` from the command line.
//!
//! - `quadroot A B C` solves the equation with the given coefficients.
//! - `quadroot -i` asks for the coefficients on standard input.
//! - `quadroot --check-linear FILE` / `--check-quadratic FILE` run case
//!   files, `--check-input FILE` / `--check-output FILE` check the reader
//!   and the output format against sample files, and `--self-check` solves
//!   random equations. All of them print one report.
//!
//! Log output goes to stderr and is controlled by `-v` or `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quadroot::harness::{self, HarnessError, Summary};
use quadroot::{
    parse_finite, print_solution, read_coefficients, solve_quadratic, InputError, Solution,
};

const CHECKS_OR_INTERACTIVE: [&str; 6] = [
    "interactive",
    "check_linear",
    "check_quadratic",
    "check_input",
    "check_output",
    "self_check",
];

/// Solve the equation a*x^2 + b*x + c = 0 for real x
#[derive(Debug, Parser)]
#[command(name = "quadroot", version, about, long_about = None)]
#[command(group(
    ArgGroup::new("check")
        .args(["check_linear", "check_quadratic", "check_input", "check_output", "self_check"])
        .multiple(true)
))]
struct Args {
    /// Quadratic coefficient
    #[arg(
        value_name = "A",
        allow_negative_numbers = true,
        value_parser = parse_coefficient,
        required_unless_present_any = CHECKS_OR_INTERACTIVE
    )]
    a: Option<f64>,

    /// Linear coefficient
    #[arg(
        value_name = "B",
        allow_negative_numbers = true,
        value_parser = parse_coefficient,
        required_unless_present_any = CHECKS_OR_INTERACTIVE
    )]
    b: Option<f64>,

    /// Free coefficient
    #[arg(
        value_name = "C",
        allow_negative_numbers = true,
        value_parser = parse_coefficient,
        required_unless_present_any = CHECKS_OR_INTERACTIVE
    )]
    c: Option<f64>,

    /// Ask for the coefficients on standard input
    #[arg(short, long, conflicts_with_all = ["a", "b", "c", "check"])]
    interactive: bool,

    /// Run linear cases (`k b count [x]` per line) from FILE
    #[arg(long, value_name = "FILE", conflicts_with_all = ["a", "b", "c"])]
    check_linear: Option<PathBuf>,

    /// Run quadratic cases (`a b c count [x1 [x2]]` per line) from FILE
    #[arg(long, value_name = "FILE", conflicts_with_all = ["a", "b", "c"])]
    check_quadratic: Option<PathBuf>,

    /// Check that every coefficient triple read from FILE is `5 5 5`
    #[arg(long, value_name = "FILE", conflicts_with_all = ["a", "b", "c"])]
    check_input: Option<PathBuf>,

    /// Compare the rendering of the sample solutions with FILE
    #[arg(long, value_name = "FILE", conflicts_with_all = ["a", "b", "c"])]
    check_output: Option<PathBuf>,

    /// Solve COUNT random linear and quadratic equations and check the results
    #[arg(
        long,
        value_name = "COUNT",
        num_args = 0..=1,
        default_missing_value = "1000",
        conflicts_with_all = ["a", "b", "c"]
    )]
    self_check: Option<usize>,

    /// Seed for --self-check
    #[arg(long, default_value_t = 2024, requires = "self_check")]
    seed: u64,

    /// Write the check report to FILE instead of standard output
    #[arg(long, value_name = "FILE", requires = "check")]
    report: Option<PathBuf>,

    /// Log more (-v for progress, -vv for every step)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn coefficients(&self) -> Option<[f64; 3]> {
        Some([self.a?, self.b?, self.c?])
    }

    fn is_check(&self) -> bool {
        self.check_linear.is_some()
            || self.check_quadratic.is_some()
            || self.check_input.is_some()
            || self.check_output.is_some()
            || self.self_check.is_some()
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Harness(#[from] HarnessError),
    #[error("cannot open `{}`: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
    #[error("coefficients out of range")]
    OutOfRange,
    #[error("{failed} of {total} cases failed")]
    CasesFailed { failed: usize, total: usize },
}

fn parse_coefficient(arg: &str) -> Result<f64, String> {
    parse_finite(arg).ok_or_else(|| format!("`{arg}` is not a finite number"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(?err, "exiting with failure");
            eprintln!("quadroot: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    if args.is_check() {
        return check(args);
    }

    let mut out = io::stdout().lock();
    let [a, b, c] = match args.coefficients() {
        Some(coefficients) => coefficients,
        None => {
            writeln!(out, "Enter coefficients of a*x^2 + b*x + c = 0")?;
            read_coefficients(&mut io::stdin().lock(), &mut out, ["a", "b", "c"])?
        }
    };

    info!(a, b, c, "solving");
    let solution = solve_quadratic(a, b, c);
    print_solution(&mut out, &solution)?;
    out.flush()?;
    if solution == Solution::OutOfRange {
        return Err(CliError::OutOfRange);
    }
    Ok(())
}

fn check(args: &Args) -> Result<(), CliError> {
    let mut report: Box<dyn Write> = match &args.report {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|source| {
            CliError::Open {
                path: path.clone(),
                source,
            }
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut total = Summary::default();
    let mut add = |summary: Summary| {
        total.total += summary.total;
        total.passed += summary.passed;
    };
    if let Some(path) = &args.check_linear {
        info!(path = %path.display(), "running linear cases");
        add(harness::run_linear_cases(open(path)?, &mut report)?);
    }
    if let Some(path) = &args.check_quadratic {
        info!(path = %path.display(), "running quadratic cases");
        add(harness::run_quadratic_cases(open(path)?, &mut report)?);
    }
    if let Some(path) = &args.check_input {
        info!(path = %path.display(), "reading sample input");
        add(harness::check_input(open(path)?, &mut report)?);
    }
    if let Some(path) = &args.check_output {
        info!(path = %path.display(), "comparing sample output");
        add(harness::check_output(open(path)?, &mut report)?);
    }
    if let Some(count) = args.self_check {
        info!(seed = args.seed, count, "running self-check");
        add(harness::run_self_check(args.seed, count, &mut report)?);
    }
    report.flush()?;

    if total.is_success() {
        Ok(())
    } else {
        Err(CliError::CasesFailed {
            failed: total.failed(),
            total: total.total,
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CliError::Open {
            path: path.to_path_buf(),
            source,
        })
}
