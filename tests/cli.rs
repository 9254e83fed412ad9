// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_quadroot"))
}

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("run quadroot")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = bin()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn quadroot");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("wait for quadroot")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn two_roots_from_arguments() {
    let output = run(&["1", "0", "-4"]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("2 solutions: "), "{text}");
    assert!(text.contains("-2.000e0"), "{text}");
    assert!(text.contains(" 2.000e0"), "{text}");
    assert!(text.ends_with('\n'));
}

#[test]
fn one_root_from_arguments() {
    let output = run(&["1", "-2", "1"]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "1 solution: 1.000e0\n");
}

#[test]
fn degenerate_equations() {
    let output = run(&["0", "0", "0"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Infinitive number of roots\n");

    let output = run(&["0", "0", "5"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No solutions\n");

    let output = run(&["0", "3", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 solution: -6.667e-1\n");
}

#[test]
fn out_of_range_fails() {
    let output = run(&["1e300", "0", "1e300"]);
    assert!(!output.status.success(), "unexpected success");
    assert_eq!(
        stdout(&output),
        "Failed to solve equation: Coefficients out of range\n"
    );
    assert!(stderr(&output).contains("out of range"), "{}", stderr(&output));
}

#[test]
fn bad_arguments_fail() {
    let cases: [&[&str]; 4] = [&["1", "x", "2"], &["1", "2"], &["1", "inf", "2"], &[]];
    for args in cases {
        let output = run(args);
        assert!(!output.status.success(), "{args:?} unexpectedly succeeded");
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn help_succeeds() {
    let output = run(&["-h"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Usage"), "{text}");
    assert!(text.contains("--interactive"), "{text}");
}

#[test]
fn interactive_mode() {
    let output = run_with_stdin(&["-i"], "1\n-2\n1\n");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Enter coefficients of a*x^2 + b*x + c = 0\na = b = c = 1 solution: 1.000e0\n"
    );
}

#[test]
fn interactive_mode_reprompts() {
    let output = run_with_stdin(&["--interactive"], "oops 1\n1 0 -4\n");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("a = Invalid input, try again\na = "), "{text}");
    assert!(text.contains("2 solutions: "), "{text}");
}

#[test]
fn interactive_mode_reprompts_after_invalid_utf8() {
    let mut child = bin()
        .arg("-i")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn quadroot");
    child.stdin.take().unwrap().write_all(b"\xff\xfe\n1 -2 1\n").unwrap();
    let output = child.wait_with_output().expect("wait for quadroot");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Enter coefficients of a*x^2 + b*x + c = 0\na = Invalid input, try again\na = 1 solution: 1.000e0\n"
    );
}

#[test]
fn interactive_mode_fails_on_eof() {
    let output = run_with_stdin(&["-i"], "1 2\n");
    assert!(!output.status.success(), "unexpected success");
    assert!(
        stderr(&output).contains("unexpected end of input"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn case_files_pass() {
    let linear = data("linear_cases.txt");
    let quadratic = data("quadratic_cases.txt");
    let output = bin()
        .arg("--check-linear")
        .arg(&linear)
        .arg("--check-quadratic")
        .arg(&quadratic)
        .output()
        .expect("run quadroot");
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
    let text = stdout(&output);
    assert!(!text.contains("FAILED"), "{text}");
    assert_eq!(text.lines().count(), 2, "{text}");
    assert!(text.lines().all(|l| l.ends_with("cases passed")), "{text}");
}

#[test]
fn failing_cases_go_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let cases = dir.path().join("cases.txt");
    let report = dir.path().join("report.txt");
    fs::write(&cases, "1 0 -4 2 -2 2\n1 0 1 2 1 -1\n").unwrap();

    let output = bin()
        .arg("--check-quadratic")
        .arg(&cases)
        .arg("--report")
        .arg(&report)
        .output()
        .expect("run quadroot");
    assert!(!output.status.success(), "unexpected success");
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("1 of 2 cases failed"), "{}", stderr(&output));

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("FAILED line 2:"), "{text}");
    assert!(text.ends_with("1/2 cases passed\n"), "{text}");
}

#[test]
fn sample_checks_pass() {
    let output = bin()
        .arg("--check-input")
        .arg(data("sample_input.txt"))
        .arg("--check-output")
        .arg(data("print_solution.golden"))
        .args(["--self-check", "200", "--seed", "7"])
        .output()
        .expect("run quadroot");
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
    assert_eq!(
        stdout(&output),
        "6/6 cases passed\n5/5 cases passed\n400/400 cases passed\n"
    );
}

#[test]
fn wrong_reference_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("output.txt");
    fs::write(&reference, "No solutions\n").unwrap();
    let output = bin()
        .arg("--check-output")
        .arg(&reference)
        .output()
        .expect("run quadroot");
    assert!(!output.status.success(), "unexpected success");
    let text = stdout(&output);
    assert!(text.starts_with("FAILED output line 1:"), "{text}");
    assert!(text.ends_with("0/5 cases passed\n"), "{text}");
}

#[test]
fn seed_requires_self_check() {
    let output = run(&["--seed", "3", "1", "2", "3"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_case_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = bin()
        .arg("--check-linear")
        .arg(dir.path().join("nope.txt"))
        .output()
        .expect("run quadroot");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot open"), "{}", stderr(&output));
}
