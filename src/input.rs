// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive reading of coefficients.

use std::io::{self, BufRead, Write};

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info};

/// Printed when a token is not a finite number.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, try again";

/// Failure to read coefficients.
#[derive(Debug, Error)]
pub enum InputError {
    /// The stream ended before every coefficient was read.
    #[error("unexpected end of input while reading `{name}`")]
    UnexpectedEof {
        /// Name of the coefficient being read.
        name: String,
    },
    /// Reading the input or writing a prompt failed.
    #[error("i/o error while reading coefficients: {0}")]
    Io(#[from] io::Error),
}

/// Reads one finite number for each of `names` from `input`.
///
/// Numbers are separated by whitespace and may be spread over any number of
/// lines. Whenever a new line is needed, `"{name} = "` is written to
/// `prompt`. A token that does not parse as a finite `f64`, or a line that
/// is not valid UTF-8, is reported on `prompt`; the rest of the line is
/// discarded and the same coefficient is asked for again.
///
/// # Errors
///
/// Returns [`InputError::UnexpectedEof`] if `input` ends before all values
/// are read, and [`InputError::Io`] on any read or write failure.
///
/// # Examples
///
/// ```
/// use quadroot::read_coefficients;
///
/// let mut input = "1 oops\n-2\n3 -4\n".as_bytes();
/// let mut prompt = Vec::new();
/// let [a, b, c] = read_coefficients(&mut input, &mut prompt, ["a", "b", "c"]).unwrap();
/// assert_eq!((a, b, c), (1.0, -2.0, 3.0));
/// ```
pub fn read_coefficients<const N: usize, R, W>(
    input: &mut R,
    prompt: &mut W,
    names: [&str; N],
) -> Result<[f64; N], InputError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut values = [0.0; N];
    // Unread tokens of the current line, last token first.
    let mut pending: SmallVec<[String; 3]> = SmallVec::new();
    let mut line = Vec::new();
    for (slot, name) in values.iter_mut().zip(names) {
        loop {
            let Some(token) = pending.pop() else {
                write!(prompt, "{name} = ")?;
                prompt.flush()?;
                line.clear();
                if input.read_until(b'\n', &mut line)? == 0 {
                    return Err(InputError::UnexpectedEof { name: name.into() });
                }
                match std::str::from_utf8(&line) {
                    Ok(text) => pending.extend(text.split_whitespace().rev().map(str::to_owned)),
                    Err(err) => {
                        info!(name, %err, "rejected line that is not UTF-8");
                        writeln!(prompt, "{INVALID_INPUT_MESSAGE}")?;
                    }
                }
                continue;
            };
            match parse_finite(&token) {
                Some(value) => {
                    debug!(name, value, "read coefficient");
                    *slot = value;
                    break;
                }
                None => {
                    info!(name, token = token.as_str(), "rejected malformed coefficient");
                    pending.clear();
                    writeln!(prompt, "{INVALID_INPUT_MESSAGE}")?;
                }
            }
        }
    }
    Ok(values)
}

/// Parses `token` as a finite `f64`.
///
/// Literals that overflow (such as `1e400`) and spelled-out infinities or
/// NaNs are rejected.
pub fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|x| x.is_finite())
}
