//! Parse the textual input into raw ranges and points.
//!
//! Each non-empty line is either a range `<low>-<high>` or a single
//! integer point. Bounds may be negative: the range separator is the
//! first `-` that follows a digit, so `-5--3` is the range `[-5, -3]`.

use crate::config::MalformedPolicy;
use coalesce_types::{Interval, IntervalError, RawRanges};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("line {line}: expected \"<low>-<high>\" or an integer, got {content:?}")]
    InvalidLine { line: usize, content: String },

    #[error("line {line}: {error}")]
    Malformed { line: usize, error: IntervalError },
}

/// Parsed input.
#[derive(Debug, Default)]
pub struct Input {
    /// Ranges, in input order.
    pub ranges: RawRanges,

    /// Points, in input order.
    pub points: Vec<i64>,

    /// Malformed ranges that were dropped under [MalformedPolicy::Skip].
    pub skipped: Vec<InputError>,
}

/// Parse all lines of `text`.
///
/// Malformed ranges are dropped or reported as an error depending on
/// `policy`; any other unparseable line is an error.
pub fn parse(text: &str, policy: MalformedPolicy) -> Result<Input, InputError> {
    let mut input = Input::default();
    for (index, line) in text.lines().enumerate() {
        let lineno = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let invalid = || InputError::InvalidLine {
            line: lineno,
            content: line.to_string(),
        };

        if let Some((low, high)) = split_range(line) {
            let low = low.trim().parse::<i64>().map_err(|_| invalid())?;
            let high = high.trim().parse::<i64>().map_err(|_| invalid())?;
            match Interval::new(low, high) {
                Ok(interval) => input.ranges.push(interval),
                Err(error) => {
                    let err = InputError::Malformed {
                        line: lineno,
                        error,
                    };
                    match policy {
                        MalformedPolicy::Skip => input.skipped.push(err),
                        MalformedPolicy::Fail => return Err(err),
                    }
                }
            }
        } else {
            input.points.push(line.parse::<i64>().map_err(|_| invalid())?);
        }
    }

    Ok(input)
}

/// Split `<low>-<high>` at the first `-` that follows a digit.
fn split_range(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    (1..bytes.len())
        .find(|&i| bytes[i] == b'-' && bytes[i - 1].is_ascii_digit())
        .map(|i| (&line[..i], &line[i + 1..]))
}
