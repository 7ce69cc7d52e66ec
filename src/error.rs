use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A line of puzzle input could not be understood.
    #[error("invalid input line {line:?}: {reason}")]
    Parse { line: String, reason: String },

    /// An internal consistency check failed; this is a bug, not bad input.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("failed to read puzzle input from {path}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn parse(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse { line: line.into(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("inverted gap between segments: [{start}, {end})")]
    InvertedGap { start: i64, end: i64 },

    #[error("{value} is not covered by any segment")]
    Uncovered { value: i64 },

    #[error("{value} is covered by {hits} segments")]
    Ambiguous { value: i64, hits: usize },

    // `actual` is summed in i128: double-counted segments can exceed i64::MAX.
    #[error("composed mapping does not cover the domain: {actual} != {expected}")]
    CoverageMismatch { expected: i64, actual: i128 },
}
