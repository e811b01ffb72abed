//! Error types for instance/solution parsing and solution validation.

use std::io;
use thiserror::Error;

/// Errors raised while reading an instance or a solution file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// The input ended while `expected` was still being read.
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: String },

    /// A token could not be parsed as the integer the record requires.
    #[error("invalid token `{token}` while reading {expected}")]
    InvalidToken { token: String, expected: String },

    #[error("instance declares zero points or zero sets")]
    EmptyInstance,

    /// A point row references a set that does not exist.
    #[error("point {point} references set {index}, but the instance only has {n_sets} sets")]
    SetIndexOutOfRange {
        point: usize,
        index: usize,
        n_sets: usize,
    },

    #[error("solution references set {set}, but the instance only has {n_sets} sets")]
    UnknownSet { set: usize, n_sets: usize },

    #[error("set {set} appears more than once in the solution")]
    DuplicateSet { set: usize },

    /// The solution header does not match the number of listed sets.
    #[error("solution declares {declared} sets but lists {found}")]
    LengthMismatch { declared: usize, found: usize },
}

/// Returned by [`crate::solution::Solution::validate`] when too few points are covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("current coverage ({covered}) < required coverage ({required})")]
pub struct CoverageShortfall {
    pub covered: usize,
    pub required: usize,
}

impl CoverageShortfall {
    /// Number of additional points that must be covered to become feasible.
    pub fn gap(&self) -> usize {
        self.required - self.covered
    }
}
