//! Problem definition and data structures for the PSCP.

use crate::error::ParseError;
use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::iter::Peekable;
use std::str::SplitWhitespace;

/// Represents a PSCP instance: which points each set covers.
///
/// Immutable once built. Sets that cover nothing, or whose coverage is
/// contained in another set's coverage, are flagged as useless and are
/// never considered by the constructives, neighborhoods or shakes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    n_sets: usize,
    n_points: usize,
    coverage: Vec<FixedBitSet>,
    useless_sets: FixedBitSet,
}

impl Instance {
    /// Create a new instance from the per-set coverage bit vectors.
    pub fn new(name: String, n_points: usize, coverage: Vec<FixedBitSet>) -> Self {
        let n_sets = coverage.len();
        debug_assert!(coverage.iter().all(|c| c.len() == n_points));
        let useless_sets = Self::find_useless_sets(&coverage);

        Instance {
            name,
            n_sets,
            n_points,
            coverage,
            useless_sets,
        }
    }

    /// Create an instance from explicit lists of 0-based point indices, one list per set.
    ///
    /// Panics if a point index is `>= n_points`.
    pub fn from_sets(name: &str, n_points: usize, sets: &[Vec<usize>]) -> Self {
        let coverage = sets
            .iter()
            .map(|points| {
                let mut bits = FixedBitSet::with_capacity(n_points);
                for &p in points {
                    bits.insert(p);
                }
                bits
            })
            .collect();

        Instance::new(name.to_string(), n_points, coverage)
    }

    /// Mark empty and dominated sets.
    ///
    /// `j` is dominated by `i` when `coverage[j] ⊆ coverage[i]`. Among sets
    /// with identical coverage only the lowest index survives.
    fn find_useless_sets(coverage: &[FixedBitSet]) -> FixedBitSet {
        let n_sets = coverage.len();
        let mut useless = FixedBitSet::with_capacity(n_sets);

        for (i, set) in coverage.iter().enumerate() {
            if set.is_clear() {
                useless.insert(i);
                continue;
            }

            for (j, other) in coverage.iter().enumerate() {
                if i == j || useless.contains(j) {
                    continue;
                }
                if other.is_subset(set) && (j > i || !set.is_subset(other)) {
                    useless.insert(j);
                }
            }
        }

        useless
    }

    /// Number of sets in the instance.
    pub fn n_sets(&self) -> usize {
        self.n_sets
    }

    /// Number of points in the instance.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Points covered by `set`.
    pub fn covered_points(&self, set: usize) -> &FixedBitSet {
        &self.coverage[set]
    }

    pub fn coverage(&self) -> &[FixedBitSet] {
        &self.coverage
    }

    pub fn is_useless(&self, set: usize) -> bool {
        self.useless_sets.contains(set)
    }

    pub fn useless_sets(&self) -> &FixedBitSet {
        &self.useless_sets
    }

    pub fn n_useless_sets(&self) -> usize {
        self.useless_sets.count_ones(..)
    }

    /// Iterate over the sets the search is allowed to pick.
    pub fn useful_sets(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_sets).filter(move |&s| !self.useless_sets.contains(s))
    }

    /// Load an instance from a file. The instance name is the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::parse(&name, &content)
    }

    /// Parse an instance in the point-major text format:
    ///
    /// ```text
    /// m n
    /// c1 c2 ... cn          (set costs, ignored)
    /// k s1 s2 ... sk        (repeated m times, 1-based set indices)
    /// ```
    pub fn parse(name: &str, input: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(input);

        let n_points = tokens.next_usize(|| "number of points".to_string())?;
        let n_sets = tokens.next_usize(|| "number of sets".to_string())?;
        if n_points == 0 || n_sets == 0 {
            return Err(ParseError::EmptyInstance);
        }

        for set in 0..n_sets {
            tokens.next_cost(|| format!("cost of set {}", set + 1))?;
        }

        let mut coverage = vec![FixedBitSet::with_capacity(n_points); n_sets];
        for point in 0..n_points {
            let k = tokens.next_usize(|| format!("cover count of point {}", point + 1))?;
            for i in 0..k {
                let index = tokens
                    .next_usize(|| format!("set {} of {} covering point {}", i + 1, k, point + 1))?;
                if index == 0 || index > n_sets {
                    return Err(ParseError::SetIndexOutOfRange {
                        point: point + 1,
                        index,
                        n_sets,
                    });
                }
                coverage[index - 1].insert(point);
            }
        }

        let instance = Instance::new(name.to_string(), n_points, coverage);
        log::debug!(
            "Loaded instance {}: {} points, {} sets ({} useless)",
            instance.name,
            instance.n_points,
            instance.n_sets,
            instance.n_useless_sets()
        );

        Ok(instance)
    }
}

/// Whitespace tokenizer shared by the instance and solution readers.
pub(crate) struct Tokens<'a> {
    iter: Peekable<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Tokens {
            iter: input.split_whitespace().peekable(),
        }
    }

    pub(crate) fn next_usize<F>(&mut self, expected: F) -> Result<usize, ParseError>
    where
        F: FnOnce() -> String,
    {
        match self.iter.next() {
            Some(token) => token.parse().map_err(|_| ParseError::InvalidToken {
                token: token.to_string(),
                expected: expected(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected(),
            }),
        }
    }

    fn next_cost<F>(&mut self, expected: F) -> Result<f64, ParseError>
    where
        F: FnOnce() -> String,
    {
        match self.iter.next() {
            Some(token) => token.parse().map_err(|_| ParseError::InvalidToken {
                token: token.to_string(),
                expected: expected(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected(),
            }),
        }
    }

    pub(crate) fn is_exhausted(&mut self) -> bool {
        self.iter.peek().is_none()
    }
}
