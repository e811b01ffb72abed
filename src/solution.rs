//! Solution representation for the PSCP.

use crate::error::CoverageShortfall;
use crate::problem::Instance;
use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of points a feasible solution must cover, as `NUMERATOR / DENOMINATOR`.
pub const COVERAGE_NUMERATOR: usize = 9;
pub const COVERAGE_DENOMINATOR: usize = 10;

/// Minimum number of covered points for an instance with `n_points` points.
pub fn min_covered_required(n_points: usize) -> usize {
    (n_points * COVERAGE_NUMERATOR).div_ceil(COVERAGE_DENOMINATOR)
}

/// A set selection together with incrementally maintained cover counts.
///
/// `cover_count[p]` always equals the number of chosen sets covering `p`.
/// All mutation goes through [`Solution::add_set`] and [`Solution::remove_set`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    chosen_sets: FixedBitSet,
    cover_count: Vec<u32>,
    /// Points with a non-zero cover count
    covered: FixedBitSet,
    n_chosen: usize,
    n_covered: usize,
    min_covered_required: usize,
}

impl Solution {
    /// Create a new, empty solution for `instance`.
    pub fn new(instance: &Instance) -> Self {
        Solution {
            chosen_sets: FixedBitSet::with_capacity(instance.n_sets()),
            cover_count: vec![0; instance.n_points()],
            covered: FixedBitSet::with_capacity(instance.n_points()),
            n_chosen: 0,
            n_covered: 0,
            min_covered_required: min_covered_required(instance.n_points()),
        }
    }

    /// Add `set` to the solution and return how many points became covered.
    ///
    /// Panics if `set` is already chosen.
    pub fn add_set(&mut self, instance: &Instance, set: usize) -> usize {
        assert!(
            !self.chosen_sets.contains(set),
            "set {} is already part of the solution",
            set
        );
        self.chosen_sets.insert(set);
        self.n_chosen += 1;

        let mut newly_covered = 0;
        for point in instance.covered_points(set).ones() {
            self.cover_count[point] += 1;
            if self.cover_count[point] == 1 {
                self.covered.insert(point);
                newly_covered += 1;
            }
        }
        self.n_covered += newly_covered;

        newly_covered
    }

    /// Remove `set` from the solution and return how many points became uncovered.
    ///
    /// Panics if `set` is not chosen.
    pub fn remove_set(&mut self, instance: &Instance, set: usize) -> usize {
        assert!(
            self.chosen_sets.contains(set),
            "set {} is not part of the solution",
            set
        );
        self.chosen_sets.set(set, false);
        self.n_chosen -= 1;

        let mut newly_uncovered = 0;
        for point in instance.covered_points(set).ones() {
            self.cover_count[point] -= 1;
            if self.cover_count[point] == 0 {
                self.covered.set(point, false);
                newly_uncovered += 1;
            }
        }
        self.n_covered -= newly_uncovered;

        newly_uncovered
    }

    /// Objective value: the number of chosen sets (minimised).
    pub fn score(&self) -> usize {
        self.n_chosen
    }

    pub fn contains(&self, set: usize) -> bool {
        self.chosen_sets.contains(set)
    }

    pub fn chosen_sets(&self) -> &FixedBitSet {
        &self.chosen_sets
    }

    /// Chosen set ids in increasing order.
    pub fn chosen_list(&self) -> Vec<usize> {
        self.chosen_sets.ones().collect()
    }

    pub fn cover_count(&self) -> &[u32] {
        &self.cover_count
    }

    /// Points covered by at least one chosen set.
    pub fn covered_points(&self) -> &FixedBitSet {
        &self.covered
    }

    /// Number of covered points.
    pub fn coverage(&self) -> usize {
        self.n_covered
    }

    pub fn min_covered_required(&self) -> usize {
        self.min_covered_required
    }

    pub fn is_feasible(&self) -> bool {
        self.n_covered >= self.min_covered_required
    }

    /// Points still missing to reach the feasibility threshold.
    pub fn coverage_gap(&self) -> usize {
        self.min_covered_required.saturating_sub(self.n_covered)
    }

    /// Check feasibility, reporting the shortfall when infeasible.
    pub fn validate(&self) -> Result<(), CoverageShortfall> {
        if self.is_feasible() {
            Ok(())
        } else {
            Err(CoverageShortfall {
                covered: self.n_covered,
                required: self.min_covered_required,
            })
        }
    }

    /// Recompute the cover counts from scratch.
    pub fn recount(&self, instance: &Instance) -> Vec<u32> {
        let mut counts = vec![0; instance.n_points()];
        for set in self.chosen_sets.ones() {
            for point in instance.covered_points(set).ones() {
                counts[point] += 1;
            }
        }
        counts
    }

    /// Check every cached quantity against a from-scratch recomputation.
    pub fn is_consistent(&self, instance: &Instance) -> bool {
        let counts = self.recount(instance);
        let covered = counts.iter().filter(|&&c| c > 0).count();

        counts == self.cover_count
            && covered == self.n_covered
            && covered == self.covered.count_ones(..)
            && self.n_chosen == self.chosen_sets.count_ones(..)
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Score: {}", self.n_chosen)?;
        writeln!(
            f,
            "  Coverage: {} / {} required",
            self.n_covered, self.min_covered_required
        )?;
        writeln!(f, "  Feasible: {}", self.is_feasible())?;
        writeln!(f, "  Sets: {:?}", self.chosen_list())
    }
}
