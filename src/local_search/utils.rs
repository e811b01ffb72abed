//! Utility functions for local search operations.

use crate::problem::Instance;
use crate::solution::Solution;
use fixedbitset::FixedBitSet;
use std::cmp::Reverse;

/// Points whose cover count is at most one.
///
/// These are the points where an incoming set can make the most difference:
/// either they are uncovered, or a single removal would uncover them.
pub fn weak_points(solution: &Solution) -> FixedBitSet {
    let counts = solution.cover_count();
    let mut weak = FixedBitSet::with_capacity(counts.len());
    for (point, &count) in counts.iter().enumerate() {
        if count <= 1 {
            weak.insert(point);
        }
    }
    weak
}

/// Generate the list of promising incoming sets, bounded by `size`.
///
/// Candidates are unchosen, useful sets scored by the number of weak points
/// they cover, sorted by decreasing score (ties by index). Sets covering no
/// weak point are left out.
pub fn build_candidate_list(solution: &Solution, instance: &Instance, size: usize) -> Vec<usize> {
    let weak = weak_points(solution);

    let mut candidates: Vec<(usize, usize)> = instance
        .useful_sets()
        .filter(|&set| !solution.contains(set))
        .map(|set| (set, instance.covered_points(set).intersection_count(&weak)))
        .filter(|&(_, score)| score > 0)
        .collect();

    candidates.sort_by_key(|&(_, score)| Reverse(score));
    candidates.truncate(size);

    candidates.into_iter().map(|(set, _)| set).collect()
}

/// Number of points only covered by `set`, i.e. uncovered if it is removed.
pub fn uniquely_covered(solution: &Solution, instance: &Instance, set: usize) -> usize {
    let counts = solution.cover_count();
    instance
        .covered_points(set)
        .ones()
        .filter(|&point| counts[point] == 1)
        .count()
}

/// Number of currently uncovered points that `set` would cover.
pub fn uncovered_gain(solution: &Solution, instance: &Instance, set: usize) -> usize {
    instance
        .covered_points(set)
        .difference_count(solution.covered_points())
}

/// Net change in covered points if `removed` leave and `added` enter the solution.
///
/// Works from the current cover counts and visits each affected point once,
/// so points shared by several removed or added sets are not double counted.
/// `removed` must be chosen and `added` unchosen.
pub fn coverage_change(
    solution: &Solution,
    instance: &Instance,
    removed: &[usize],
    added: &[usize],
) -> i64 {
    let counts = solution.cover_count();
    let affected = || removed.iter().chain(added.iter()).copied();
    let mut change = 0i64;

    for (i, set) in affected().enumerate() {
        for point in instance.covered_points(set).ones() {
            // Already handled by an earlier affected set.
            if affected()
                .take(i)
                .any(|other| instance.covered_points(other).contains(point))
            {
                continue;
            }

            let mut after = counts[point] as i64;
            after -= removed
                .iter()
                .filter(|&&r| instance.covered_points(r).contains(point))
                .count() as i64;
            after += added
                .iter()
                .filter(|&&a| instance.covered_points(a).contains(point))
                .count() as i64;

            change += (after > 0) as i64 - (counts[point] > 0) as i64;
        }
    }

    change
}

/// Find the candidate covering the most uncovered points.
///
/// Only the top `size` candidates of [`build_candidate_list`] are examined.
pub fn best_repair_set(solution: &Solution, instance: &Instance, size: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for set in build_candidate_list(solution, instance, size) {
        let gain = uncovered_gain(solution, instance, set);
        if best.map_or(true, |(_, best_gain)| gain > best_gain) {
            best = Some((set, gain));
        }
    }

    best.map(|(set, _)| set)
}
