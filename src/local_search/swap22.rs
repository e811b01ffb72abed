//! Swap(2,2) neighborhood.

use crate::context::SearchContext;
use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;
use itertools::Itertools;

use super::utils::{build_candidate_list, coverage_change};
use super::LocalSearch;

impl LocalSearch {
    /// Best-improvement exploration of Swap(2,2).
    ///
    /// The full neighborhood is quartic in the solution size, so only the
    /// first-improvement scan is supported and this returns no moves.
    pub fn swap22_moves(
        &self,
        _solution: &Solution,
        _instance: &Instance,
        _ctx: &SearchContext,
    ) -> Vec<Move> {
        Vec::new()
    }

    /// Return the first (2,2)-exchange that strictly increases coverage.
    ///
    /// Outgoing pairs come from the chosen sets, incoming pairs from the
    /// Swap(2,2) candidate list. The time budget is polled once per outgoing pair.
    pub fn first_improving_swap22(
        &self,
        solution: &Solution,
        instance: &Instance,
        ctx: &SearchContext,
    ) -> Option<Move> {
        let candidates = build_candidate_list(solution, instance, self.swap22_candidates);
        if solution.score() < 2 || candidates.len() < 2 {
            return None;
        }

        let in_pairs: Vec<(usize, usize)> =
            candidates.iter().copied().tuple_combinations().collect();

        for (out1, out2) in solution.chosen_list().into_iter().tuple_combinations() {
            if ctx.is_time_up() {
                return None;
            }

            for &(in1, in2) in &in_pairs {
                let change = coverage_change(solution, instance, &[out1, out2], &[in1, in2]);
                if change > 0 {
                    return Some(Move::Swap22 {
                        sets_out: [out1, out2],
                        sets_in: [in1, in2],
                        coverage_change: change,
                    });
                }
            }
        }

        None
    }
}
