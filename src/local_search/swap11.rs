//! Swap(1,1) neighborhood: fixed-size exchanges scored by coverage.

use crate::context::SearchContext;
use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;

use super::utils::{build_candidate_list, coverage_change};
use super::LocalSearch;

impl LocalSearch {
    /// Enumerate all (1,1)-exchanges between chosen sets and the candidate list.
    pub fn swap11_moves(
        &self,
        solution: &Solution,
        instance: &Instance,
        ctx: &SearchContext,
    ) -> Vec<Move> {
        let candidates = build_candidate_list(solution, instance, self.swap_candidates);
        let mut moves = Vec::with_capacity(solution.score() * candidates.len());

        for set_out in solution.chosen_sets().ones() {
            if ctx.is_time_up() {
                break;
            }

            for &set_in in &candidates {
                moves.push(Move::Swap11 {
                    set_out,
                    set_in,
                    coverage_change: coverage_change(solution, instance, &[set_out], &[set_in]),
                });
            }
        }

        moves
    }

    /// Return the first (1,1)-exchange that strictly increases coverage.
    pub fn first_improving_swap11(
        &self,
        solution: &Solution,
        instance: &Instance,
        ctx: &SearchContext,
    ) -> Option<Move> {
        let candidates = build_candidate_list(solution, instance, self.swap_candidates);

        for set_out in solution.chosen_sets().ones() {
            if ctx.is_time_up() {
                return None;
            }

            for &set_in in &candidates {
                let change = coverage_change(solution, instance, &[set_out], &[set_in]);
                if change > 0 {
                    return Some(Move::Swap11 {
                        set_out,
                        set_in,
                        coverage_change: change,
                    });
                }
            }
        }

        None
    }
}
