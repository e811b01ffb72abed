//! Swap neighborhood for local search.

use crate::context::SearchContext;
use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;

use super::utils::{build_candidate_list, coverage_change};
use super::LocalSearch;

impl LocalSearch {
    /// Enumerate feasible (1,1)-exchanges against the candidate list.
    ///
    /// The number of chosen sets is unchanged; each move carries its coverage
    /// change so the descent can prefer swaps that widen the coverage margin.
    pub fn swap_moves(
        &self,
        solution: &Solution,
        instance: &Instance,
        ctx: &SearchContext,
    ) -> Vec<Move> {
        let candidates = build_candidate_list(solution, instance, self.swap_candidates);
        let covered = solution.coverage() as i64;
        let required = solution.min_covered_required() as i64;
        let mut moves = Vec::new();

        for set_out in solution.chosen_sets().ones() {
            if ctx.is_time_up() {
                break;
            }

            for &set_in in &candidates {
                let change = coverage_change(solution, instance, &[set_out], &[set_in]);
                if covered + change >= required {
                    moves.push(Move::Swap {
                        set_out,
                        set_in,
                        coverage_change: change,
                    });
                }
            }
        }

        moves
    }
}
