//! Swap-and-Drop neighborhood: a swap that frees a third set.

use crate::context::SearchContext;
use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;

use super::utils::{build_candidate_list, coverage_change};
use super::LocalSearch;

impl LocalSearch {
    /// Enumerate swaps after which another chosen set becomes droppable.
    ///
    /// For each feasible swap `(set_out, set_in)` the cover counts after the
    /// swap are derived on the fly; a chosen set `set_drop != set_out` is
    /// droppable if the points it would be the only coverer of do not push
    /// coverage below the required minimum.
    pub fn swap_and_drop_moves(
        &self,
        solution: &Solution,
        instance: &Instance,
        ctx: &SearchContext,
    ) -> Vec<Move> {
        if solution.score() < 2 {
            return Vec::new();
        }

        let candidates = build_candidate_list(solution, instance, self.swap_candidates);
        let chosen = solution.chosen_list();
        let counts = solution.cover_count();
        let covered = solution.coverage() as i64;
        let required = solution.min_covered_required() as i64;
        let mut moves = Vec::new();

        for &set_out in &chosen {
            if ctx.is_time_up() {
                break;
            }
            let out_points = instance.covered_points(set_out);

            for &set_in in &candidates {
                let after_swap =
                    covered + coverage_change(solution, instance, &[set_out], &[set_in]);
                if after_swap < required {
                    continue;
                }
                let in_points = instance.covered_points(set_in);

                for &set_drop in &chosen {
                    if set_drop == set_out {
                        continue;
                    }

                    let lost = instance
                        .covered_points(set_drop)
                        .ones()
                        .filter(|&point| {
                            let count = counts[point] as i64 - out_points.contains(point) as i64
                                + in_points.contains(point) as i64;
                            count == 1
                        })
                        .count() as i64;

                    if after_swap - lost >= required {
                        moves.push(Move::SwapAndDrop {
                            set_out,
                            set_in,
                            set_drop,
                        });
                    }
                }
            }
        }

        moves
    }
}
