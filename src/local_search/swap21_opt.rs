//! Swap(2,1)-opt neighborhood: remove two sets, add one, repair greedily.

use crate::context::SearchContext;
use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;
use itertools::Itertools;

use super::utils::{best_repair_set, build_candidate_list};
use super::LocalSearch;

impl LocalSearch {
    /// Best-improvement exploration of Swap(2,1)-opt.
    ///
    /// Every evaluation runs a repair step, so only the first-improvement
    /// scan is supported and this returns no moves.
    pub fn swap21_moves(
        &self,
        _solution: &Solution,
        _instance: &Instance,
        _ctx: &SearchContext,
    ) -> Vec<Move> {
        Vec::new()
    }

    /// Return the first Swap(2,1)-opt move that strictly increases coverage.
    ///
    /// For each outgoing pair and incoming candidate the exchange is applied to
    /// a scratch copy, the freed slot is refilled with the best repair set, and
    /// the resulting coverage is compared with the current one. The chosen
    /// repair set is stored in the move so executing it restores cardinality.
    pub fn first_improving_swap21(
        &self,
        solution: &Solution,
        instance: &Instance,
        ctx: &SearchContext,
    ) -> Option<Move> {
        let candidates = build_candidate_list(solution, instance, self.swap21_candidates);
        if solution.score() < 2 || candidates.is_empty() {
            return None;
        }

        for (out1, out2) in solution.chosen_list().into_iter().tuple_combinations() {
            if ctx.is_time_up() {
                return None;
            }

            let mut reduced = solution.clone();
            reduced.remove_set(instance, out1);
            reduced.remove_set(instance, out2);

            for &set_in in &candidates {
                let mut trial = reduced.clone();
                trial.add_set(instance, set_in);

                let Some(set_repair) = best_repair_set(&trial, instance, self.repair_candidates)
                else {
                    continue;
                };
                trial.add_set(instance, set_repair);

                if trial.coverage() > solution.coverage() {
                    return Some(Move::Swap21Opt {
                        sets_out: [out1, out2],
                        set_in,
                        set_repair,
                        coverage_change: trial.coverage() as i64 - solution.coverage() as i64,
                    });
                }
            }
        }

        None
    }
}
