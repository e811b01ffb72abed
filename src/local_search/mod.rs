//! Local search operators for the PSCP.
//!
//! Each neighborhood lives in its own module and adds its exploration methods
//! to [`LocalSearch`]. The two descent drivers defined here combine them:
//!
//! - [`LocalSearch::descend`] minimises the number of chosen sets while
//!   keeping the solution feasible (Drop first, then Swap or Swap-and-Drop).
//! - [`LocalSearch::maximize_coverage`] keeps the number of chosen sets fixed
//!   and maximises coverage (Swap(1,1), then Swap(2,2), optionally Swap(2,1)-opt).

pub mod drop;
pub mod swap;
pub mod swap11;
pub mod swap21_opt;
pub mod swap22;
pub mod swap_and_drop;
pub mod utils;

use crate::config::{Config, ThinningVariant, VndVariant};
use crate::context::SearchContext;
use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;

/// Manages the local search phase, holding the candidate-list sizes of every
/// swap-family neighborhood.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    /// Incoming candidates for Swap, Swap(1,1) and Swap-and-Drop
    pub swap_candidates: usize,
    /// Incoming candidates for Swap(2,2); pairs are formed from this list
    pub swap22_candidates: usize,
    /// Incoming candidates for Swap(2,1)-opt
    pub swap21_candidates: usize,
    /// Candidates examined when Swap(2,1)-opt refills the freed slot
    pub repair_candidates: usize,
}

impl LocalSearch {
    /// Create a new local search instance using one candidate-list size everywhere.
    pub fn new(candidate_list_size: usize) -> Self {
        LocalSearch {
            swap_candidates: candidate_list_size,
            swap22_candidates: candidate_list_size,
            swap21_candidates: candidate_list_size,
            repair_candidates: candidate_list_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        LocalSearch {
            swap_candidates: config.swap_candidates,
            swap22_candidates: config.swap22_candidates,
            swap21_candidates: config.swap21_candidates,
            repair_candidates: config.repair_candidates,
        }
    }

    /// Run the minimisation VND until no neighborhood improves or time is up.
    ///
    /// Any improvement restarts the descent from Drop. Returns the number of
    /// moves applied.
    pub fn descend(
        &self,
        solution: &mut Solution,
        instance: &Instance,
        ctx: &SearchContext,
        variant: VndVariant,
    ) -> usize {
        let mut applied = 0;

        while !ctx.is_time_up() {
            if let Some(mv) = self.drop_moves(solution, instance).into_iter().next() {
                log::trace!("VND applies {}", mv);
                mv.execute(solution, instance);
                applied += 1;
                continue;
            }

            let next = match variant {
                VndVariant::DropSwap => self
                    .swap_moves(solution, instance, ctx)
                    .into_iter()
                    .filter(|mv| swap_coverage_gain(mv) > 0)
                    .max_by_key(swap_coverage_gain),
                VndVariant::DropSwapAndDrop => self
                    .swap_and_drop_moves(solution, instance, ctx)
                    .into_iter()
                    .next(),
            };

            match next {
                Some(mv) => {
                    log::trace!("VND applies {}", mv);
                    mv.execute(solution, instance);
                    applied += 1;
                }
                None => break,
            }
        }

        applied
    }

    /// Run the fixed-cardinality VND, maximising covered points.
    ///
    /// Returns the number of moves applied.
    pub fn maximize_coverage(
        &self,
        solution: &mut Solution,
        instance: &Instance,
        ctx: &SearchContext,
        variant: ThinningVariant,
        use_swap21: bool,
    ) -> usize {
        let mut applied = 0;

        while !ctx.is_time_up() {
            let next = match variant {
                ThinningVariant::Swap11Only => self.first_improving_swap11(solution, instance, ctx),
                ThinningVariant::Full => self
                    .swap11_moves(solution, instance, ctx)
                    .into_iter()
                    .max_by_key(Move::score_change)
                    .filter(|mv| mv.score_change() > 0)
                    .or_else(|| self.first_improving_swap22(solution, instance, ctx))
                    .or_else(|| {
                        if use_swap21 {
                            self.first_improving_swap21(solution, instance, ctx)
                        } else {
                            None
                        }
                    }),
            };

            match next {
                Some(mv) => {
                    log::trace!("Coverage VND applies {} ({:+})", mv, mv.score_change());
                    mv.execute(solution, instance);
                    applied += 1;
                }
                None => break,
            }
        }

        applied
    }
}

/// Predicted coverage change of a Swap move; zero for every other move.
fn swap_coverage_gain(mv: &Move) -> i64 {
    match *mv {
        Move::Swap {
            coverage_change, ..
        } => coverage_change,
        _ => 0,
    }
}
