//! Variable Neighborhood Search for the minimisation objective.
//!
//! 1. Improve the initial solution with the minimisation VND.
//! 2. Set k = 1.
//! 3. While k <= k_max and time remains:
//!    a. shake a copy of the best solution with strength k
//!    b. run the VND on the copy
//!    c. if the copy is feasible and uses fewer sets, adopt it and reset k = 1;
//!       otherwise discard it and increment k
//! 4. Return the best solution found.

use crate::config::{Config, VndVariant};
use crate::context::SearchContext;
use crate::local_search::LocalSearch;
use crate::problem::Instance;
use crate::shake::Shake;
use crate::solution::Solution;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Best solution found.
    pub best: Solution,
    /// Total shake/descent iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found.
    pub best_iteration: usize,
    /// Best score after each iteration.
    pub score_history: Vec<usize>,
}

/// Variable Neighborhood Search runner.
#[derive(Debug, Clone)]
pub struct Vns {
    pub local_search: LocalSearch,
    pub shake: Shake,
    pub vnd: VndVariant,
    pub k_max: usize,
}

impl Vns {
    pub fn new(local_search: LocalSearch, shake: Shake, vnd: VndVariant, k_max: usize) -> Self {
        Vns {
            local_search,
            shake,
            vnd,
            k_max,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Vns::new(
            LocalSearch::from_config(config),
            Shake::from_kind(config.shake, config.rcl_size),
            config.vnd,
            config.k_max,
        )
    }

    /// Run the VNS starting from `initial`.
    pub fn run(&self, initial: Solution, instance: &Instance, ctx: &mut SearchContext) -> VnsResult {
        let mut best = initial;
        self.local_search.descend(&mut best, instance, ctx, self.vnd);
        log::info!("VNS starts from {} sets", best.score());

        let mut score_history = Vec::new();
        let mut iterations = 0;
        let mut best_iteration = 0;
        let mut k = 1;

        while k <= self.k_max && !ctx.is_time_up() {
            let mut candidate = best.clone();
            let perturbed = self.shake.apply(&mut candidate, instance, ctx, k);

            if perturbed == 0 {
                log::debug!("Shake could not perturb the solution at k={}", k);
            } else {
                self.local_search
                    .descend(&mut candidate, instance, ctx, self.vnd);

                if improves(&candidate, &best) {
                    log::info!("New best solution with {} sets (k={})", candidate.score(), k);
                    best = candidate;
                    best_iteration = iterations;
                    k = 0;
                }
            }

            k += 1;
            iterations += 1;
            score_history.push(best.score());
        }

        log::info!(
            "VNS finished after {} iterations with {} sets",
            iterations,
            best.score()
        );

        VnsResult {
            best,
            iterations,
            best_iteration,
            score_history,
        }
    }
}

/// Whether `candidate` should replace `best` under the minimisation objective.
fn improves(candidate: &Solution, best: &Solution) -> bool {
    candidate.is_feasible() && (!best.is_feasible() || candidate.score() < best.score())
}
