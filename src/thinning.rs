//! k-thinning: minimisation through a decreasing sequence of fixed-size
//! maximum coverage searches.
//!
//! Starting from the Greedy size `k`, each step seeds a `k`-set solution with
//! greedy additions, then maximises its coverage with an inner VNS. A step
//! that reaches the coverage threshold becomes the best solution and the
//! search moves on to `k - 1`. Without an abort margin the first failing step
//! ends the run; with one, failing steps are skipped until `k` falls more
//! than the margin below the best size.

use crate::config::{Config, ThinningVariant};
use crate::constructive::{add_best_greedy_sets, greedy};
use crate::context::SearchContext;
use crate::local_search::LocalSearch;
use crate::problem::Instance;
use crate::shake::Shake;
use crate::solution::Solution;
use serde::Serialize;

/// Outcome of one fixed-`k` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThinningStep {
    pub k: usize,
    /// Best coverage reached with `k` sets
    pub coverage: usize,
    pub feasible: bool,
}

#[derive(Debug, Clone)]
pub struct ThinningResult {
    /// Smallest feasible solution found, or the Greedy solution if none was.
    pub best: Solution,
    /// Number of sets in the Greedy starting solution.
    pub initial_score: usize,
    pub steps: Vec<ThinningStep>,
}

#[derive(Debug, Clone)]
pub struct KThinning {
    pub local_search: LocalSearch,
    pub variant: ThinningVariant,
    pub shake: Shake,
    pub l_max_percent: usize,
    pub use_swap21: bool,
}

impl KThinning {
    pub fn new(local_search: LocalSearch, variant: ThinningVariant, rcl_size: usize) -> Self {
        let shake = match variant {
            ThinningVariant::Full => Shake::GuidedGreedy,
            ThinningVariant::Swap11Only => Shake::GuidedGrasp { rcl_size },
        };

        KThinning {
            local_search,
            variant,
            shake,
            l_max_percent: 10,
            use_swap21: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut thinning = KThinning::new(
            LocalSearch::from_config(config),
            config.thinning,
            config.rcl_size,
        );
        thinning.l_max_percent = config.l_max_percent;
        thinning.use_swap21 = config.use_swap21;
        thinning
    }

    /// Run the thinning process on `instance`.
    pub fn run(&self, instance: &Instance, ctx: &mut SearchContext) -> ThinningResult {
        let initial = greedy(instance, ctx);
        let initial_score = initial.score();
        let mut steps = Vec::new();

        if !initial.is_feasible() {
            log::warn!(
                "Initial greedy constructive failed to find a feasible solution for instance {}",
                instance.name
            );
            return ThinningResult {
                best: initial,
                initial_score,
                steps,
            };
        }

        let mut best = initial;
        let mut k = best.score();
        log::info!(
            "Initial solution found with k={}. Starting k-thinning process",
            k
        );

        while k >= 1 && !ctx.is_time_up() {
            if let Some(margin) = self.variant.abort_margin() {
                if k + margin < best.score() {
                    log::warn!(
                        "k ({}) has dropped far below the best solution size ({}), terminating early",
                        k,
                        best.score()
                    );
                    break;
                }
            }

            log::info!("Searching for a feasible solution of size k={}", k);
            let mut seed = Solution::new(instance);
            add_best_greedy_sets(&mut seed, instance, k);

            let best_for_k = self.search_fixed_k(seed, instance, ctx);
            steps.push(ThinningStep {
                k,
                coverage: best_for_k.coverage(),
                feasible: best_for_k.is_feasible(),
            });

            if best_for_k.is_feasible() {
                log::info!(
                    "Found a feasible solution for k={}. Coverage: {}",
                    k,
                    best_for_k.coverage()
                );
                best = best_for_k;
            } else if self.variant.abort_margin().is_some() {
                log::info!(
                    "No feasible solution for k={}. Max coverage found: {}. Trying k={}",
                    k,
                    best_for_k.coverage(),
                    k - 1
                );
            } else {
                log::info!(
                    "No feasible solution for k={}. Max coverage found: {}. Stopping search",
                    k,
                    best_for_k.coverage()
                );
                break;
            }
            k -= 1;
        }

        log::info!("k-thinning finished with {} sets", best.score());

        ThinningResult {
            best,
            initial_score,
            steps,
        }
    }

    /// Inner VNS maximising coverage with exactly `seed.score()` sets.
    ///
    /// Stops as soon as the coverage threshold is reached.
    pub fn search_fixed_k(
        &self,
        seed: Solution,
        instance: &Instance,
        ctx: &mut SearchContext,
    ) -> Solution {
        let mut best = seed;
        self.improve(&mut best, instance, ctx);

        let l_max = (best.score() * self.l_max_percent / 100).max(1);
        let mut l = 1;

        while l <= l_max && !best.is_feasible() && !ctx.is_time_up() {
            let mut candidate = best.clone();
            let perturbed = self.shake.apply(&mut candidate, instance, ctx, l);

            if perturbed == 0 {
                log::debug!("Shake could not perturb the solution at l={}", l);
                l += 1;
                continue;
            }

            self.improve(&mut candidate, instance, ctx);

            if candidate.coverage() > best.coverage() {
                log::debug!(
                    "Coverage improved to {} with {} sets (l={})",
                    candidate.coverage(),
                    candidate.score(),
                    l
                );
                best = candidate;
                l = 1;
            } else {
                l += 1;
            }
        }

        best
    }

    fn improve(&self, solution: &mut Solution, instance: &Instance, ctx: &SearchContext) {
        self.local_search.maximize_coverage(
            solution,
            instance,
            ctx,
            self.variant,
            self.use_swap21,
        );
    }
}
