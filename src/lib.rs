//! # PSCP-VNS
//!
//! Heuristics for the Partial Set Covering Problem (PSCP): choose the fewest
//! sets whose union covers at least 90% of all points.
//!
//! The crate provides Greedy, GRASP and Random constructives, a family of
//! set-exchange neighborhoods explored by Variable Neighborhood Descent, a
//! Variable Neighborhood Search for the minimisation objective, and a
//! k-thinning driver that solves a decreasing sequence of fixed-size maximum
//! coverage problems.

pub mod config;
pub mod constructive;
pub mod context;
pub mod error;
pub mod local_search;
pub mod moves;
pub mod problem;
pub mod shake;
pub mod solution;
pub mod thinning;
pub mod utils;
pub mod vns;

use crate::config::{Algorithm, Config, ConstructiveKind};
use crate::context::SearchContext;
use crate::problem::Instance;
use crate::solution::Solution;
use crate::thinning::KThinning;
use crate::utils::SearchStatistics;
use crate::vns::Vns;

use std::time::Duration;

/// The main structure that runs the configured algorithm on one instance.
pub struct PscpSolver {
    pub instance: Instance,
    pub config: Config,
    pub best_solution: Option<Solution>,
    /// Score of the constructive solution the search started from
    pub initial_score: usize,
    pub iterations: usize,
    pub run_time: Duration,
}

impl PscpSolver {
    /// Create a new solver for the given instance and configuration.
    pub fn new(instance: Instance, config: Config) -> Self {
        PscpSolver {
            instance,
            config,
            best_solution: None,
            initial_score: 0,
            iterations: 0,
            run_time: Duration::from_secs(0),
        }
    }

    /// Run the configured algorithm and return the best solution found.
    ///
    /// The result may be infeasible only if no feasible solution could be
    /// constructed at all; check [`Solution::is_feasible`].
    pub fn run(&mut self) -> &Solution {
        let mut ctx = SearchContext::new(self.config.seed, self.config.time_limit);
        log::info!(
            "Solving {} with {:?} ({} sets, {} points, {} useless)",
            self.instance.name,
            self.config.algorithm,
            self.instance.n_sets(),
            self.instance.n_points(),
            self.instance.n_useless_sets()
        );

        let best = match self.config.algorithm {
            Algorithm::Greedy => self.construct(ConstructiveKind::Greedy, &mut ctx),
            Algorithm::Grasp => self.construct(ConstructiveKind::Grasp, &mut ctx),
            Algorithm::Random => self.construct(ConstructiveKind::Random, &mut ctx),
            Algorithm::Vns => {
                let initial = self.construct(self.config.constructive, &mut ctx);
                let result = Vns::from_config(&self.config).run(initial, &self.instance, &mut ctx);
                self.iterations = result.iterations;
                result.best
            }
            Algorithm::KThinning => {
                let result = KThinning::from_config(&self.config).run(&self.instance, &mut ctx);
                self.initial_score = result.initial_score;
                self.iterations = result.steps.len();
                result.best
            }
        };

        self.run_time = ctx.elapsed();
        log::info!(
            "Best solution for {}: {} sets, {} / {} points covered",
            self.instance.name,
            best.score(),
            best.coverage(),
            best.min_covered_required()
        );

        self.best_solution.insert(best)
    }

    fn construct(&mut self, kind: ConstructiveKind, ctx: &mut SearchContext) -> Solution {
        let solution = constructive::construct(kind, &self.instance, ctx, self.config.rcl_size);
        self.initial_score = solution.score();
        solution
    }

    /// Statistics of the last run, if any.
    pub fn statistics(&self) -> Option<SearchStatistics> {
        let best = self.best_solution.as_ref()?;

        Some(SearchStatistics {
            instance: self.instance.name.clone(),
            algorithm: format!("{:?}", self.config.algorithm),
            n_sets: self.instance.n_sets(),
            n_points: self.instance.n_points(),
            useless_sets: self.instance.n_useless_sets(),
            initial_score: self.initial_score,
            best_score: best.score(),
            covered: best.coverage(),
            required: best.min_covered_required(),
            feasible: best.is_feasible(),
            iterations: self.iterations,
            runtime: self.run_time,
        })
    }
}
