//! Configuration parameters for the PSCP solver.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level solution method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Greedy construction followed by redundancy elimination
    Greedy,
    /// GRASP construction followed by redundancy elimination
    Grasp,
    /// Random construction followed by redundancy elimination
    Random,
    /// Constructive, minimisation VND, then VNS
    Vns,
    /// Decreasing sequence of fixed-size maximum coverage searches
    KThinning,
}

/// Constructive used to build the initial solution of a VNS run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ConstructiveKind {
    Greedy,
    Grasp,
    Random,
}

/// Perturbation used by the minimisation VNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ShakeKind {
    RandomAdd,
    DestroyAndRepair,
    GuidedGreedy,
    GuidedGrasp,
}

/// Neighborhood order of the minimisation VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VndVariant {
    /// Drop, then coverage-improving Swap
    DropSwap,
    /// Drop, then Swap-and-Drop
    DropSwapAndDrop,
}

/// Neighborhoods and shake of the k-thinning inner search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ThinningVariant {
    /// Best-improvement Swap(1,1), first-improvement Swap(2,2), guided greedy shake
    Full,
    /// First-improvement Swap(1,1), guided GRASP shake, keeps trying smaller
    /// `k` after a failure until the abort margin is exceeded
    Swap11Only,
}

impl ThinningVariant {
    /// How far below the best size the thinning may search after a failed `k`.
    ///
    /// `None` stops at the first failure.
    pub fn abort_margin(self) -> Option<usize> {
        match self {
            ThinningVariant::Full => None,
            ThinningVariant::Swap11Only => Some(10),
        }
    }
}

/// Configuration settings for the PSCP solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub algorithm: Algorithm,
    /// Constructive for the VNS initial solution
    pub constructive: ConstructiveKind,
    /// Shake for the minimisation VNS
    pub shake: ShakeKind,
    pub vnd: VndVariant,
    pub thinning: ThinningVariant,
    /// Size of the restricted candidate list in GRASP construction and repair
    pub rcl_size: usize,
    /// Candidate-list size for Swap, Swap(1,1) and Swap-and-Drop
    pub swap_candidates: usize,
    /// Candidate-list size for Swap(2,2)
    pub swap22_candidates: usize,
    /// Candidate-list size for Swap(2,1)-opt
    pub swap21_candidates: usize,
    /// Candidates examined by the Swap(2,1)-opt repair step
    pub repair_candidates: usize,
    /// Maximum shake strength of the minimisation VNS
    pub k_max: usize,
    /// Maximum shake strength of the inner k-thinning VNS, in percent of k
    pub l_max_percent: usize,
    /// Enable Swap(2,1)-opt in the full k-thinning VND
    pub use_swap21: bool,
    /// Seed of the run's random number generator
    pub seed: u64,
    /// Optional time limit for the algorithm
    pub time_limit: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: Algorithm::KThinning,
            constructive: ConstructiveKind::Greedy,
            shake: ShakeKind::DestroyAndRepair,
            vnd: VndVariant::DropSwapAndDrop,
            thinning: ThinningVariant::Full,
            rcl_size: 3,
            swap_candidates: 50,
            swap22_candidates: 25,
            swap21_candidates: 50,
            repair_candidates: 25,
            k_max: 20,
            l_max_percent: 10,
            use_swap21: false,
            seed: 0,
            time_limit: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_constructive(mut self, constructive: ConstructiveKind) -> Self {
        self.constructive = constructive;
        self
    }

    pub fn with_shake(mut self, shake: ShakeKind) -> Self {
        self.shake = shake;
        self
    }

    pub fn with_vnd(mut self, vnd: VndVariant) -> Self {
        self.vnd = vnd;
        self
    }

    pub fn with_thinning(mut self, thinning: ThinningVariant) -> Self {
        self.thinning = thinning;
        self
    }

    /// Set the restricted candidate list size.
    pub fn with_rcl_size(mut self, size: usize) -> Self {
        self.rcl_size = size;
        self
    }

    /// Set one candidate-list size for every swap-family neighborhood.
    pub fn with_candidate_list_size(mut self, size: usize) -> Self {
        self.swap_candidates = size;
        self.swap22_candidates = size;
        self.swap21_candidates = size;
        self.repair_candidates = size;
        self
    }

    pub fn with_swap_candidates(mut self, size: usize) -> Self {
        self.swap_candidates = size;
        self
    }

    pub fn with_swap22_candidates(mut self, size: usize) -> Self {
        self.swap22_candidates = size;
        self
    }

    /// Set the maximum shake strength of the minimisation VNS.
    pub fn with_k_max(mut self, k_max: usize) -> Self {
        self.k_max = k_max;
        self
    }

    /// Set the inner k-thinning shake strength, in percent of k.
    pub fn with_l_max_percent(mut self, percent: usize) -> Self {
        self.l_max_percent = percent;
        self
    }

    pub fn with_swap21(mut self, enabled: bool) -> Self {
        self.use_swap21 = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }
}
