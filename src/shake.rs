//! Shake (perturbation) operators.
//!
//! Every shake mutates the solution only through `add_set` / `remove_set`
//! and returns how many sets it actually perturbed, counted as previously
//! chosen sets that are no longer chosen. A return value of zero means the
//! solution could not be perturbed at the requested strength.
//!
//! Destroy-and-refill shakes keep the removed sets tabu during the refill
//! and only fall back to them when nothing else can restore the solution.

use crate::config::ShakeKind;
use crate::constructive::{
    add_best_greedy_sets, add_best_greedy_sets_excluding, add_greedy_until_feasible,
    add_greedy_until_feasible_excluding, restricted_candidates_excluding,
};
use crate::context::SearchContext;
use crate::local_search::utils::uniquely_covered;
use crate::problem::Instance;
use crate::solution::Solution;
use fixedbitset::FixedBitSet;
use rand::seq::SliceRandom;
use std::cmp::Reverse;

/// A perturbation applied before each local search of a VNS iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shake {
    /// Add `k` random unchosen sets.
    RandomAdd,
    /// Remove `k` random chosen sets, then greedily repair feasibility.
    DestroyAndRepair,
    /// Remove the `k` most redundant sets, then greedily refill to the original size.
    GuidedGreedy,
    /// Remove the `k` sets covering the fewest points alone, then refill from an RCL.
    GuidedGrasp { rcl_size: usize },
}

impl Shake {
    pub fn from_kind(kind: ShakeKind, rcl_size: usize) -> Self {
        match kind {
            ShakeKind::RandomAdd => Shake::RandomAdd,
            ShakeKind::DestroyAndRepair => Shake::DestroyAndRepair,
            ShakeKind::GuidedGreedy => Shake::GuidedGreedy,
            ShakeKind::GuidedGrasp => Shake::GuidedGrasp { rcl_size },
        }
    }

    /// Perturb `solution` with strength `k`.
    pub fn apply(
        &self,
        solution: &mut Solution,
        instance: &Instance,
        ctx: &mut SearchContext,
        k: usize,
    ) -> usize {
        if k == 0 {
            return 0;
        }

        match *self {
            Shake::RandomAdd => random_add(solution, instance, ctx, k),
            Shake::DestroyAndRepair => destroy_and_repair(solution, instance, ctx, k),
            Shake::GuidedGreedy => guided_greedy(solution, instance, k),
            Shake::GuidedGrasp { rcl_size } => guided_grasp(solution, instance, ctx, k, rcl_size),
        }
    }
}

/// Add `k` distinct random useful sets not yet chosen.
fn random_add(
    solution: &mut Solution,
    instance: &Instance,
    ctx: &mut SearchContext,
    k: usize,
) -> usize {
    let mut eligible: Vec<usize> = instance
        .useful_sets()
        .filter(|&set| !solution.contains(set))
        .collect();
    eligible.shuffle(&mut ctx.rng);
    eligible.truncate(k);

    for &set in &eligible {
        solution.add_set(instance, set);
    }

    eligible.len()
}

fn destroy_and_repair(
    solution: &mut Solution,
    instance: &Instance,
    ctx: &mut SearchContext,
    k: usize,
) -> usize {
    let before = solution.chosen_sets().clone();
    let mut chosen = solution.chosen_list();
    chosen.shuffle(&mut ctx.rng);
    chosen.truncate(k);

    let tabu = remove_all(solution, instance, &chosen);
    add_greedy_until_feasible_excluding(solution, instance, &tabu);
    if !solution.is_feasible() {
        add_greedy_until_feasible(solution, instance);
    }

    perturbed(&before, solution)
}

fn guided_greedy(solution: &mut Solution, instance: &Instance, l: usize) -> usize {
    let before = solution.chosen_sets().clone();
    let counts = solution.cover_count();
    let mut scored: Vec<(usize, u32)> = solution
        .chosen_sets()
        .ones()
        .map(|set| {
            let redundancy = instance
                .covered_points(set)
                .ones()
                .map(|point| counts[point])
                .sum();
            (set, redundancy)
        })
        .collect();
    scored.sort_by_key(|&(_, redundancy)| Reverse(redundancy));
    scored.truncate(l);

    let removed: Vec<usize> = scored.into_iter().map(|(set, _)| set).collect();
    let tabu = remove_all(solution, instance, &removed);
    let refilled = add_best_greedy_sets_excluding(solution, instance, removed.len(), &tabu);
    add_best_greedy_sets(solution, instance, removed.len() - refilled);

    perturbed(&before, solution)
}

fn guided_grasp(
    solution: &mut Solution,
    instance: &Instance,
    ctx: &mut SearchContext,
    l: usize,
    rcl_size: usize,
) -> usize {
    let before = solution.chosen_sets().clone();
    let mut scored: Vec<(usize, usize)> = solution
        .chosen_sets()
        .ones()
        .map(|set| (set, uniquely_covered(solution, instance, set)))
        .collect();
    scored.sort_by_key(|&(_, unique)| unique);
    scored.truncate(l);

    let removed: Vec<usize> = scored.into_iter().map(|(set, _)| set).collect();
    let tabu = remove_all(solution, instance, &removed);

    for _ in 0..removed.len() {
        let rcl = restricted_candidates_excluding(solution, instance, rcl_size, true, &tabu);
        let Some(&set) = rcl.choose(&mut ctx.rng) else {
            log::debug!("Guided GRASP repair ran out of candidates");
            break;
        };
        solution.add_set(instance, set);
    }
    let missing = before.count_ones(..).saturating_sub(solution.score());
    add_best_greedy_sets(solution, instance, missing);

    perturbed(&before, solution)
}

/// Remove `sets` from the solution and return them as a tabu set.
fn remove_all(solution: &mut Solution, instance: &Instance, sets: &[usize]) -> FixedBitSet {
    let mut tabu = FixedBitSet::with_capacity(instance.n_sets());
    for &set in sets {
        solution.remove_set(instance, set);
        tabu.insert(set);
    }
    tabu
}

/// Number of sets in `before` that are no longer chosen.
fn perturbed(before: &FixedBitSet, solution: &Solution) -> usize {
    before.difference_count(solution.chosen_sets())
}
