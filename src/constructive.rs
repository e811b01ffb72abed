//! Constructive heuristics: Greedy, GRASP and Random.
//!
//! Every constructive starts from an empty solution, adds sets until the
//! coverage threshold is met (or no candidate helps any more), and finishes
//! with a seeded redundancy elimination pass.

use crate::config::ConstructiveKind;
use crate::context::SearchContext;
use crate::problem::Instance;
use crate::solution::Solution;
use fixedbitset::FixedBitSet;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

/// Build a solution with the given constructive.
pub fn construct(
    kind: ConstructiveKind,
    instance: &Instance,
    ctx: &mut SearchContext,
    rcl_size: usize,
) -> Solution {
    match kind {
        ConstructiveKind::Greedy => greedy(instance, ctx),
        ConstructiveKind::Grasp => grasp(instance, ctx, rcl_size),
        ConstructiveKind::Random => random(instance, ctx),
    }
}

/// Greedy construction: always add the set covering the most uncovered points.
pub fn greedy(instance: &Instance, ctx: &mut SearchContext) -> Solution {
    let mut solution = Solution::new(instance);
    add_greedy_until_feasible(&mut solution, instance);
    log_construction("Greedy", &solution);

    redundancy_elimination(&mut solution, instance, ctx);
    solution
}

/// GRASP construction: pick uniformly among the `rcl_size` best sets.
pub fn grasp(instance: &Instance, ctx: &mut SearchContext, rcl_size: usize) -> Solution {
    let mut solution = Solution::new(instance);

    while !solution.is_feasible() && !ctx.is_time_up() {
        let rcl = restricted_candidates(&solution, instance, rcl_size, false);
        let Some(&set) = rcl.choose(&mut ctx.rng) else {
            break;
        };
        solution.add_set(instance, set);
    }
    log_construction("GRASP", &solution);

    redundancy_elimination(&mut solution, instance, ctx);
    solution
}

/// Random construction: add uniformly drawn useful sets until feasible.
///
/// Drawing a set that is already chosen is a no-op.
pub fn random(instance: &Instance, ctx: &mut SearchContext) -> Solution {
    let mut solution = Solution::new(instance);
    let useful: Vec<usize> = instance.useful_sets().collect();

    while !solution.is_feasible() && solution.score() < useful.len() && !ctx.is_time_up() {
        let set = useful[ctx.rng.gen_range(0..useful.len())];
        if !solution.contains(set) {
            solution.add_set(instance, set);
        }
    }
    log_construction("Random", &solution);

    redundancy_elimination(&mut solution, instance, ctx);
    solution
}

fn log_construction(name: &str, solution: &Solution) {
    if solution.is_feasible() {
        log::debug!(
            "{} construction: {} sets, {} points covered",
            name,
            solution.score(),
            solution.coverage()
        );
    } else {
        log::warn!(
            "{} construction stopped infeasible: best coverage reached is {} of {} required",
            name,
            solution.coverage(),
            solution.min_covered_required()
        );
    }
}

/// The unchosen useful set covering the most uncovered points, with its gain.
///
/// Ties go to the lowest index.
pub fn best_greedy_set(solution: &Solution, instance: &Instance) -> Option<(usize, usize)> {
    best_greedy_set_excluding(solution, instance, &FixedBitSet::new())
}

/// Like [`best_greedy_set`], never picking a set in `tabu`.
pub fn best_greedy_set_excluding(
    solution: &Solution,
    instance: &Instance,
    tabu: &FixedBitSet,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;

    for set in instance
        .useful_sets()
        .filter(|&s| !solution.contains(s) && !tabu.contains(s))
    {
        let gain = instance
            .covered_points(set)
            .difference_count(solution.covered_points());
        if best.map_or(true, |(_, best_gain)| gain > best_gain) {
            best = Some((set, gain));
        }
    }

    best
}

/// Add greedy sets until feasible or no set adds coverage.
///
/// Returns the number of sets added.
pub fn add_greedy_until_feasible(solution: &mut Solution, instance: &Instance) -> usize {
    add_greedy_until_feasible_excluding(solution, instance, &FixedBitSet::new())
}

/// Like [`add_greedy_until_feasible`], never adding a set in `tabu`.
pub fn add_greedy_until_feasible_excluding(
    solution: &mut Solution,
    instance: &Instance,
    tabu: &FixedBitSet,
) -> usize {
    let mut added = 0;

    while !solution.is_feasible() {
        match best_greedy_set_excluding(solution, instance, tabu) {
            Some((set, gain)) if gain > 0 => {
                solution.add_set(instance, set);
                added += 1;
            }
            _ => break,
        }
    }

    added
}

/// Add `n` greedy sets regardless of feasibility.
///
/// Zero-gain sets are accepted so the requested cardinality can be reached;
/// fewer sets are added only if every useful set is already chosen.
pub fn add_best_greedy_sets(solution: &mut Solution, instance: &Instance, n: usize) -> usize {
    add_best_greedy_sets_excluding(solution, instance, n, &FixedBitSet::new())
}

/// Like [`add_best_greedy_sets`], never adding a set in `tabu`.
pub fn add_best_greedy_sets_excluding(
    solution: &mut Solution,
    instance: &Instance,
    n: usize,
    tabu: &FixedBitSet,
) -> usize {
    let mut added = 0;

    while added < n {
        let Some((set, _)) = best_greedy_set_excluding(solution, instance, tabu) else {
            break;
        };
        solution.add_set(instance, set);
        added += 1;
    }

    added
}

/// Top `rcl_size` unchosen useful sets by number of uncovered points covered.
///
/// With `allow_zero_gain` false, sets that add nothing are left out.
pub fn restricted_candidates(
    solution: &Solution,
    instance: &Instance,
    rcl_size: usize,
    allow_zero_gain: bool,
) -> Vec<usize> {
    restricted_candidates_excluding(
        solution,
        instance,
        rcl_size,
        allow_zero_gain,
        &FixedBitSet::new(),
    )
}

/// Like [`restricted_candidates`], leaving out every set in `tabu`.
pub fn restricted_candidates_excluding(
    solution: &Solution,
    instance: &Instance,
    rcl_size: usize,
    allow_zero_gain: bool,
    tabu: &FixedBitSet,
) -> Vec<usize> {
    let mut scored: Vec<(usize, usize)> = instance
        .useful_sets()
        .filter(|&set| !solution.contains(set) && !tabu.contains(set))
        .map(|set| {
            let gain = instance
                .covered_points(set)
                .difference_count(solution.covered_points());
            (set, gain)
        })
        .filter(|&(_, gain)| allow_zero_gain || gain > 0)
        .collect();

    scored.sort_by_key(|&(_, gain)| Reverse(gain));
    scored.truncate(rcl_size.max(1));
    scored.into_iter().map(|(set, _)| set).collect()
}

/// Remove chosen sets whose points are all covered by other chosen sets.
///
/// Sets are visited in a seeded random order; passes repeat until one
/// removes nothing. Coverage never changes. Returns the number of sets removed.
pub fn redundancy_elimination(
    solution: &mut Solution,
    instance: &Instance,
    ctx: &mut SearchContext,
) -> usize {
    let mut removed = 0;

    loop {
        let mut order = solution.chosen_list();
        order.shuffle(&mut ctx.rng);

        let mut removed_in_pass = 0;
        for set in order {
            let counts = solution.cover_count();
            if instance
                .covered_points(set)
                .ones()
                .all(|point| counts[point] > 1)
            {
                solution.remove_set(instance, set);
                removed_in_pass += 1;
            }
        }

        removed += removed_in_pass;
        if removed_in_pass == 0 {
            break;
        }
    }

    if removed > 0 {
        log::debug!("Redundancy elimination removed {} sets", removed);
    }
    removed
}
