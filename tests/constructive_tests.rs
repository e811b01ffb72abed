//! Tests for the constructive heuristics and redundancy elimination.

use pscp_vns::config::ConstructiveKind;
use pscp_vns::constructive::{
    add_best_greedy_sets, add_greedy_until_feasible, best_greedy_set, construct, grasp, greedy,
    random, redundancy_elimination, restricted_candidates,
};
use pscp_vns::context::SearchContext;
use pscp_vns::local_search::utils::uniquely_covered;
use pscp_vns::problem::Instance;
use pscp_vns::solution::Solution;

/// Ten points: set 0 covers 0..=8, set 1 covers 0..=4 (dominated), set 2 covers {9}.
fn create_dominated_instance() -> Instance {
    Instance::from_sets(
        "dominated",
        10,
        &[(0..=8).collect(), (0..=4).collect(), vec![9]],
    )
}

#[test]
fn test_greedy_small_scenario() {
    let instance = Instance::from_sets("small", 3, &[vec![0, 1], vec![1, 2]]);
    let mut ctx = SearchContext::unbounded(0);

    let solution = greedy(&instance, &mut ctx);

    assert_eq!(solution.chosen_list(), vec![0, 1]);
    assert_eq!(solution.score(), 2);
    assert!(solution.is_feasible());
}

#[test]
fn test_best_greedy_set_prefers_lowest_index_on_ties() {
    let instance = Instance::from_sets("ties", 4, &[vec![0, 1], vec![2, 3], vec![0]]);
    let solution = Solution::new(&instance);

    assert_eq!(best_greedy_set(&solution, &instance), Some((0, 2)));
}

#[test]
fn test_constructives_skip_useless_sets() {
    let instance = create_dominated_instance();
    assert!(instance.is_useless(1));

    for seed in 0..5 {
        let mut ctx = SearchContext::unbounded(seed);
        for kind in [
            ConstructiveKind::Greedy,
            ConstructiveKind::Grasp,
            ConstructiveKind::Random,
        ] {
            let solution = construct(kind, &instance, &mut ctx, 3);
            assert!(solution.is_feasible(), "{:?} seed {}", kind, seed);
            assert!(solution.contains(0));
            assert!(!solution.contains(1), "{:?} chose a useless set", kind);
            assert!(solution.is_consistent(&instance));
        }
    }
}

#[test]
fn test_greedy_stops_at_threshold() {
    let instance = create_dominated_instance();
    let mut ctx = SearchContext::unbounded(0);

    // Set 0 alone covers 9 of 10 points, which is enough
    let solution = greedy(&instance, &mut ctx);
    assert_eq!(solution.chosen_list(), vec![0]);
}

#[test]
fn test_construction_without_feasible_solution() {
    let instance = Instance::from_sets("hopeless", 10, &[(0..=4).collect(), vec![5]]);
    let mut ctx = SearchContext::unbounded(0);

    let solution = greedy(&instance, &mut ctx);
    assert!(!solution.is_feasible());
    assert_eq!(solution.coverage(), 6);

    let solution = grasp(&instance, &mut ctx, 3);
    assert!(!solution.is_feasible());
    assert_eq!(solution.coverage(), 6);

    let solution = random(&instance, &mut ctx);
    assert!(!solution.is_feasible());
    assert_eq!(solution.score(), 2);
}

#[test]
fn test_add_greedy_until_feasible() {
    let instance = Instance::from_sets("small", 3, &[vec![0, 1], vec![1, 2]]);
    let mut solution = Solution::new(&instance);
    solution.add_set(&instance, 1);

    assert_eq!(add_greedy_until_feasible(&mut solution, &instance), 1);
    assert!(solution.is_feasible());
    assert_eq!(add_greedy_until_feasible(&mut solution, &instance), 0);
}

#[test]
fn test_add_best_greedy_sets_ignores_feasibility() {
    let instance = Instance::from_sets("fill", 4, &[vec![0, 1], vec![1, 2], vec![2, 3]]);
    let mut solution = Solution::new(&instance);

    // Sets 0 and 2 already cover everything; set 1 is added with zero gain
    assert_eq!(add_best_greedy_sets(&mut solution, &instance, 3), 3);
    assert_eq!(solution.chosen_list(), vec![0, 1, 2]);
    assert_eq!(solution.coverage(), 4);

    // Only three useful sets exist
    let mut solution = Solution::new(&instance);
    assert_eq!(add_best_greedy_sets(&mut solution, &instance, 5), 3);
}

#[test]
fn test_restricted_candidates() {
    let instance = Instance::from_sets(
        "rcl",
        6,
        &[vec![0, 1, 2], vec![2, 3], vec![4], vec![5, 0, 1]],
    );
    let mut solution = Solution::new(&instance);
    solution.add_set(&instance, 0);

    // Gains: set 1 -> 1, set 2 -> 1, set 3 -> 1
    assert_eq!(restricted_candidates(&solution, &instance, 2, false), vec![1, 2]);

    solution.add_set(&instance, 1);
    solution.add_set(&instance, 2);
    solution.add_set(&instance, 3);
    assert!(restricted_candidates(&solution, &instance, 3, true).is_empty());
}

#[test]
fn test_redundancy_elimination() {
    let instance = Instance::from_sets(
        "redundant",
        3,
        &[vec![0, 1], vec![1, 2], vec![0, 1, 2]],
    );

    for seed in 0..10 {
        let mut ctx = SearchContext::unbounded(seed);
        let mut solution = Solution::new(&instance);
        for set in 0..3 {
            solution.add_set(&instance, set);
        }

        let removed = redundancy_elimination(&mut solution, &instance, &mut ctx);

        assert!(removed >= 1);
        assert_eq!(solution.coverage(), 3);
        assert!(solution.is_consistent(&instance));
        for set in solution.chosen_list() {
            assert!(uniquely_covered(&solution, &instance, set) > 0);
        }
    }
}

#[test]
fn test_constructives_are_reproducible() {
    let instance = Instance::from_sets(
        "repro",
        8,
        &[
            vec![0, 1, 2],
            vec![2, 3, 4],
            vec![4, 5, 6],
            vec![6, 7, 0],
            vec![1, 3, 5, 7],
        ],
    );

    for kind in [ConstructiveKind::Grasp, ConstructiveKind::Random] {
        let first = construct(kind, &instance, &mut SearchContext::unbounded(42), 3);
        let second = construct(kind, &instance, &mut SearchContext::unbounded(42), 3);
        assert_eq!(first.chosen_list(), second.chosen_list());
    }
}
