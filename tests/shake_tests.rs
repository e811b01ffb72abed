//! Tests for the shake operators.

use pscp_vns::config::ShakeKind;
use pscp_vns::constructive::greedy;
use pscp_vns::context::SearchContext;
use pscp_vns::problem::Instance;
use pscp_vns::shake::Shake;
use pscp_vns::solution::Solution;

/// Twelve points arranged in overlapping windows of four.
fn create_test_instance() -> Instance {
    let sets: Vec<Vec<usize>> = (0..12)
        .map(|start| (start..start + 4).map(|p| p % 12).collect())
        .collect();
    Instance::from_sets("windows", 12, &sets)
}

#[test]
fn test_from_kind() {
    assert_eq!(Shake::from_kind(ShakeKind::RandomAdd, 3), Shake::RandomAdd);
    assert_eq!(
        Shake::from_kind(ShakeKind::GuidedGrasp, 5),
        Shake::GuidedGrasp { rcl_size: 5 }
    );
}

#[test]
fn test_zero_strength_is_noop() {
    let instance = create_test_instance();
    let mut ctx = SearchContext::unbounded(0);
    let original = greedy(&instance, &mut ctx);

    for shake in [
        Shake::RandomAdd,
        Shake::DestroyAndRepair,
        Shake::GuidedGreedy,
        Shake::GuidedGrasp { rcl_size: 3 },
    ] {
        let mut solution = original.clone();
        assert_eq!(shake.apply(&mut solution, &instance, &mut ctx, 0), 0);
        assert_eq!(solution, original);
    }
}

#[test]
fn test_random_add() {
    let instance = create_test_instance();
    let mut ctx = SearchContext::unbounded(1);
    let mut solution = greedy(&instance, &mut ctx);
    let before = solution.score();

    let added = Shake::RandomAdd.apply(&mut solution, &instance, &mut ctx, 3);

    assert_eq!(added, 3);
    assert_eq!(solution.score(), before + 3);
    assert!(solution.is_feasible());
    assert!(solution.is_consistent(&instance));
}

#[test]
fn test_random_add_without_candidates() {
    let instance = Instance::from_sets("tiny", 2, &[vec![0], vec![1]]);
    let mut ctx = SearchContext::unbounded(0);
    let mut solution = Solution::new(&instance);
    solution.add_set(&instance, 0);
    solution.add_set(&instance, 1);

    assert_eq!(Shake::RandomAdd.apply(&mut solution, &instance, &mut ctx, 2), 0);
    assert_eq!(solution.score(), 2);
}

#[test]
fn test_destroy_and_repair_restores_feasibility() {
    let instance = create_test_instance();

    for seed in 0..10 {
        let mut ctx = SearchContext::unbounded(seed);
        let mut solution = greedy(&instance, &mut ctx);

        let removed = Shake::DestroyAndRepair.apply(&mut solution, &instance, &mut ctx, 2);

        assert_eq!(removed, 2);
        assert!(solution.is_feasible(), "seed {}", seed);
        assert!(solution.is_consistent(&instance));
    }
}

#[test]
fn test_guided_shakes_keep_cardinality() {
    let instance = create_test_instance();

    for seed in 0..10 {
        for shake in [Shake::GuidedGreedy, Shake::GuidedGrasp { rcl_size: 3 }] {
            let mut ctx = SearchContext::unbounded(seed);
            let mut solution = greedy(&instance, &mut ctx);
            let before = solution.score();

            let perturbed = shake.apply(&mut solution, &instance, &mut ctx, 2);

            assert_eq!(perturbed, 2);
            assert_eq!(solution.score(), before, "{:?}", shake);
            assert!(solution.is_consistent(&instance));
        }
    }
}

#[test]
fn test_guided_greedy_changes_structure() {
    let instance = create_test_instance();
    let mut ctx = SearchContext::unbounded(0);
    let original = greedy(&instance, &mut ctx);
    assert_eq!(original.chosen_list(), vec![0, 4, 8]);

    for l in 1..=3 {
        let mut solution = original.clone();
        let perturbed = Shake::GuidedGreedy.apply(&mut solution, &instance, &mut ctx, l);

        assert_eq!(perturbed, l);
        assert_ne!(solution, original, "l = {}", l);
        assert_eq!(solution.score(), original.score());
        assert!(solution.is_consistent(&instance));
    }

    // With every point covered once, set 0 goes first and set 1 best replaces it
    let mut solution = original.clone();
    Shake::GuidedGreedy.apply(&mut solution, &instance, &mut ctx, 1);
    assert_eq!(solution.chosen_list(), vec![1, 4, 8]);
}

#[test]
fn test_removal_shakes_never_restore_removed_sets() {
    let instance = create_test_instance();

    for seed in 0..10 {
        for shake in [
            Shake::DestroyAndRepair,
            Shake::GuidedGreedy,
            Shake::GuidedGrasp { rcl_size: 3 },
        ] {
            let mut ctx = SearchContext::unbounded(seed);
            let original = greedy(&instance, &mut ctx);
            let mut solution = original.clone();

            let perturbed = shake.apply(&mut solution, &instance, &mut ctx, 1);

            assert_eq!(perturbed, 1, "{:?} seed {}", shake, seed);
            let dropped = original
                .chosen_list()
                .into_iter()
                .filter(|&set| !solution.contains(set))
                .count();
            assert_eq!(dropped, 1, "{:?} seed {}", shake, seed);
        }
    }
}

#[test]
fn test_guided_greedy_without_alternatives_reports_no_change() {
    // Set 2 overlaps both other chosen sets
    let instance = Instance::from_sets("overlap", 6, &[vec![0, 1, 2], vec![3, 4, 5], vec![2, 3]]);
    let mut ctx = SearchContext::unbounded(0);
    let mut solution = Solution::new(&instance);
    for set in 0..3 {
        solution.add_set(&instance, set);
    }

    // Set 0 is removed first and nothing else can take its slot
    assert_eq!(Shake::GuidedGreedy.apply(&mut solution, &instance, &mut ctx, 1), 0);
    assert_eq!(solution.chosen_list(), vec![0, 1, 2]);
    assert!(solution.is_consistent(&instance));
}
