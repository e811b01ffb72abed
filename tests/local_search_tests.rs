//! Tests for the neighborhoods and the descent drivers.

use pscp_vns::config::{ThinningVariant, VndVariant};
use pscp_vns::context::SearchContext;
use pscp_vns::local_search::utils::{
    best_repair_set, build_candidate_list, coverage_change, uniquely_covered, weak_points,
};
use pscp_vns::local_search::LocalSearch;
use pscp_vns::moves::Move;
use pscp_vns::problem::Instance;
use pscp_vns::solution::Solution;

fn solution_with(instance: &Instance, sets: &[usize]) -> Solution {
    let mut solution = Solution::new(instance);
    for &set in sets {
        solution.add_set(instance, set);
    }
    solution
}

/// Ten points (9 required): set 0 covers 0..=8, set 1 covers {8, 9}.
fn create_drop_instance() -> Instance {
    Instance::from_sets("drop", 10, &[(0..=8).collect(), vec![8, 9]])
}

/// Ten points: {0..=4}, {4, 5}, {5..=9}.
fn create_swap11_instance() -> Instance {
    Instance::from_sets(
        "swap11",
        10,
        &[(0..=4).collect(), vec![4, 5], (5..=9).collect()],
    )
}

/// Nine points: {0, 1}, {1, 2}, {3, 4, 5}, {6, 7, 8}.
fn create_pair_instance() -> Instance {
    Instance::from_sets(
        "pairs",
        9,
        &[vec![0, 1], vec![1, 2], vec![3, 4, 5], vec![6, 7, 8]],
    )
}

/// Ten points (9 required): {0..=4}, {5, 6, 7}, {7, 8}, {5..=9}.
fn create_swap_and_drop_instance() -> Instance {
    Instance::from_sets(
        "swap-and-drop",
        10,
        &[(0..=4).collect(), vec![5, 6, 7], vec![7, 8], (5..=9).collect()],
    )
}

#[test]
fn test_weak_points_and_candidates() {
    let instance = create_swap11_instance();
    let solution = solution_with(&instance, &[0, 1]);

    let weak: Vec<usize> = weak_points(&solution).ones().collect();
    assert_eq!(weak, vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);

    assert_eq!(build_candidate_list(&solution, &instance, 10), vec![2]);
    assert!(build_candidate_list(&solution, &instance, 0).is_empty());
    assert_eq!(uniquely_covered(&solution, &instance, 0), 4);
    assert_eq!(uniquely_covered(&solution, &instance, 1), 1);
}

#[test]
fn test_candidate_list_sorted_by_weak_points() {
    let instance = create_pair_instance();
    let solution = solution_with(&instance, &[0]);

    // Set 1 covers 1 weak point less than sets 2 and 3
    assert_eq!(build_candidate_list(&solution, &instance, 10), vec![2, 3, 1]);
    assert_eq!(build_candidate_list(&solution, &instance, 2), vec![2, 3]);
}

#[test]
fn test_coverage_change_counts_shared_points_once() {
    let instance = create_pair_instance();
    let solution = solution_with(&instance, &[0, 1]);

    assert_eq!(coverage_change(&solution, &instance, &[0, 1], &[2, 3]), 3);
    assert_eq!(coverage_change(&solution, &instance, &[0], &[2]), 2);
    // Point 1 stays covered by set 1
    assert_eq!(coverage_change(&solution, &instance, &[0], &[]), -1);
    assert_eq!(coverage_change(&solution, &instance, &[0, 1], &[]), -3);
}

#[test]
fn test_drop_on_unique_sets_is_empty() {
    let instance = Instance::from_sets("tight", 3, &[vec![0, 1], vec![1, 2]]);
    let solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);

    assert!(local_search.drop_moves(&solution, &instance).is_empty());
}

#[test]
fn test_drop_keeps_feasibility() {
    let instance = create_drop_instance();
    let mut solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);

    let moves = local_search.drop_moves(&solution, &instance);
    assert_eq!(moves, vec![Move::Drop { set: 1 }]);
    assert_eq!(moves[0].score_change(), -1);

    moves[0].execute(&mut solution, &instance);
    assert!(solution.is_feasible());
    assert_eq!(solution.score(), 1);
    assert!(solution.is_consistent(&instance));
}

#[test]
fn test_swap11_best_and_first_improvement() {
    let instance = create_swap11_instance();
    let solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    let moves = local_search.swap11_moves(&solution, &instance, &ctx);
    assert_eq!(moves.len(), 2);

    let best = moves.iter().max_by_key(|mv| mv.score_change()).unwrap();
    let expected = Move::Swap11 {
        set_out: 1,
        set_in: 2,
        coverage_change: 4,
    };
    assert_eq!(*best, expected);
    assert_eq!(
        local_search.first_improving_swap11(&solution, &instance, &ctx),
        Some(expected)
    );
}

#[test]
fn test_move_deltas_match_execution() {
    let instance = create_pair_instance();
    let solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    let mut moves = local_search.swap11_moves(&solution, &instance, &ctx);
    moves.extend(local_search.first_improving_swap22(&solution, &instance, &ctx));
    moves.extend(local_search.first_improving_swap21(&solution, &instance, &ctx));
    assert!(moves.len() > 2);

    for mv in moves {
        let mut executed = solution.clone();
        mv.execute(&mut executed, &instance);

        assert_eq!(
            executed.coverage() as i64,
            solution.coverage() as i64 + mv.score_change(),
            "delta mismatch for {}",
            mv
        );
        assert_eq!(executed.score(), solution.score());
        assert!(executed.is_consistent(&instance));
    }
}

#[test]
fn test_first_improving_swap22() {
    let instance = create_pair_instance();
    let solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    let mv = local_search
        .first_improving_swap22(&solution, &instance, &ctx)
        .unwrap();
    assert_eq!(
        mv,
        Move::Swap22 {
            sets_out: [0, 1],
            sets_in: [2, 3],
            coverage_change: 3,
        }
    );

    // Best improvement is not supported
    assert!(local_search
        .swap22_moves(&solution, &instance, &ctx)
        .is_empty());

    // A single chosen set has no outgoing pair
    let single = solution_with(&instance, &[0]);
    assert!(local_search
        .first_improving_swap22(&single, &instance, &ctx)
        .is_none());
}

#[test]
fn test_first_improving_swap21_stores_repair_set() {
    let instance = create_pair_instance();
    let mut solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    let mv = local_search
        .first_improving_swap21(&solution, &instance, &ctx)
        .unwrap();
    assert_eq!(
        mv,
        Move::Swap21Opt {
            sets_out: [0, 1],
            set_in: 2,
            set_repair: 3,
            coverage_change: 3,
        }
    );
    assert!(local_search
        .swap21_moves(&solution, &instance, &ctx)
        .is_empty());

    mv.execute(&mut solution, &instance);
    assert_eq!(solution.chosen_list(), vec![2, 3]);
    assert_eq!(solution.coverage(), 6);
}

#[test]
fn test_best_repair_set() {
    let instance = create_pair_instance();
    let solution = solution_with(&instance, &[2]);

    // Set 3 adds three uncovered points, sets 0 and 1 only two
    assert_eq!(best_repair_set(&solution, &instance, 10), Some(3));

    let full = solution_with(&instance, &[0, 1, 2, 3]);
    assert_eq!(best_repair_set(&full, &instance, 10), None);
}

#[test]
fn test_swap_moves_are_feasible() {
    let instance = create_swap_and_drop_instance();
    let solution = solution_with(&instance, &[0, 1, 2]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    let moves = local_search.swap_moves(&solution, &instance, &ctx);
    assert!(!moves.is_empty());

    for mv in moves {
        assert_eq!(mv.score_change(), 0);
        let mut executed = solution.clone();
        mv.execute(&mut executed, &instance);
        assert!(executed.is_feasible(), "{} breaks feasibility", mv);
    }
}

#[test]
fn test_swap_and_drop_moves() {
    let instance = create_swap_and_drop_instance();
    let solution = solution_with(&instance, &[0, 1, 2]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    assert!(local_search.drop_moves(&solution, &instance).is_empty());

    let moves = local_search.swap_and_drop_moves(&solution, &instance, &ctx);
    assert_eq!(
        moves,
        vec![
            Move::SwapAndDrop {
                set_out: 1,
                set_in: 3,
                set_drop: 2,
            },
            Move::SwapAndDrop {
                set_out: 2,
                set_in: 3,
                set_drop: 1,
            },
        ]
    );

    for mv in moves {
        let mut executed = solution.clone();
        mv.execute(&mut executed, &instance);
        assert_eq!(executed.score(), 2);
        assert!(executed.is_feasible());
        assert!(executed.is_consistent(&instance));
    }
}

#[test]
fn test_descend_reduces_score() {
    let instance = create_swap_and_drop_instance();
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    for variant in [VndVariant::DropSwap, VndVariant::DropSwapAndDrop] {
        let mut solution = solution_with(&instance, &[0, 1, 2]);
        let applied = local_search.descend(&mut solution, &instance, &ctx, variant);

        assert!(applied >= 1);
        assert_eq!(solution.score(), 2, "{:?}", variant);
        assert!(solution.is_feasible());
        assert!(solution.is_consistent(&instance));
    }
}

#[test]
fn test_descend_at_local_optimum() {
    let instance = Instance::from_sets("tight", 3, &[vec![0, 1], vec![1, 2]]);
    let mut solution = solution_with(&instance, &[0, 1]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    let applied =
        local_search.descend(&mut solution, &instance, &ctx, VndVariant::DropSwapAndDrop);

    assert_eq!(applied, 0);
    assert_eq!(solution.chosen_list(), vec![0, 1]);
}

#[test]
fn test_maximize_coverage_keeps_cardinality() {
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::unbounded(0);

    for variant in [ThinningVariant::Full, ThinningVariant::Swap11Only] {
        let instance = create_swap11_instance();
        let mut solution = solution_with(&instance, &[0, 1]);

        local_search.maximize_coverage(&mut solution, &instance, &ctx, variant, false);

        assert_eq!(solution.score(), 2);
        assert_eq!(solution.coverage(), 10, "{:?}", variant);
        assert_eq!(solution.chosen_list(), vec![0, 2]);
    }

    // Swap(2,2) and Swap(2,1)-opt take over when no single swap helps
    let instance = create_pair_instance();
    let mut solution = solution_with(&instance, &[0, 1]);
    local_search.maximize_coverage(&mut solution, &instance, &ctx, ThinningVariant::Full, true);
    assert_eq!(solution.score(), 2);
    assert_eq!(solution.coverage(), 6);
}

#[test]
fn test_descend_stops_when_time_is_up() {
    let instance = create_swap_and_drop_instance();
    let mut solution = solution_with(&instance, &[0, 1, 2]);
    let local_search = LocalSearch::new(10);
    let ctx = SearchContext::new(0, Some(std::time::Duration::ZERO));

    let applied =
        local_search.descend(&mut solution, &instance, &ctx, VndVariant::DropSwapAndDrop);

    assert_eq!(applied, 0);
    assert_eq!(solution.score(), 3);
}
