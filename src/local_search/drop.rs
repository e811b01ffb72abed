//! Drop neighborhood for local search.

use crate::moves::Move;
use crate::problem::Instance;
use crate::solution::Solution;

use super::utils::uniquely_covered;
use super::LocalSearch;

impl LocalSearch {
    /// Enumerate every chosen set whose removal keeps the solution feasible.
    ///
    /// A set can be dropped when the points it alone covers do not push the
    /// coverage below the required minimum.
    pub fn drop_moves(&self, solution: &Solution, instance: &Instance) -> Vec<Move> {
        let covered = solution.coverage();
        let required = solution.min_covered_required();

        solution
            .chosen_sets()
            .ones()
            .filter(|&set| covered - uniquely_covered(solution, instance, set) >= required)
            .map(|set| Move::Drop { set })
            .collect()
    }
}
