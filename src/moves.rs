//! Moves produced by the local search neighborhoods.

use crate::problem::Instance;
use crate::solution::Solution;
use std::fmt;

/// A proposed transformation of a [`Solution`].
///
/// Every move records the score change it was evaluated with against the
/// cover counts of the solution it was generated from. Cardinality moves
/// (`Drop`, `Swap`, `SwapAndDrop`) change the number of chosen sets; the
/// fixed-size moves (`Swap11`, `Swap22`, `Swap21Opt`) change coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Remove one chosen set, keeping the solution feasible.
    Drop { set: usize },
    /// Exchange a chosen set for an unchosen one, keeping the solution feasible.
    Swap {
        set_out: usize,
        set_in: usize,
        coverage_change: i64,
    },
    /// (1,1)-exchange evaluated by net coverage.
    Swap11 {
        set_out: usize,
        set_in: usize,
        coverage_change: i64,
    },
    /// (2,2)-exchange evaluated by net coverage.
    Swap22 {
        sets_out: [usize; 2],
        sets_in: [usize; 2],
        coverage_change: i64,
    },
    /// A swap that makes a third chosen set redundant, which is then dropped.
    SwapAndDrop {
        set_out: usize,
        set_in: usize,
        set_drop: usize,
    },
    /// Remove two sets, add one, and refill the freed slot with `set_repair`.
    Swap21Opt {
        sets_out: [usize; 2],
        set_in: usize,
        set_repair: usize,
        coverage_change: i64,
    },
}

impl Move {
    /// Objective change if this move is executed.
    ///
    /// Negative for moves that shrink the solution, zero for plain swaps and
    /// the coverage gain for the fixed-size moves.
    pub fn score_change(&self) -> i64 {
        match *self {
            Move::Drop { .. } | Move::SwapAndDrop { .. } => -1,
            Move::Swap { .. } => 0,
            Move::Swap11 {
                coverage_change, ..
            }
            | Move::Swap22 {
                coverage_change, ..
            }
            | Move::Swap21Opt {
                coverage_change, ..
            } => coverage_change,
        }
    }

    /// Apply the move to `solution` in place.
    pub fn execute(&self, solution: &mut Solution, instance: &Instance) {
        match *self {
            Move::Drop { set } => {
                solution.remove_set(instance, set);
            }
            Move::Swap {
                set_out, set_in, ..
            }
            | Move::Swap11 {
                set_out, set_in, ..
            } => {
                solution.remove_set(instance, set_out);
                solution.add_set(instance, set_in);
            }
            Move::Swap22 {
                sets_out, sets_in, ..
            } => {
                for set in sets_out {
                    solution.remove_set(instance, set);
                }
                for set in sets_in {
                    solution.add_set(instance, set);
                }
            }
            Move::SwapAndDrop {
                set_out,
                set_in,
                set_drop,
            } => {
                solution.remove_set(instance, set_out);
                solution.add_set(instance, set_in);
                solution.remove_set(instance, set_drop);
            }
            Move::Swap21Opt {
                sets_out,
                set_in,
                set_repair,
                ..
            } => {
                for set in sets_out {
                    solution.remove_set(instance, set);
                }
                solution.add_set(instance, set_in);
                solution.add_set(instance, set_repair);
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Drop { set } => write!(f, "Drop{{{}}}", set),
            Move::Swap {
                set_out, set_in, ..
            } => write!(f, "Swap{{out={}, in={}}}", set_out, set_in),
            Move::Swap11 {
                set_out, set_in, ..
            } => write!(f, "Swap11{{out={}, in={}}}", set_out, set_in),
            Move::Swap22 {
                sets_out, sets_in, ..
            } => write!(f, "Swap22{{out={:?}, in={:?}}}", sets_out, sets_in),
            Move::SwapAndDrop {
                set_out,
                set_in,
                set_drop,
            } => write!(
                f,
                "SwapAndDrop{{out={}, in={}, drop={}}}",
                set_out, set_in, set_drop
            ),
            Move::Swap21Opt {
                sets_out,
                set_in,
                set_repair,
                ..
            } => write!(
                f,
                "Swap21opt{{out={:?}, in={}, repair={}}}",
                sets_out, set_in, set_repair
            ),
        }
    }
}
