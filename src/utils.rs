//! Utility functions and structures for the PSCP solver.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::ParseError;
use crate::problem::{Instance, Tokens};
use crate::solution::Solution;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Write a solution in the text format: the score, then the chosen set ids.
pub fn write_solution<W: Write>(solution: &Solution, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", solution.score())?;
    let ids: Vec<String> = solution
        .chosen_sets()
        .ones()
        .map(|set| set.to_string())
        .collect();
    writeln!(out, "{}", ids.join(" "))
}

/// Save a solution to a file.
pub fn save_solution<P: AsRef<Path>>(solution: &Solution, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_solution(solution, &mut writer)?;
    writer.flush()
}

/// Parse a solution in the text format against `instance`.
///
/// Set ids must be distinct and within range, and their number must match
/// the declared score.
pub fn read_solution(instance: &Instance, input: &str) -> Result<Solution, ParseError> {
    let mut tokens = Tokens::new(input);
    let declared = tokens.next_usize(|| "solution score".to_string())?;

    let mut solution = Solution::new(instance);
    let mut found = 0;

    while !tokens.is_exhausted() {
        let set = tokens.next_usize(|| format!("set id #{}", found + 1))?;
        if set >= instance.n_sets() {
            return Err(ParseError::UnknownSet {
                set,
                n_sets: instance.n_sets(),
            });
        }
        if solution.contains(set) {
            return Err(ParseError::DuplicateSet { set });
        }
        solution.add_set(instance, set);
        found += 1;
    }

    if found != declared {
        return Err(ParseError::LengthMismatch { declared, found });
    }

    Ok(solution)
}

/// Load a solution file for `instance`.
pub fn load_solution<P: AsRef<Path>>(instance: &Instance, path: P) -> Result<Solution, ParseError> {
    let content = fs::read_to_string(path)?;
    read_solution(instance, &content)
}

/// Generate statistics about the search process.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    pub instance: String,
    pub algorithm: String,
    pub n_sets: usize,
    pub n_points: usize,
    pub useless_sets: usize,
    pub initial_score: usize,
    pub best_score: usize,
    pub covered: usize,
    pub required: usize,
    pub feasible: bool,
    pub iterations: usize,
    pub runtime: Duration,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics for {}:
- Algorithm: {}
- Sets / Points: {} / {} ({} useless)
- Initial Score: {}
- Best Score: {}
- Coverage: {} / {} required
- Feasible: {}
- Iterations: {}
- Runtime: {}",
            self.instance,
            self.algorithm,
            self.n_sets,
            self.n_points,
            self.useless_sets,
            self.initial_score,
            self.best_score,
            self.covered,
            self.required,
            self.feasible,
            self.iterations,
            format_duration(self.runtime)
        )
    }
}
