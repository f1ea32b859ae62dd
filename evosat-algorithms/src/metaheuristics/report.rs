use evosat_challenges::{bool_vec_as_u8, format_assignment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one `solve` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub strategy: String,
    pub heuristic: String,
    pub seed: u64,
    #[serde(with = "bool_vec_as_u8")]
    pub best_found_solution: Vec<bool>,
    pub best_found_value: f64,
    pub first_iteration_of_best_found: usize,
    /// Seconds from the start of the run to the discovery of the best found.
    pub time_of_best_found: f64,
    pub iterations_performed: usize,
    /// Seconds.
    pub duration: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The best found solution: {}",
            format_assignment(&self.best_found_solution)
        )?;
        writeln!(f, "The best found value: {:.5}", self.best_found_value)?;
        writeln!(
            f,
            "The first iteration of BFS: {}",
            self.first_iteration_of_best_found
        )?;
        writeln!(
            f,
            "Time of the best found solution (seconds): {:.5}",
            self.time_of_best_found
        )?;
        writeln!(f, "Total number of iterations: {}", self.iterations_performed)?;
        write!(f, "Duration (seconds): {:.5}", self.duration)
    }
}
