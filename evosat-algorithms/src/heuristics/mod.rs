//! Local-search heuristics that refine one assignment against a formula.
//!
//! Each heuristic returns a new assignment and leaves its input untouched. A
//! heuristic may run out of steps before the formula is satisfied.
use anyhow::{anyhow, Result};
use evosat_challenges::{Formula, Letter};
use rand::Rng;
use std::fmt;

pub mod flip;
pub mod stochastic_local_search;
pub mod walk_sat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Heuristic {
    /// Greedy full sweeps over a random letter order.
    Flip,
    /// Flips a letter of a random unsatisfied clause, biased against high break counts.
    StochasticLocalSearch {
        max_steps: usize,
        cb: f64,
        epsilon: f64,
    },
    /// Flips a random letter with probability `q`, otherwise the best-gain letter.
    WalkSat { max_steps: usize, q: f64 },
}

impl Heuristic {
    pub fn stochastic_local_search(max_steps: usize, cb: f64, epsilon: f64) -> Result<Self> {
        if cb.is_nan() {
            return Err(anyhow!("Invalid Cb. Expected a number, Actual: {}", cb));
        }
        if epsilon.is_nan() || epsilon < 0.0 {
            return Err(anyhow!(
                "Invalid epsilon. Expected: >= 0, Actual: {}",
                epsilon
            ));
        }
        Ok(Heuristic::StochasticLocalSearch {
            max_steps,
            cb,
            epsilon,
        })
    }

    pub fn walk_sat(max_steps: usize, q: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&q) {
            return Err(anyhow!(
                "Invalid random move probability. Expected: 0..=1, Actual: {}",
                q
            ));
        }
        Ok(Heuristic::WalkSat { max_steps, q })
    }

    pub fn improve<R: Rng + ?Sized>(
        &self,
        assignment: &[bool],
        formula: &Formula,
        rng: &mut R,
    ) -> Vec<bool> {
        match *self {
            Heuristic::Flip => flip::improve(assignment, formula, rng),
            Heuristic::StochasticLocalSearch {
                max_steps,
                cb,
                epsilon,
            } => stochastic_local_search::improve(assignment, formula, max_steps, cb, epsilon, rng),
            Heuristic::WalkSat { max_steps, q } => {
                walk_sat::improve(assignment, formula, max_steps, q, rng)
            }
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Flip => write!(f, "Flip"),
            Heuristic::StochasticLocalSearch {
                max_steps,
                cb,
                epsilon,
            } => write!(
                f,
                "SLS[Steps = {}, Cb = {:.2}, epsilon = {:.2}]",
                max_steps, cb, epsilon
            ),
            Heuristic::WalkSat { max_steps, q } => write!(
                f,
                "WalkSAT[Steps = {}, Random Move Prob = {:.2}]",
                max_steps, q
            ),
        }
    }
}

/// Flips `letter` and keeps `num_unsatisfied` in step with the assignment.
fn flip_letter(
    formula: &Formula,
    variables: &mut [bool],
    letter: Letter,
    num_unsatisfied: &mut usize,
) {
    let gain = formula.calculate_gain(variables, letter);
    *num_unsatisfied = (*num_unsatisfied as i64 - gain) as usize;
    variables[letter - 1] = !variables[letter - 1];
}
