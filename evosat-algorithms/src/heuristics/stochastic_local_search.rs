use super::flip_letter;
use crate::WeightedSampler;
use evosat_challenges::Formula;
use rand::{seq::SliceRandom, Rng};

/// Biased random walk over unsatisfied clauses.
///
/// Each step picks one of the clauses left unsatisfied by the *input*
/// assignment and flips one of its letters, drawn with weight
/// `(epsilon + break)^-cb`. The candidate clauses are not recomputed as the
/// walk proceeds, so a step may pick a clause an earlier step already fixed.
pub fn improve<R: Rng + ?Sized>(
    assignment: &[bool],
    formula: &Formula,
    max_steps: usize,
    cb: f64,
    epsilon: f64,
    rng: &mut R,
) -> Vec<bool> {
    let candidates = formula.unsatisfied_clause_indices(assignment);
    let mut variables = assignment.to_vec();
    let mut num_unsatisfied = candidates.len();

    for _ in 0..max_steps {
        if num_unsatisfied == 0 {
            break;
        }
        let Some(&clause_idx) = candidates.choose(rng) else {
            break;
        };

        let sampler = WeightedSampler::new(
            formula
                .clause(clause_idx)
                .iter()
                .map(|&literal| {
                    let letter = literal.unsigned_abs() as usize;
                    let break_value = formula.calculate_break(&variables, letter);
                    (letter, (epsilon + break_value as f64).powf(-cb))
                })
                .collect(),
        );
        if let Some(&letter) = sampler.draw(rng) {
            flip_letter(formula, &mut variables, letter, &mut num_unsatisfied);
        }
    }
    variables
}
