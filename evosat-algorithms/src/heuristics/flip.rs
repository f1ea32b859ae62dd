use evosat_challenges::{Formula, Letter};
use rand::{seq::SliceRandom, Rng};

/// Greedy first-improvement search.
///
/// Sweeps the letters in one random order, keeping every flip that does not
/// increase the number of unsatisfied clauses. Stops after a sweep without
/// net gain or once the formula is satisfied. No randomness is used after the
/// shuffle.
pub fn improve<R: Rng + ?Sized>(assignment: &[bool], formula: &Formula, rng: &mut R) -> Vec<bool> {
    let mut letters: Vec<Letter> = (1..=assignment.len()).collect();
    letters.shuffle(rng);

    let mut variables = assignment.to_vec();
    let mut num_unsatisfied = formula.num_unsatisfied(&variables);
    let mut sweep_gain = 1;
    while sweep_gain > 0 && num_unsatisfied > 0 {
        sweep_gain = 0;
        for &letter in &letters {
            let gain = formula.calculate_gain(&variables, letter);
            if gain >= 0 {
                variables[letter - 1] = !variables[letter - 1];
                num_unsatisfied -= gain as usize;
                sweep_gain += gain;
            }
        }
    }
    variables
}
