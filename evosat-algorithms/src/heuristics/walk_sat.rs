use super::flip_letter;
use evosat_challenges::Formula;
use rand::{seq::SliceRandom, Rng};

/// WalkSAT with a fixed random-move probability `q`.
///
/// Each step picks one of the clauses left unsatisfied by the *input*
/// assignment. With probability `q` a uniformly random letter of that clause
/// is flipped, otherwise the letter with the highest gain, ties going to the
/// first in the clause.
pub fn improve<R: Rng + ?Sized>(
    assignment: &[bool],
    formula: &Formula,
    max_steps: usize,
    q: f64,
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
        let clause = formula.clause(clause_idx);

        let literal = if rng.gen::<f64>() < q {
            clause.choose(rng).copied()
        } else {
            best_gain_literal(formula, &variables, clause)
        };
        if let Some(literal) = literal {
            let letter = literal.unsigned_abs() as usize;
            flip_letter(formula, &mut variables, letter, &mut num_unsatisfied);
        }
    }
    variables
}

fn best_gain_literal(formula: &Formula, variables: &[bool], clause: &[i32]) -> Option<i32> {
    let mut best: Option<(i32, i64)> = None;
    for &literal in clause {
        let gain = formula.calculate_gain(variables, literal.unsigned_abs() as usize);
        if best.map_or(true, |(_, best_gain)| gain > best_gain) {
            best = Some((literal, gain));
        }
    }
    best.map(|(literal, _)| literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_gain_prefers_first_on_ties() {
        // flipping either letter satisfies the only clause
        let formula = Formula::new(2, vec![vec![1, 2]]).unwrap();
        assert_eq!(best_gain_literal(&formula, &[false, false], &[1, 2]), Some(1));
    }

    #[test]
    fn test_best_gain_picks_highest() {
        let formula = Formula::new(2, vec![vec![1, 2], vec![2, -1]]).unwrap();
        // x1 = 0, x2 = 0: flipping x2 makes the first clause, flipping x1 also breaks the second
        assert_eq!(
            best_gain_literal(&formula, &[false, false], formula.clause(0)),
            Some(2)
        );
    }
}
