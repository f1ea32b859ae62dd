use crate::Solution;
use anyhow::{anyhow, Result};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};
use serde::{Deserialize, Serialize};

/// A Boolean variable, numbered from 1.
pub type Letter = usize;
/// A nonzero signed letter. Positive asserts the letter, negative denies it.
pub type Literal = i32;

/// A CNF formula with a fixed clause length and a literal to clause index.
///
/// The index is built once in [`Formula::new`] and never changes afterwards, so
/// a formula can be shared read-only by every individual of a search run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "FormulaData", into = "FormulaData")]
pub struct Formula {
    num_letters: usize,
    clauses: Vec<Vec<Literal>>,
    // clause_index[slot(l)] holds the indices of the clauses containing l, ascending
    clause_index: Vec<Vec<usize>>,
}

#[derive(Serialize, Deserialize)]
struct FormulaData {
    num_letters: usize,
    clauses: Vec<Vec<Literal>>,
}

impl TryFrom<FormulaData> for Formula {
    type Error = anyhow::Error;

    fn try_from(data: FormulaData) -> Result<Self> {
        Formula::new(data.num_letters, data.clauses)
    }
}

impl From<Formula> for FormulaData {
    fn from(formula: Formula) -> Self {
        Self {
            num_letters: formula.num_letters,
            clauses: formula.clauses,
        }
    }
}

#[inline]
fn slot(literal: Literal) -> usize {
    let position = literal.unsigned_abs() as usize - 1;
    if literal > 0 {
        2 * position
    } else {
        2 * position + 1
    }
}

/// Letters must fit a positive [`Literal`].
fn check_num_letters(num_letters: usize) -> Result<()> {
    if num_letters > Literal::MAX as usize {
        return Err(anyhow!(
            "Invalid number of letters. Expected: 0..={}, Actual: {}",
            Literal::MAX,
            num_letters
        ));
    }
    Ok(())
}

/// Whether `literal` holds under `assignment`.
#[inline]
pub fn is_literal_satisfied(literal: Literal, assignment: &[bool]) -> bool {
    assignment[literal.unsigned_abs() as usize - 1] == (literal > 0)
}

impl Formula {
    /// Builds a formula and its clause index.
    ///
    /// Every clause must be non-empty, all clauses must share one length and
    /// every literal must name a letter in `1..=num_letters`. A clause may not
    /// hold a letter together with its negation, break/make assume it.
    pub fn new(num_letters: usize, clauses: Vec<Vec<Literal>>) -> Result<Self> {
        check_num_letters(num_letters)?;
        if let Some(first) = clauses.first() {
            let clause_length = first.len();
            if clause_length == 0 {
                return Err(anyhow!("Clauses must hold at least one literal"));
            }
            if let Some((idx, clause)) = clauses
                .iter()
                .enumerate()
                .find(|(_, clause)| clause.len() != clause_length)
            {
                return Err(anyhow!(
                    "Invalid length of clause '{}'. Expected: {}, Actual: {}",
                    idx,
                    clause_length,
                    clause.len()
                ));
            }
        }

        let mut clause_index = vec![Vec::new(); 2 * num_letters];
        for (idx, clause) in clauses.iter().enumerate() {
            for &literal in clause {
                if literal == 0 || literal.unsigned_abs() as usize > num_letters {
                    return Err(anyhow!(
                        "Invalid literal '{}' in clause '{}'. Letters range over 1..={}",
                        literal,
                        idx,
                        num_letters
                    ));
                }
                if clause.contains(&-literal) {
                    return Err(anyhow!(
                        "Clause '{}' holds both {} and {}",
                        idx,
                        literal.abs(),
                        -literal.abs()
                    ));
                }
                let entry: &mut Vec<usize> = &mut clause_index[slot(literal)];
                if entry.last() != Some(&idx) {
                    entry.push(idx);
                }
            }
        }

        Ok(Self {
            num_letters,
            clauses,
            clause_index,
        })
    }

    /// Generates a random formula where no clause repeats a letter.
    ///
    /// Each literal gets a uniform polarity and a uniform letter; a letter
    /// already present in the clause is drawn again.
    pub fn generate_random<R: Rng + ?Sized>(
        num_letters: usize,
        num_clauses: usize,
        clause_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        check_num_letters(num_letters)?;
        if clause_length == 0 || clause_length > num_letters {
            return Err(anyhow!(
                "Invalid clause length. Expected: 1..={}, Actual: {}",
                num_letters,
                clause_length
            ));
        }
        let letter_distr = Uniform::new_inclusive(1, num_letters as Literal);

        let clauses = (0..num_clauses)
            .map(|_| {
                let mut clause = Vec::with_capacity(clause_length);
                while clause.len() < clause_length {
                    let polarity = if rng.gen::<bool>() { -1 } else { 1 };
                    let letter = letter_distr.sample(rng);
                    if clause.iter().all(|l: &Literal| l.abs() != letter) {
                        clause.push(letter * polarity);
                    }
                }
                clause
            })
            .collect();

        Formula::new(num_letters, clauses)
    }

    pub fn num_letters(&self) -> usize {
        self.num_letters
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Length shared by all clauses, 0 for an empty formula.
    pub fn clause_length(&self) -> usize {
        self.clauses.first().map_or(0, |clause| clause.len())
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }

    pub fn clause(&self, idx: usize) -> &[Literal] {
        &self.clauses[idx]
    }

    /// Indices of the clauses containing `literal`, in ascending order.
    pub fn clauses_containing(&self, literal: Literal) -> &[usize] {
        assert!(
            literal != 0 && literal.unsigned_abs() as usize <= self.num_letters,
            "literal {} out of range for {} letters",
            literal,
            self.num_letters
        );
        &self.clause_index[slot(literal)]
    }

    pub fn is_clause_satisfied(&self, idx: usize, assignment: &[bool]) -> bool {
        self.clauses[idx]
            .iter()
            .any(|&literal| is_literal_satisfied(literal, assignment))
    }

    pub fn num_satisfied(&self, assignment: &[bool]) -> usize {
        (0..self.clauses.len())
            .filter(|&idx| self.is_clause_satisfied(idx, assignment))
            .count()
    }

    pub fn num_unsatisfied(&self, assignment: &[bool]) -> usize {
        self.clauses.len() - self.num_satisfied(assignment)
    }

    /// Fraction of satisfied clauses in `[0, 1]`. An empty formula counts as fully satisfied.
    pub fn fraction_satisfied(&self, assignment: &[bool]) -> f64 {
        if self.clauses.is_empty() {
            return 1.0;
        }
        self.num_satisfied(assignment) as f64 / self.clauses.len() as f64
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.num_satisfied(assignment) == self.clauses.len()
    }

    pub fn unsatisfied_clause_indices(&self, assignment: &[bool]) -> Vec<usize> {
        (0..self.clauses.len())
            .filter(|&idx| !self.is_clause_satisfied(idx, assignment))
            .collect()
    }

    /// The literal of `letter` that currently holds under `assignment`.
    fn current_literal(&self, assignment: &[bool], letter: Letter) -> Literal {
        assert!(
            (1..=self.num_letters).contains(&letter),
            "letter {} out of range 1..={}",
            letter,
            self.num_letters
        );
        if assignment[letter - 1] {
            letter as Literal
        } else {
            -(letter as Literal)
        }
    }

    /// Number of satisfied clauses that flipping `letter` would leave unsatisfied.
    ///
    /// Every clause holding the current literal of `letter` is satisfied by it;
    /// the clause breaks unless another of its literals also holds.
    ///
    /// # Panics
    ///
    /// When `letter` is outside `1..=num_letters`.
    pub fn calculate_break(&self, assignment: &[bool], letter: Letter) -> usize {
        let literal = self.current_literal(assignment, letter);
        self.clause_index[slot(literal)]
            .iter()
            .filter(|&&idx| {
                !self.clauses[idx]
                    .iter()
                    .any(|&other| other != literal && is_literal_satisfied(other, assignment))
            })
            .count()
    }

    /// Number of unsatisfied clauses that flipping `letter` would satisfy.
    ///
    /// Candidates hold the negation of the current literal, which is false, so
    /// a candidate is made exactly when none of its literals holds.
    ///
    /// # Panics
    ///
    /// When `letter` is outside `1..=num_letters`.
    pub fn calculate_make(&self, assignment: &[bool], letter: Letter) -> usize {
        let literal = self.current_literal(assignment, letter);
        self.clause_index[slot(-literal)]
            .iter()
            .filter(|&&idx| {
                !self.clauses[idx]
                    .iter()
                    .any(|&other| is_literal_satisfied(other, assignment))
            })
            .count()
    }

    /// Net increase of satisfied clauses after flipping `letter`.
    pub fn calculate_gain(&self, assignment: &[bool], letter: Letter) -> i64 {
        self.calculate_make(assignment, letter) as i64
            - self.calculate_break(assignment, letter) as i64
    }

    /// Net decrease of satisfied clauses after flipping `letter`.
    pub fn calculate_damage(&self, assignment: &[bool], letter: Letter) -> i64 {
        -self.calculate_gain(assignment, letter)
    }

    /// Draws every letter independently true or false with probability 0.5.
    pub fn random_assignment<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        (0..self.num_letters).map(|_| rng.gen::<bool>()).collect()
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        if solution.variables.len() != self.num_letters {
            return Err(anyhow!(
                "Invalid number of variables. Expected: {}, Actual: {}",
                self.num_letters,
                solution.variables.len()
            ));
        }

        match (0..self.clauses.len())
            .find(|&idx| !self.is_clause_satisfied(idx, &solution.variables))
        {
            Some(idx) => Err(anyhow!("Clause '{}' not satisfied", idx)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_distinct_per_polarity() {
        assert_eq!(slot(1), 0);
        assert_eq!(slot(-1), 1);
        assert_eq!(slot(3), 4);
        assert_eq!(slot(-3), 5);
    }

    #[test]
    fn test_repeated_literal_is_indexed_once() {
        let formula = Formula::new(2, vec![vec![1, 1], vec![-2, 1]]).unwrap();
        assert_eq!(formula.clauses_containing(1), &[0, 1]);
        assert_eq!(formula.clauses_containing(-2), &[1]);
        assert!(formula.clauses_containing(2).is_empty());
    }
}
