use crate::heuristics::Heuristic;
use evosat_challenges::Formula;
use rand::Rng;

/// A candidate assignment bound to the formula it is searched against.
///
/// An individual carries no fitness. [`Individual::evaluate`] turns it into an
/// [`Evaluated`], and every operator that changes the assignment works on the
/// plain individual, so a fitness can never outlive the assignment it scored.
#[derive(Debug, Clone)]
pub struct Individual<'f> {
    formula: &'f Formula,
    variables: Vec<bool>,
}

impl<'f> Individual<'f> {
    pub fn new(formula: &'f Formula, variables: Vec<bool>) -> Self {
        assert_eq!(
            variables.len(),
            formula.num_letters(),
            "assignment length must match the number of letters"
        );
        Self { formula, variables }
    }

    pub fn random<R: Rng + ?Sized>(formula: &'f Formula, rng: &mut R) -> Self {
        Self {
            formula,
            variables: formula.random_assignment(rng),
        }
    }

    pub fn variables(&self) -> &[bool] {
        &self.variables
    }

    /// Uniform crossover: each letter comes from `self` or `other` with probability 0.5.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Individual<'f>,
        rng: &mut R,
    ) -> Individual<'f> {
        let variables = self
            .variables
            .iter()
            .zip(&other.variables)
            .map(|(&mine, &theirs)| if rng.gen::<f64>() < 0.5 { mine } else { theirs })
            .collect();
        Individual {
            formula: self.formula,
            variables,
        }
    }

    /// Flips every letter independently with `gene_mutation_probability`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, gene_mutation_probability: f64, rng: &mut R) {
        for value in self.variables.iter_mut() {
            if rng.gen::<f64>() < gene_mutation_probability {
                *value = !*value;
            }
        }
    }

    pub fn apply_heuristic<R: Rng + ?Sized>(&mut self, heuristic: &Heuristic, rng: &mut R) {
        self.variables = heuristic.improve(&self.variables, self.formula, rng);
    }

    /// Scores the individual by the fraction of satisfied clauses.
    pub fn evaluate(self) -> Evaluated<'f> {
        let fitness = self.formula.fraction_satisfied(&self.variables);
        Evaluated {
            individual: self,
            fitness,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Evaluated<'f> {
    individual: Individual<'f>,
    fitness: f64,
}

impl<'f> Evaluated<'f> {
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn individual(&self) -> &Individual<'f> {
        &self.individual
    }

    pub fn variables(&self) -> &[bool] {
        self.individual.variables()
    }

    /// Drops the fitness, giving back an individual that may be changed.
    pub fn into_individual(self) -> Individual<'f> {
        self.individual
    }
}
