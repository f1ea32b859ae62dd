use super::{Evaluated, Individual};
use crate::heuristics::Heuristic;
use evosat_challenges::Formula;
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};

/// Best assignment seen during one run. Its value never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct BestFound {
    pub value: f64,
    pub variables: Vec<bool>,
    /// Iteration of the first discovery, 0 for the initial population.
    pub iteration: usize,
    /// Time from the start of the run to the discovery.
    pub found_after: Duration,
    pub satisfies: bool,
}

impl BestFound {
    fn empty() -> Self {
        Self {
            value: -1.0,
            variables: Vec::new(),
            iteration: 0,
            found_after: Duration::ZERO,
            satisfies: false,
        }
    }
}

/// State shared by every step of one `solve` call: the formula, the optional
/// refinement heuristic, the run's own generator and the best-found record.
pub struct Run<'f> {
    formula: &'f Formula,
    heuristic: Option<&'f Heuristic>,
    rng: StdRng,
    best_found: BestFound,
    current_iteration: usize,
    started: Instant,
}

impl<'f> Run<'f> {
    pub fn new(formula: &'f Formula, heuristic: Option<&'f Heuristic>, seed: u64) -> Self {
        Self {
            formula,
            heuristic,
            rng: StdRng::seed_from_u64(seed),
            best_found: BestFound::empty(),
            current_iteration: 0,
            started: Instant::now(),
        }
    }

    pub fn heuristic(&self) -> Option<&'f Heuristic> {
        self.heuristic
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn best_found(&self) -> &BestFound {
        &self.best_found
    }

    pub fn into_best_found(self) -> BestFound {
        self.best_found
    }

    pub(crate) fn set_iteration(&mut self, iteration: usize) {
        self.current_iteration = iteration;
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_solved(&self) -> bool {
        self.best_found.satisfies
    }

    /// Evaluates `individual`, recording it when it strictly beats the best found.
    pub fn evaluate(&mut self, individual: Individual<'f>) -> Evaluated<'f> {
        let evaluated = individual.evaluate();
        if evaluated.fitness() > self.best_found.value {
            self.best_found = BestFound {
                value: evaluated.fitness(),
                variables: evaluated.variables().to_vec(),
                iteration: self.current_iteration,
                found_after: self.started.elapsed(),
                satisfies: self.formula.is_satisfied_by(evaluated.variables()),
            };
            log::trace!(
                "New best value {} at iteration {}",
                self.best_found.value,
                self.current_iteration
            );
        }
        evaluated
    }

    pub fn evaluate_all(&mut self, individuals: Vec<Individual<'f>>) -> Vec<Evaluated<'f>> {
        individuals
            .into_iter()
            .map(|individual| self.evaluate(individual))
            .collect()
    }

    /// Evaluates in order and stops at the first individual that satisfies the
    /// formula. The individuals after it are dropped unevaluated.
    pub fn evaluate_until_solved(
        &mut self,
        individuals: Vec<Individual<'f>>,
    ) -> Vec<Evaluated<'f>> {
        let mut evaluated = Vec::with_capacity(individuals.len());
        for individual in individuals {
            evaluated.push(self.evaluate(individual));
            if self.is_solved() {
                break;
            }
        }
        evaluated
    }

    /// Applies the configured heuristic, if any, to every individual.
    pub fn refine(&mut self, individuals: &mut [Individual<'f>]) {
        if let Some(heuristic) = self.heuristic {
            for individual in individuals.iter_mut() {
                individual.apply_heuristic(heuristic, &mut self.rng);
            }
        }
    }
}
