use super::{Evaluated, Individual, Run, SearchStrategy};
use anyhow::{anyhow, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlaceboConfig {
    pub population_size: usize,
    /// Random copies mutated per iteration.
    pub number_of_samples: usize,
    pub max_iterations: usize,
}

impl Default for PlaceboConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            number_of_samples: 7,
            max_iterations: 20,
        }
    }
}

/// Control baseline with the genetic algorithm's budget but no fitness guidance.
///
/// Each iteration copies random members, mutates each copy with a random
/// probability and builds the next population by uniform draws from the
/// members and the copies together.
#[derive(Debug, Clone)]
pub struct Placebo {
    config: PlaceboConfig,
}

impl Placebo {
    pub fn new(config: PlaceboConfig) -> Result<Self> {
        if config.population_size == 0 {
            return Err(anyhow!("Population size must be positive"));
        }
        Ok(Self { config })
    }
}

impl SearchStrategy for Placebo {
    fn population_size(&self) -> usize {
        self.config.population_size
    }

    fn max_iterations(&self) -> usize {
        self.config.max_iterations
    }

    fn iterate<'f>(&self, population: Vec<Evaluated<'f>>, run: &mut Run<'f>) -> Vec<Evaluated<'f>> {
        let mut samples: Vec<Individual<'f>> = (0..self.config.number_of_samples)
            .map(|_| {
                let k = run.rng().gen_range(0..population.len());
                population[k].individual().clone()
            })
            .collect();

        for sample in samples.iter_mut() {
            let rng = run.rng();
            if rng.gen::<f64>() < rng.gen::<f64>() {
                let gene_mutation_probability = rng.gen::<f64>();
                sample.mutate(gene_mutation_probability, rng);
            }
        }

        run.refine(&mut samples);
        let samples = run.evaluate_until_solved(samples);

        let pool_size = population.len() + samples.len();
        (0..self.config.population_size)
            .map(|_| {
                let k = run.rng().gen_range(0..pool_size);
                match population.get(k) {
                    Some(member) => member.clone(),
                    None => samples[k - population.len()].clone(),
                }
            })
            .collect()
    }
}

impl fmt::Display for Placebo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Placebo[Number of individuals = {}, Number of crossovers = {}, MNI = {}]",
            self.config.population_size, self.config.number_of_samples, self.config.max_iterations
        )
    }
}
