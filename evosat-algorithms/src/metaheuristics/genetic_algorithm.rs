use super::{Evaluated, Individual, Run, SearchStrategy};
use crate::WeightedSampler;
use anyhow::{anyhow, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeneticAlgorithmConfig {
    pub population_size: usize,
    /// Parent pairs drawn per iteration, one child each.
    pub number_of_crossovers: usize,
    pub individual_mutation_probability: f64,
    pub gene_mutation_probability: f64,
    pub max_iterations: usize,
}

impl Default for GeneticAlgorithmConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            number_of_crossovers: 7,
            individual_mutation_probability: 0.1,
            gene_mutation_probability: 0.1,
            max_iterations: 20,
        }
    }
}

/// Fitness-proportional selection, uniform crossover, per-child mutation and
/// elitist replacement of all but `number_of_crossovers` parents.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    config: GeneticAlgorithmConfig,
}

impl GeneticAlgorithm {
    pub fn new(config: GeneticAlgorithmConfig) -> Result<Self> {
        if config.population_size == 0 {
            return Err(anyhow!("Population size must be positive"));
        }
        if config.number_of_crossovers > config.population_size {
            return Err(anyhow!(
                "Invalid number of crossovers. Expected: 0..={}, Actual: {}",
                config.population_size,
                config.number_of_crossovers
            ));
        }
        if config.number_of_crossovers > 0 && config.population_size < 2 {
            return Err(anyhow!(
                "Crossovers need two distinct parents, population size is {}",
                config.population_size
            ));
        }
        for (name, probability) in [
            ("individual mutation", config.individual_mutation_probability),
            ("gene mutation", config.gene_mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(anyhow!(
                    "Invalid {} probability. Expected: 0..=1, Actual: {}",
                    name,
                    probability
                ));
            }
        }
        Ok(Self { config })
    }

    /// Draws `number_of_crossovers` pairs of distinct population indices,
    /// weighted by fitness.
    ///
    /// Fitness weights are replaced by uniform ones when fewer than two
    /// individuals have positive fitness, otherwise the second draw of a pair
    /// could never differ from the first.
    fn select_parents<R: Rng + ?Sized>(
        &self,
        population: &[Evaluated],
        rng: &mut R,
    ) -> Vec<(usize, usize)> {
        if population.len() < 2 {
            return Vec::new();
        }
        let num_positive = population.iter().filter(|e| e.fitness() > 0.0).count();
        let sampler = if num_positive >= 2 {
            WeightedSampler::from_weights(
                0..population.len(),
                population.iter().map(|e| e.fitness()),
            )
        } else {
            WeightedSampler::from_weights(0..population.len(), population.iter().map(|_| 1.0))
        };

        (0..self.config.number_of_crossovers)
            .map(|_| {
                let first = draw_index(&sampler, rng);
                let mut second = draw_index(&sampler, rng);
                while second == first {
                    second = draw_index(&sampler, rng);
                }
                (first, second)
            })
            .collect()
    }
}

fn draw_index<R: Rng + ?Sized>(sampler: &WeightedSampler<usize>, rng: &mut R) -> usize {
    // callers never build an empty sampler
    sampler.draw(rng).copied().unwrap_or(0)
}

impl SearchStrategy for GeneticAlgorithm {
    fn population_size(&self) -> usize {
        self.config.population_size
    }

    fn max_iterations(&self) -> usize {
        self.config.max_iterations
    }

    fn iterate<'f>(
        &self,
        mut population: Vec<Evaluated<'f>>,
        run: &mut Run<'f>,
    ) -> Vec<Evaluated<'f>> {
        let parents = self.select_parents(&population, run.rng());

        let mut children: Vec<Individual<'f>> = parents
            .iter()
            .map(|&(a, b)| {
                population[a]
                    .individual()
                    .crossover(population[b].individual(), run.rng())
            })
            .collect();

        for child in children.iter_mut() {
            if run.rng().gen::<f64>() < self.config.individual_mutation_probability {
                child.mutate(self.config.gene_mutation_probability, run.rng());
            }
        }

        run.refine(&mut children);
        let children = run.evaluate_until_solved(children);

        // stable, so equally fit parents keep their order
        population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        population.truncate(self.config.population_size - self.config.number_of_crossovers);
        population.extend(children);
        population
    }
}

impl fmt::Display for GeneticAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GA[Population size = {}, MNI = {}, NumberOfCrossovers = {}, ",
            self.config.population_size,
            self.config.max_iterations,
            self.config.number_of_crossovers
        )?;
        write!(
            f,
            "Individual Mutation = {:.2}, Gene Mutation = {:.2}]",
            self.config.individual_mutation_probability, self.config.gene_mutation_probability
        )
    }
}
