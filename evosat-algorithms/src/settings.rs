use crate::{
    heuristics::Heuristic,
    metaheuristics::{
        GeneticAlgorithm, GeneticAlgorithmConfig, Placebo, PlaceboConfig, SearchStrategy,
    },
};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaheuristicKind {
    #[serde(rename = "GA")]
    GeneticAlgorithm,
    Placebo,
}

impl FromStr for MetaheuristicKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ga" => Ok(MetaheuristicKind::GeneticAlgorithm),
            "placebo" => Ok(MetaheuristicKind::Placebo),
            _ => Err(anyhow!(
                "Unknown metaheuristic '{}'. Expected one of: GA, Placebo",
                s
            )),
        }
    }
}

impl fmt::Display for MetaheuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaheuristicKind::GeneticAlgorithm => write!(f, "GA"),
            MetaheuristicKind::Placebo => write!(f, "Placebo"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    None,
    Flip,
    Sls,
    WalkSat,
}

impl FromStr for HeuristicKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(HeuristicKind::None),
            "flip" => Ok(HeuristicKind::Flip),
            "sls" => Ok(HeuristicKind::Sls),
            "walksat" => Ok(HeuristicKind::WalkSat),
            _ => Err(anyhow!(
                "Unknown heuristic '{}'. Expected one of: none, flip, sls, walksat",
                s
            )),
        }
    }
}

/// Complete configuration of one run. Missing JSON fields take the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub population_size: usize,
    pub number_of_crossovers: usize,
    pub individual_mutation_probability: f64,
    pub gene_mutation_probability: f64,
    pub max_iterations: usize,
    pub metaheuristic: MetaheuristicKind,
    pub heuristic: HeuristicKind,
    /// Step budget of `sls` and `walksat`.
    pub steps: usize,
    pub cb: f64,
    pub epsilon: f64,
    /// Random move probability of `walksat`.
    pub q: f64,
    /// 0 asks for a random seed.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let ga = GeneticAlgorithmConfig::default();
        Self {
            population_size: ga.population_size,
            number_of_crossovers: ga.number_of_crossovers,
            individual_mutation_probability: ga.individual_mutation_probability,
            gene_mutation_probability: ga.gene_mutation_probability,
            max_iterations: ga.max_iterations,
            metaheuristic: MetaheuristicKind::GeneticAlgorithm,
            heuristic: HeuristicKind::None,
            steps: 10,
            cb: 1.0,
            epsilon: 0.0,
            q: 0.5,
            seed: 0,
        }
    }
}

impl Settings {
    pub fn build_heuristic(&self) -> Result<Option<Heuristic>> {
        Ok(match self.heuristic {
            HeuristicKind::None => None,
            HeuristicKind::Flip => Some(Heuristic::Flip),
            HeuristicKind::Sls => Some(Heuristic::stochastic_local_search(
                self.steps,
                self.cb,
                self.epsilon,
            )?),
            HeuristicKind::WalkSat => Some(Heuristic::walk_sat(self.steps, self.q)?),
        })
    }

    pub fn build_strategy(&self) -> Result<Box<dyn SearchStrategy>> {
        Ok(match self.metaheuristic {
            MetaheuristicKind::GeneticAlgorithm => {
                Box::new(GeneticAlgorithm::new(GeneticAlgorithmConfig {
                    population_size: self.population_size,
                    number_of_crossovers: self.number_of_crossovers,
                    individual_mutation_probability: self.individual_mutation_probability,
                    gene_mutation_probability: self.gene_mutation_probability,
                    max_iterations: self.max_iterations,
                })?)
            }
            MetaheuristicKind::Placebo => Box::new(Placebo::new(PlaceboConfig {
                population_size: self.population_size,
                number_of_samples: self.number_of_crossovers,
                max_iterations: self.max_iterations,
            })?),
        })
    }
}
