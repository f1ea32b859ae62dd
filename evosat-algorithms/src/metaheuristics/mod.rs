//! Population-based search strategies and the loop that drives them.
use crate::heuristics::Heuristic;
use evosat_challenges::Formula;
use logging_timer::time;
use std::fmt;

mod genetic_algorithm;
pub use genetic_algorithm::*;
mod individual;
pub use individual::*;
mod placebo;
pub use placebo::*;
mod report;
pub use report::*;
mod run;
pub use run::*;

/// One generation step over a population, plus the limits [`solve`] needs.
///
/// Initialization, best-found tracking, termination and reporting are shared
/// by all strategies and live in [`solve`].
pub trait SearchStrategy: fmt::Display {
    fn population_size(&self) -> usize;

    fn max_iterations(&self) -> usize;

    /// Produces the next population from the current one.
    fn iterate<'f>(&self, population: Vec<Evaluated<'f>>, run: &mut Run<'f>) -> Vec<Evaluated<'f>>;
}

/// Runs `strategy` on `formula` until it is satisfied or the iteration budget
/// is spent. Equal seeds give equal reports, timings aside.
#[time]
pub fn solve(
    strategy: &dyn SearchStrategy,
    formula: &Formula,
    heuristic: Option<&Heuristic>,
    seed: u64,
) -> Report {
    log::info!(
        "Solving {} clauses over {} letters with {} (heuristic: {})",
        formula.num_clauses(),
        formula.num_letters(),
        strategy,
        describe_heuristic(heuristic)
    );
    let mut run = Run::new(formula, heuristic, seed);

    let initial: Vec<Individual> = (0..strategy.population_size())
        .map(|_| Individual::random(formula, run.rng()))
        .collect();
    let mut population = run.evaluate_all(initial);
    if run.heuristic().is_some() {
        let mut individuals: Vec<Individual> = population
            .into_iter()
            .map(Evaluated::into_individual)
            .collect();
        run.refine(&mut individuals);
        population = run.evaluate_all(individuals);
    }

    let mut iterations_performed = 0;
    for iteration in 1..=strategy.max_iterations() {
        if run.is_solved() {
            break;
        }
        run.set_iteration(iteration);
        population = strategy.iterate(population, &mut run);
        iterations_performed = iteration;
        log::debug!("Iteration {}: {}", iteration, run.best_found().value);
    }

    let duration = run.elapsed();
    let best_found = run.into_best_found();
    Report {
        strategy: strategy.to_string(),
        heuristic: describe_heuristic(heuristic),
        seed,
        best_found_solution: best_found.variables,
        best_found_value: best_found.value,
        first_iteration_of_best_found: best_found.iteration,
        time_of_best_found: best_found.found_after.as_secs_f64(),
        iterations_performed,
        duration: duration.as_secs_f64(),
    }
}

fn describe_heuristic(heuristic: Option<&Heuristic>) -> String {
    heuristic.map_or_else(|| "none".to_string(), |h| h.to_string())
}
