use evosat_algorithms::{
    heuristics::Heuristic,
    metaheuristics::{solve, Placebo, PlaceboConfig},
};
use evosat_challenges::Formula;

fn placebo(max_iterations: usize) -> Placebo {
    Placebo::new(PlaceboConfig {
        max_iterations,
        ..PlaceboConfig::default()
    })
    .unwrap()
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let formula = Formula::new(
        6,
        vec![
            vec![1, -2, 3],
            vec![-1, 4, -5],
            vec![2, 5, -6],
            vec![-3, -4, 6],
            vec![1, 5, 6],
        ],
    )
    .unwrap();
    let a = solve(&placebo(25), &formula, None, 42);
    let b = solve(&placebo(25), &formula, None, 42);
    assert_eq!(a.best_found_solution, b.best_found_solution);
    assert_eq!(a.best_found_value, b.best_found_value);
    assert_eq!(a.first_iteration_of_best_found, b.first_iteration_of_best_found);
    assert_eq!(a.iterations_performed, b.iterations_performed);
}

#[test]
fn test_unsatisfiable_formula_uses_whole_budget() {
    let formula = Formula::new(2, vec![vec![1], vec![-1], vec![2]]).unwrap();
    let report = solve(&placebo(12), &formula, None, 9);
    assert_eq!(report.iterations_performed, 12);
    assert_eq!(
        formula.fraction_satisfied(&report.best_found_solution),
        report.best_found_value
    );
    assert!(report.best_found_value <= 2.0 / 3.0);
}

#[test]
fn test_zero_samples_still_runs() {
    let formula = Formula::new(1, vec![vec![1], vec![-1]]).unwrap();
    let strategy = Placebo::new(PlaceboConfig {
        population_size: 3,
        number_of_samples: 0,
        max_iterations: 4,
    })
    .unwrap();
    assert_eq!(solve(&strategy, &formula, None, 1).iterations_performed, 4);
}

#[test]
fn test_heuristic_refines_initial_population() {
    let formula = Formula::new(3, vec![vec![1], vec![-2], vec![3]]).unwrap();
    let report = solve(&placebo(10), &formula, Some(&Heuristic::Flip), 2);
    assert_eq!(report.best_found_value, 1.0);
    assert_eq!(report.best_found_solution, vec![true, false, true]);
    assert_eq!(report.iterations_performed, 0);
}

#[test]
fn test_invalid_configuration() {
    assert!(Placebo::new(PlaceboConfig {
        population_size: 0,
        ..PlaceboConfig::default()
    })
    .is_err());
}

#[test]
fn test_description() {
    assert_eq!(
        placebo(20).to_string(),
        "Placebo[Number of individuals = 10, Number of crossovers = 7, MNI = 20]"
    );
}
