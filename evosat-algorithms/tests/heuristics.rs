use evosat_algorithms::heuristics::{flip, Heuristic};
use evosat_challenges::Formula;
use rand::{rngs::StdRng, SeedableRng};

fn random_instance(seed: u64) -> (Formula, Vec<bool>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let formula = Formula::generate_random(30, 120, 3, &mut rng).unwrap();
    let assignment = formula.random_assignment(&mut rng);
    (formula, assignment)
}

fn all_heuristics() -> Vec<Heuristic> {
    vec![
        Heuristic::Flip,
        Heuristic::stochastic_local_search(50, 1.0, 0.0).unwrap(),
        Heuristic::stochastic_local_search(50, 2.3, 0.5).unwrap(),
        Heuristic::walk_sat(50, 0.5).unwrap(),
        Heuristic::walk_sat(50, 0.0).unwrap(),
    ]
}

#[test]
fn test_flip_single_unit_clause() {
    let formula = Formula::new(1, vec![vec![1]]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(flip::improve(&[false], &formula, &mut rng), vec![true]);
}

#[test]
fn test_flip_solves_independent_unit_clauses() {
    let formula = Formula::new(4, vec![vec![1], vec![-2], vec![3], vec![-4]]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let improved = Heuristic::Flip.improve(&[false, true, false, true], &formula, &mut rng);
    assert_eq!(improved, vec![true, false, true, false]);
}

#[test]
fn test_flip_never_worsens() {
    for seed in 0..20 {
        let (formula, assignment) = random_instance(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let improved = Heuristic::Flip.improve(&assignment, &formula, &mut rng);
        assert!(formula.num_unsatisfied(&improved) <= formula.num_unsatisfied(&assignment));
    }
}

#[test]
fn test_satisfying_input_is_returned_unchanged() {
    let formula = Formula::new(2, vec![vec![1, 2], vec![-1, -2]]).unwrap();
    for heuristic in all_heuristics() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            heuristic.improve(&[true, false], &formula, &mut rng),
            vec![true, false],
            "{}",
            heuristic
        );
    }
}

#[test]
fn test_zero_steps_return_input() {
    let (formula, assignment) = random_instance(11);
    let mut rng = StdRng::seed_from_u64(0);
    let sls = Heuristic::stochastic_local_search(0, 1.0, 0.0).unwrap();
    let walk_sat = Heuristic::walk_sat(0, 0.5).unwrap();
    assert_eq!(sls.improve(&assignment, &formula, &mut rng), assignment);
    assert_eq!(walk_sat.improve(&assignment, &formula, &mut rng), assignment);
}

#[test]
fn test_sls_prefers_zero_break_letter() {
    // x2 breaks nothing, so with epsilon 0 its weight is unbounded
    let formula = Formula::new(2, vec![vec![1, 2], vec![-1, 2]]).unwrap();
    let sls = Heuristic::stochastic_local_search(10, 1.0, 0.0).unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(sls.improve(&[false, false], &formula, &mut rng), vec![false, true]);
    }
}

#[test]
fn test_sls_reaches_solution_of_small_formula() {
    let formula = Formula::new(2, vec![vec![1, 2], vec![-1, 2]]).unwrap();
    let sls = Heuristic::stochastic_local_search(50, 2.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let improved = sls.improve(&[false, false], &formula, &mut rng);
    assert!(formula.is_satisfied_by(&improved));
}

#[test]
fn test_walk_sat_greedy_takes_first_best_letter() {
    let formula = Formula::new(2, vec![vec![1, 2]]).unwrap();
    let walk_sat = Heuristic::walk_sat(5, 0.0).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(walk_sat.improve(&[false, false], &formula, &mut rng), vec![true, false]);
}

#[test]
fn test_walk_sat_keeps_picking_from_initially_unsatisfied_clauses() {
    // Only clause 0 starts unsatisfied. Fixing it through x1 breaks clause 1,
    // which x3 alone could fix, but every later step draws clause 0 again and
    // undoes the flip of x1.
    let formula = Formula::new(4, vec![vec![1, 2], vec![-1, 3], vec![-2, 4]]).unwrap();
    let start = [false, false, false, false];
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let two_steps = Heuristic::walk_sat(2, 0.0).unwrap();
        assert_eq!(two_steps.improve(&start, &formula, &mut rng), start.to_vec());

        let three_steps = Heuristic::walk_sat(3, 0.0).unwrap();
        assert_eq!(
            three_steps.improve(&start, &formula, &mut rng),
            vec![true, false, false, false]
        );
    }
}

#[test]
fn test_walk_sat_random_move_flips_a_clause_letter() {
    let formula = Formula::new(3, vec![vec![1, 2]]).unwrap();
    let walk_sat = Heuristic::walk_sat(1, 1.0).unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let improved = walk_sat.improve(&[false, false, false], &formula, &mut rng);
        assert!(improved == vec![true, false, false] || improved == vec![false, true, false]);
    }
}

#[test]
fn test_same_seed_same_result() {
    let (formula, assignment) = random_instance(5);
    for heuristic in all_heuristics() {
        let a = heuristic.improve(&assignment, &formula, &mut StdRng::seed_from_u64(8));
        let b = heuristic.improve(&assignment, &formula, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b, "{}", heuristic);
        assert_eq!(a.len(), formula.num_letters());
    }
}

#[test]
fn test_invalid_parameters() {
    assert!(Heuristic::stochastic_local_search(10, 1.0, -0.5).is_err());
    assert!(Heuristic::stochastic_local_search(10, f64::NAN, 0.0).is_err());
    assert!(Heuristic::stochastic_local_search(10, 1.0, f64::NAN).is_err());
    assert!(Heuristic::walk_sat(10, 1.5).is_err());
    assert!(Heuristic::walk_sat(10, -0.1).is_err());
}

#[test]
fn test_descriptions() {
    assert_eq!(Heuristic::Flip.to_string(), "Flip");
    assert_eq!(
        Heuristic::stochastic_local_search(10, 1.0, 0.0).unwrap().to_string(),
        "SLS[Steps = 10, Cb = 1.00, epsilon = 0.00]"
    );
    assert_eq!(
        Heuristic::walk_sat(10, 0.5).unwrap().to_string(),
        "WalkSAT[Steps = 10, Random Move Prob = 0.50]"
    );
}
