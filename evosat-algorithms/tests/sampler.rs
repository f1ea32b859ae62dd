use evosat_algorithms::WeightedSampler;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_single_positive_weight_always_drawn() {
    let sampler = WeightedSampler::new(vec![('a', 0.0), ('b', 2.5), ('c', 0.0)]);
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..1000 {
        assert_eq!(sampler.draw(&mut rng), Some(&'b'));
    }
}

#[test]
fn test_all_zero_weights_fall_back_to_last() {
    let sampler = WeightedSampler::new(vec![(1, 0.0), (2, 0.0), (3, 0.0)]);
    assert_eq!(sampler.total_weight(), 0.0);
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..100 {
        assert_eq!(sampler.draw(&mut rng), Some(&3));
    }
}

#[test]
fn test_empty_sampler_draws_nothing() {
    let sampler = WeightedSampler::<u8>::new(Vec::new());
    assert!(sampler.is_empty());
    assert_eq!(sampler.draw(&mut StdRng::seed_from_u64(0)), None);
}

#[test]
fn test_negative_and_nan_weights_count_as_zero() {
    let sampler = WeightedSampler::from_weights(vec!['a', 'b', 'c'], vec![-1.0, f64::NAN, 1.0]);
    assert_eq!(sampler.len(), 3);
    assert_eq!(sampler.total_weight(), 1.0);
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        assert_eq!(sampler.draw(&mut rng), Some(&'c'));
    }
}

#[test]
fn test_infinite_weights_dominate() {
    let sampler = WeightedSampler::new(vec![(1, 0.5), (2, f64::INFINITY), (3, f64::INFINITY)]);
    let mut rng = StdRng::seed_from_u64(2);
    let mut seen = [0usize; 4];
    for _ in 0..1000 {
        seen[*sampler.draw(&mut rng).unwrap()] += 1;
    }
    assert_eq!(seen[1], 0);
    assert!(seen[2] > 0 && seen[3] > 0);
}

#[test]
fn test_draws_follow_weights() {
    let sampler = WeightedSampler::from_weights(0..2, vec![1.0, 3.0]);
    let mut rng = StdRng::seed_from_u64(3);
    let n = 20000;
    let heavy = (0..n).filter(|_| sampler.draw(&mut rng) == Some(&1)).count();
    let share = heavy as f64 / n as f64;
    assert!((share - 0.75).abs() < 0.02, "share {}", share);
}

#[test]
fn test_same_seed_same_draws() {
    let sampler = WeightedSampler::from_weights(0..5, vec![0.1, 0.4, 0.2, 0.2, 0.1]);
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let first: Vec<usize> = (0..200).map(|_| *sampler.draw(&mut a).unwrap()).collect();
    let second: Vec<usize> = (0..200).map(|_| *sampler.draw(&mut b).unwrap()).collect();
    assert_eq!(first, second);
}
