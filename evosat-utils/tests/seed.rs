use evosat_utils::{resolve_seed, seeded_rng};
use rand::Rng;

#[test]
fn test_resolve_seed() {
    assert_eq!(resolve_seed(42), 42);
    assert_ne!(resolve_seed(0), 0);
}

#[test]
fn test_seeded_rng_is_reproducible() {
    let mut a = seeded_rng(9);
    let mut b = seeded_rng(9);
    for _ in 0..8 {
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
