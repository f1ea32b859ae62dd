use rand::{rngs::StdRng, Rng, SeedableRng};

/// Returns `seed` unchanged, or a fresh nonzero seed when `seed` is 0.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    rand::thread_rng().gen_range(1..=u64::MAX)
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
