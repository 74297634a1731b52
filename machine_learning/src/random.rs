use rand::{SeedableRng, rngs::StdRng};

/// Builds the random number generator every stochastic component of the crate draws from.
///
/// A fixed seed makes runs reproducible, without one the generator is seeded from the OS.
pub(crate) fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
