use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Chooses which files of a term go to the validation split.
pub trait Selector {
    /// Return exactly `k` distinct entries of `files` (`k <= files.len()`).
    fn select(&mut self, files: &[PathBuf], k: usize) -> Vec<PathBuf>;
}

/// Uniform random selection without replacement.
#[derive(Debug)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSelector<StdRng> {
    /// Seeded when `seed` is given (reproducible splits), otherwise seeded from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> Selector for RandomSelector<R> {
    fn select(&mut self, files: &[PathBuf], k: usize) -> Vec<PathBuf> {
        files.choose_multiple(&mut self.rng, k).cloned().collect()
    }
}
