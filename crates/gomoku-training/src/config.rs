use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::mutation::MutationPolicy;

/// Number of agents in a population.
pub const DEFAULT_POPULATION_SIZE: usize = 50;
/// Number of generations in a training run.
pub const DEFAULT_GENERATIONS: usize = 700;
/// Number of top agents printed after training.
pub const REPORT_COUNT: usize = 5;

/// Parameters of one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation: MutationPolicy,
    /// Seed for the master generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            mutation: MutationPolicy::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Creates the master generator for this run.
    ///
    /// With a fixed seed, initialization and every mutation are reproducible.
    #[must_use]
    pub fn rng(&self) -> Pcg64Mcg {
        match self.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_rng(&mut rand::rng()),
        }
    }
}
