//! Generational mutate-and-select loop over a fixed-size population.
//!
//! # Generation cycle
//!
//! 1. **Reset** - Every fitness score goes back to 0.
//! 2. **Tournament** - Every ordered pair `(i, j)` with `i != j` plays one match,
//!    `i` moving first. Winners gain [`WIN_REWARD`](gomoku_engine::WIN_REWARD),
//!    losers take [`LOSS_PENALTY`](gomoku_engine::LOSS_PENALTY), draws change nothing.
//! 3. **Rank** - Stable sort by descending fitness; ties keep their previous order.
//! 4. **Regenerate** - For `i < N/2`, slot `i + N/2` is overwritten by a mutated
//!    copy of slot `i`. The top half survives unchanged.
//!
//! # Parallelization
//!
//! The population owns one [`Board`] per slot. For each `i` the matches against
//! all `j` run on scoped threads, each on board `j`, so no board is shared
//! between concurrently running matches. Outcomes are written to per-slot
//! cells and only turned into fitness changes after every thread for that `i`
//! has joined; the boards are reset at the same point. Regeneration spawns one
//! thread per top-half slot, each writing only its own bottom-half child and
//! drawing from its own generator seeded by the caller's.
//!
//! # Example
//!
//! ```rust,no_run
//! use gomoku_training::{genetic::Population, mutation::MutationPolicy};
//!
//! let mut rng = rand::rng();
//! let mut population = Population::random(50, &mut rng);
//! for _ in 0..700 {
//!     population.run_generation(&MutationPolicy::default(), &mut rng)?;
//! }
//! println!("{}", population.individuals()[0].agent());
//! # Ok::<(), gomoku_engine::IllegalMoveError>(())
//! ```

use std::{cmp::Reverse, iter, ops::Range, thread};

use gomoku_engine::{Board, IllegalMoveError, MatchOutcome, play_match};
use gomoku_evaluator::agent::Agent;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::mutation::MutationPolicy;

/// A population slot: an agent and its fitness for the current generation.
#[derive(Debug, Clone)]
pub struct Individual {
    agent: Agent,
    fitness: i32,
}

impl Individual {
    #[must_use]
    pub fn new(agent: Agent) -> Self {
        Self { agent, fitness: 0 }
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Fitness accumulated in the last tournament.
    #[must_use]
    pub fn fitness(&self) -> i32 {
        self.fitness
    }
}

/// Minimum, maximum and mean fitness of a population.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
#[display("min {min}, max {max}, mean {mean:.2}")]
pub struct FitnessStats {
    pub min: i32,
    pub max: i32,
    pub mean: f32,
}

/// The evolving population together with the boards its matches are played on.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    boards: Vec<Board>,
}

impl Population {
    /// Creates a population from the given agents, in order.
    #[must_use]
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        let boards = vec![Board::new(); agents.len()];
        Self {
            individuals: agents.into_iter().map(Individual::new).collect(),
            boards,
        }
    }

    /// Creates a population of `count` random agents.
    #[must_use]
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::seeded(vec![], count, rng)
    }

    /// Creates a population of `count` agents whose first slots are taken from
    /// `seeds` and the remainder initialized randomly.
    ///
    /// Seeds beyond `count` are ignored.
    #[must_use]
    pub fn seeded<R>(mut seeds: Vec<Agent>, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        seeds.truncate(count);
        let missing = count - seeds.len();
        seeds.extend(iter::repeat_with(|| Agent::random(rng)).take(missing));
        Self::from_agents(seeds)
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Runs one full generation: tournament, ranking and regeneration.
    pub fn run_generation<R>(
        &mut self,
        policy: &MutationPolicy,
        rng: &mut R,
    ) -> Result<(), IllegalMoveError>
    where
        R: Rng + ?Sized,
    {
        self.evaluate_fitness()?;
        self.regenerate(policy, rng);
        Ok(())
    }

    /// Recomputes every fitness from scratch with a round-robin tournament and
    /// ranks the population by it.
    pub fn evaluate_fitness(&mut self) -> Result<(), IllegalMoveError> {
        self.play_tournament()?;
        self.rank();
        Ok(())
    }

    /// Resets all fitness scores and plays every ordered pair once.
    pub fn play_tournament(&mut self) -> Result<(), IllegalMoveError> {
        for ind in &mut self.individuals {
            ind.fitness = 0;
        }

        let count = self.individuals.len();
        let mut outcomes: Vec<Option<Result<MatchOutcome, IllegalMoveError>>> =
            vec![None; count];
        for i in 0..count {
            let individuals = &self.individuals;
            thread::scope(|s| {
                let slots = iter::zip(&mut self.boards, &mut outcomes);
                for (j, (board, outcome)) in slots.enumerate() {
                    if i == j {
                        continue;
                    }
                    let first = &individuals[i].agent;
                    let second = &individuals[j].agent;
                    s.spawn(move || {
                        *outcome = Some(play_match(board, first, second));
                    });
                }
            });

            for board in &mut self.boards {
                board.reset();
            }
            for (j, outcome) in outcomes.iter_mut().enumerate() {
                let Some(result) = outcome.take() else {
                    continue;
                };
                let (first_delta, second_delta) = result?.fitness_deltas();
                self.individuals[i].fitness += first_delta;
                self.individuals[j].fitness += second_delta;
            }
        }
        Ok(())
    }

    /// Stable-sorts the population by descending fitness.
    pub fn rank(&mut self) {
        self.individuals.sort_by_key(|ind| Reverse(ind.fitness));
    }

    /// Overwrites the bottom half with mutated copies of the top half.
    ///
    /// Slot `i + N/2` becomes the child of slot `i`. With an odd population
    /// the last slot is left untouched.
    pub fn regenerate<R>(&mut self, policy: &MutationPolicy, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let offspring = self.offspring_range();
        let seeds: Vec<u64> = offspring.clone().map(|_| rng.random()).collect();
        let (parents, children) = self.individuals.split_at_mut(offspring.start);
        thread::scope(|s| {
            for ((parent, child), seed) in iter::zip(iter::zip(&*parents, children), seeds) {
                s.spawn(move || {
                    let mut rng = Pcg64Mcg::seed_from_u64(seed);
                    child.agent = policy.mutate(&parent.agent, &mut rng);
                });
            }
        });
    }

    /// Slots overwritten by [`Population::regenerate`].
    ///
    /// After regeneration the fitness stored in these slots belongs to the
    /// agents they replaced.
    #[must_use]
    pub fn offspring_range(&self) -> Range<usize> {
        let half = self.individuals.len() / 2;
        half..half * 2
    }

    /// Computes fitness statistics, or `None` for an empty population.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<FitnessStats> {
        let min = self.individuals.iter().map(Individual::fitness).min()?;
        let max = self.individuals.iter().map(Individual::fitness).max()?;
        let sum: i64 = self.individuals.iter().map(|ind| i64::from(ind.fitness)).sum();
        #[expect(clippy::cast_precision_loss)]
        let mean = sum as f32 / self.individuals.len() as f32;
        Some(FitnessStats { min, max, mean })
    }
}
