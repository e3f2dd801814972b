use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use gomoku_engine::{Board, play_match};
use gomoku_training::{
    config::{DEFAULT_GENERATIONS, DEFAULT_POPULATION_SIZE, REPORT_COUNT, TrainingConfig},
    genetic::Population,
    mutation::{GatedMutation, MutationPolicy},
};

use crate::{
    model::population_model::PopulationModel,
    util::{self, Output},
};

const MODEL_NAME: &str = "gomoku-population";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum MutationKind {
    #[default]
    Gated,
    Jitter,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of agents in the population
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population: usize,
    /// Number of generations to run
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Seed file or model file providing the initial agents
    #[arg(long)]
    seeds: Option<PathBuf>,
    /// Mutation used to regenerate the bottom half (gated or jitter)
    #[arg(long, default_value = "gated")]
    mutation: MutationKind,
    /// Per-parameter probability of the gated mutation
    #[arg(
        long,
        default_value_t = GatedMutation::TRAINING.probability,
        value_parser = parse_probability
    )]
    mutation_rate: f64,
    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path for the trained population
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for TrainArg {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            seeds: None,
            mutation: MutationKind::default(),
            mutation_rate: GatedMutation::TRAINING.probability,
            seed: None,
            output: None,
        }
    }
}

impl TrainArg {
    fn to_config(&self) -> TrainingConfig {
        let mutation = match self.mutation {
            MutationKind::Gated => MutationPolicy::Gated(GatedMutation {
                probability: self.mutation_rate,
                ..GatedMutation::TRAINING
            }),
            MutationKind::Jitter => MutationPolicy::Jitter,
        };
        TrainingConfig {
            population_size: self.population,
            generations: self.generations,
            mutation,
            seed: self.seed,
        }
    }
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in [0, 1]"))
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.to_config();
    let mut rng = config.rng();

    let seeds = match &arg.seeds {
        Some(path) => {
            let seeds = util::read_agents_file(path)?;
            eprintln!("Loaded {} seed agents from {}", seeds.len(), path.display());
            if seeds.len() > config.population_size {
                eprintln!("  Using only the first {}", config.population_size);
            }
            seeds
        }
        None => vec![],
    };
    let mut population = Population::seeded(seeds, config.population_size, &mut rng);

    eprintln!(
        "Training {} agents for {} generations ({:?})",
        population.len(),
        config.generations,
        config.mutation
    );
    for generation in 0..config.generations {
        population
            .evaluate_fitness()
            .with_context(|| format!("Tournament failed in generation #{generation}"))?;

        if let Some(stats) = population.compute_fitness_stats() {
            let top: Vec<_> = population
                .individuals()
                .iter()
                .take(REPORT_COUNT)
                .map(|ind| ind.fitness())
                .collect();
            eprintln!("Generation #{generation}: {stats}, top {top:?}");
        }

        population.regenerate(&config.mutation, &mut rng);
    }
    eprintln!("Training completed.");

    let mut report = Output::stdout();
    if let [first, second, ..] = population.individuals() {
        let mut board = Board::new();
        let outcome = play_match(&mut board, first.agent(), second.agent())
            .context("Exhibition match failed")?;
        eprintln!("Exhibition match: {outcome:?}");
        write!(report, "{board}")?;
    }
    for (i, ind) in population
        .individuals()
        .iter()
        .take(REPORT_COUNT)
        .enumerate()
    {
        write!(report, "\n\n\nagent #{i}\n{}", ind.agent())?;
    }
    writeln!(report)?;
    report.flush()?;

    if let Some(path) = &arg.output {
        let model =
            PopulationModel::from_population(MODEL_NAME, config.generations, &population);
        Output::open(path.clone())?.write_json(&model)?;

        eprintln!();
        eprintln!("Model saved successfully");
        eprintln!("  Path: {}", path.display());
        eprintln!("  Name: {}", model.name);
        eprintln!("  Trained at: {}", model.trained_at);
        eprintln!("  Agents: {}", model.agents.len());
    }

    Ok(())
}
