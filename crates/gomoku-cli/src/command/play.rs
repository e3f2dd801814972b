use std::{convert::Infallible, fmt, io::Write as _, path::PathBuf, str::FromStr};

use anyhow::Context as _;
use gomoku_engine::{Board, MatchOutcome, Player, play_match};
use gomoku_evaluator::{agent::Agent, random_player::RandomPlayer};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::util::{self, Output};

/// Where a player comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// The uniform-random baseline.
    Random,
    /// The first agent of a seed file, or the best agent of a model file.
    File(PathBuf),
}

impl FromStr for PlayerSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "random" => PlayerSource::Random,
            path => PlayerSource::File(path.into()),
        })
    }
}

impl fmt::Display for PlayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSource::Random => f.write_str("random"),
            PlayerSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl PlayerSource {
    fn load(&self, rng: &mut Pcg64Mcg) -> anyhow::Result<Box<dyn Player>> {
        let player: Box<dyn Player> = match self {
            PlayerSource::Random => Box::new(RandomPlayer::new(Pcg64Mcg::from_rng(rng))),
            PlayerSource::File(path) => {
                let agent: Agent = util::read_agents_file(path)?
                    .into_iter()
                    .next()
                    .with_context(|| format!("No agent found in {}", path.display()))?;
                Box::new(agent)
            }
        };
        Ok(player)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Player moving first with x: `random`, a seed file or a model file
    first: PlayerSource,
    /// Player moving second with o: `random`, a seed file or a model file
    second: PlayerSource,
    /// Seed for the random players
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        first,
        second,
        seed,
    } = arg;
    let mut rng = match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(*seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    };
    let mut first_player = first.load(&mut rng)?;
    let mut second_player = second.load(&mut rng)?;

    eprintln!("x: {first}");
    eprintln!("o: {second}");
    let mut board = Board::new();
    let outcome = play_match(&mut board, &mut *first_player, &mut *second_player)
        .context("Match aborted")?;

    let mut output = Output::stdout();
    write!(output, "{board}")?;
    let result = match outcome {
        MatchOutcome::FirstWins => "x wins",
        MatchOutcome::SecondWins => "o wins",
        MatchOutcome::Draw => "draw",
    };
    writeln!(output, "\n{result} after {} moves", board.stone_count())?;
    output.flush()?;
    Ok(())
}
