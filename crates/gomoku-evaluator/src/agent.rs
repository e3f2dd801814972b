//! Agent parameter set and its flat text representation.
//!
//! An [`Agent`] is 82 scalars: one output bias plus, for each of the three
//! [`Channel`]s, a channel bias, an output weight and a 5×5 weight field.
//!
//! # Flat order
//!
//! Seeds, dumps and model files all use the same order:
//!
//! ```text
//! ar, then for channel in [Empty, Own, Opponent]:
//!     a[channel], wr[channel], w[channel][dy][dx] for dy in 0..5, dx in 0..5
//! ```
//!
//! [`Agent::map_params`] visits the parameters in exactly this order; every
//! other conversion is built on top of it.

use std::{fmt, num::ParseFloatError, str::FromStr};

use gomoku_engine::{Cell, Mark};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Edge length of a channel's receptive field.
pub const FIELD_SIZE: usize = 5;
/// Number of channels.
pub const CHANNEL_COUNT: usize = 3;
/// Total number of scalar parameters in an [`Agent`].
pub const PARAM_COUNT: usize = 1 + CHANNEL_COUNT * (2 + FIELD_SIZE * FIELD_SIZE);

const INIT_BIAS_RANGE: f32 = 1.0;
const INIT_WEIGHT_RANGE: f32 = 0.05;

/// How a board cell is interpreted relative to the agent choosing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Empty,
    Own,
    Opponent,
}

impl Channel {
    pub const ALL: [Self; CHANNEL_COUNT] = [Channel::Empty, Channel::Own, Channel::Opponent];

    /// The cell state this channel matches when `mark` is to move.
    #[must_use]
    pub fn target_cell(self, mark: Mark) -> Cell {
        match self {
            Channel::Empty => Cell::Empty,
            Channel::Own => Cell::Occupied(mark),
            Channel::Opponent => Cell::Occupied(mark.opponent()),
        }
    }
}

/// Whether a parameter acts as a bias or as a multiplicative weight.
///
/// Mutation scales the two kinds independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ParamKind {
    Bias,
    Weight,
}

/// Parameters of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelParams {
    /// `a[c]`: added to the channel sum before the rectifier.
    pub bias: f32,
    /// `wr[c]`: scales the rectified channel sum into the move score.
    pub output_weight: f32,
    /// `w[c][dy][dx]`: weight of a match at offset `(dx - 2, dy - 2)`.
    pub weights: [[f32; FIELD_SIZE]; FIELD_SIZE],
}

/// A move-scoring agent.
///
/// Agents are plain values; nothing mutates them while they are being
/// evaluated, so tournaments share them across threads by reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<f32>", try_from = "Vec<f32>")]
pub struct Agent {
    /// `ar`: the move score before any channel contributes.
    pub bias: f32,
    pub channels: [ChannelParams; CHANNEL_COUNT],
}

/// Error returned when an agent cannot be built from its flat representation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseAgentError {
    #[display("expected {} parameters, found only {found}", PARAM_COUNT)]
    MissingValue { found: usize },
    #[display("parameter #{index} is not a number: {token:?}")]
    InvalidNumber {
        index: usize,
        token: String,
        source: ParseFloatError,
    },
    #[display("unexpected value after {} parameters", PARAM_COUNT)]
    TrailingValue,
}

impl Agent {
    /// Creates an agent with random parameters.
    ///
    /// Biases are uniform in `[-1, 1]`, weights uniform in `[-0.05, 0.05]`.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::default().map_params(|kind, _| {
            let range = match kind {
                ParamKind::Bias => INIT_BIAS_RANGE,
                ParamKind::Weight => INIT_WEIGHT_RANGE,
            };
            rng.random_range(-range..=range)
        })
    }

    /// Returns the channel parameters for `channel`.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> &ChannelParams {
        &self.channels[channel as usize]
    }

    /// Builds a new agent by applying `f` to every parameter in flat order.
    #[must_use]
    pub fn map_params<F>(&self, mut f: F) -> Self
    where
        F: FnMut(ParamKind, f32) -> f32,
    {
        Self {
            bias: f(ParamKind::Bias, self.bias),
            channels: self.channels.each_ref().map(|params| ChannelParams {
                bias: f(ParamKind::Bias, params.bias),
                output_weight: f(ParamKind::Weight, params.output_weight),
                weights: params
                    .weights
                    .map(|row| row.map(|w| f(ParamKind::Weight, w))),
            }),
        }
    }

    /// Returns the parameters in flat order.
    #[must_use]
    pub fn values(&self) -> Vec<f32> {
        let mut values = Vec::with_capacity(PARAM_COUNT);
        let _ = self.map_params(|_, value| {
            values.push(value);
            value
        });
        values
    }

    /// Builds an agent from exactly [`PARAM_COUNT`] values in flat order.
    pub fn from_values(values: &[f32]) -> Result<Self, ParseAgentError> {
        let values: &[f32; PARAM_COUNT] = match values.try_into() {
            Ok(values) => values,
            Err(_) if values.len() < PARAM_COUNT => {
                return Err(ParseAgentError::MissingValue {
                    found: values.len(),
                });
            }
            Err(_) => return Err(ParseAgentError::TrailingValue),
        };
        let mut values = values.iter().copied();
        Ok(Self::default().map_params(|_, _| values.next().unwrap_or_default()))
    }

    /// Reads one agent from a whitespace-token stream, consuming exactly
    /// [`PARAM_COUNT`] tokens.
    ///
    /// ```
    /// use gomoku_evaluator::agent::{Agent, PARAM_COUNT};
    ///
    /// let text = vec!["0.5"; PARAM_COUNT * 2].join(" ");
    /// let mut tokens = text.split_whitespace();
    /// let first = Agent::read_from(&mut tokens).unwrap();
    /// let second = Agent::read_from(&mut tokens).unwrap();
    /// assert_eq!(first, second);
    /// assert!(Agent::read_from(&mut tokens).is_err());
    /// ```
    pub fn read_from<'a, I>(tokens: &mut I) -> Result<Self, ParseAgentError>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut values = Vec::with_capacity(PARAM_COUNT);
        for index in 0..PARAM_COUNT {
            let token = tokens
                .next()
                .ok_or(ParseAgentError::MissingValue { found: index })?;
            let value = token
                .parse()
                .map_err(|source| ParseAgentError::InvalidNumber {
                    index,
                    token: token.to_owned(),
                    source,
                })?;
            values.push(value);
        }
        Self::from_values(&values)
    }
}

impl FromStr for Agent {
    type Err = ParseAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let agent = Self::read_from(&mut tokens)?;
        if tokens.next().is_some() {
            return Err(ParseAgentError::TrailingValue);
        }
        Ok(agent)
    }
}

/// Dumps the parameters space-separated in flat order.
impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl From<Agent> for Vec<f32> {
    fn from(agent: Agent) -> Self {
        agent.values()
    }
}

impl TryFrom<Vec<f32>> for Agent {
    type Error = ParseAgentError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::from_values(&values)
    }
}
