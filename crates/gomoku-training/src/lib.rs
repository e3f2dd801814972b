//! Evolutionary training of move-scoring agents.
//!
//! Agents are not trained by gradient descent. A population of agents plays a
//! round-robin tournament every generation; the better half survives and the
//! worse half is replaced by mutated copies of the survivors.
//!
//! ```text
//! Population (N agents, default 50)
//!     ↓ all ordered pairs, concurrently per first mover
//! Match Runner (gomoku-engine)
//!     ↓ +3 win / -5 loss / 0 draw
//! Fitness → stable ranking
//!     ↓ top half reproduces into bottom half
//! Mutation (probability-gated, or jitter)
//! ```
//!
//! - [`genetic`] - Population, tournament, ranking and regeneration.
//! - [`mutation`] - Mutation operators.
//! - [`config`] - Training defaults and the run configuration.
//!
//! The process is heuristic: nothing guarantees convergence, and the
//! population lives only in memory for the duration of a run.

pub mod config;
pub mod genetic;
pub mod mutation;
