//! Move-scoring agents for five-in-a-row.
//!
//! - [`agent`] - The 82-parameter [`Agent`](agent::Agent), random initialization and the
//!   flat seed / dump format.
//! - [`policy`] - Template-matching move selection; implements
//!   [`Player`](gomoku_engine::Player) for agents.
//! - [`random_player`] - A uniform-random baseline opponent.
//!
//! # Scoring model
//!
//! ```text
//! candidate cell
//!     ↓ 5×5 neighborhood, matched per channel (Empty / Own / Opponent)
//! channel sum + bias → rectifier
//!     ↓ weighted by wr[c]
//! move score (+ ar)
//!     ↓ argmax over empty cells, first-found wins ties
//! selected move
//! ```
//!
//! This is a fixed two-layer scorer with three hidden units; the weights are
//! learned by the evolutionary trainer in `gomoku-training`.

pub mod agent;
pub mod policy;
pub mod random_player;
