//! Five-in-a-row board, players and the match runner.
//!
//! - [`core`] holds the [`Board`] state machine and its rendering.
//! - [`game`] defines the [`Player`] seam and [`play_match`], which alternates
//!   two players on one board until a win or a full board.

pub use self::{core::*, game::*};

pub mod core;
pub mod game;

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMoveKind {
    #[display("outside the board")]
    OutOfBounds,
    #[display("cell already occupied")]
    Occupied,
    #[display("no empty cell left")]
    NoEmptyCell,
}

/// A placement targeted an out-of-bounds or occupied cell, or a player was
/// asked to move on a full board.
///
/// Both built-in players only ever choose empty in-bounds cells, so this error
/// signals a broken caller rather than a recoverable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot make this move {pos}: {kind}")]
pub struct IllegalMoveError {
    pub pos: Pos,
    pub kind: IllegalMoveKind,
}
