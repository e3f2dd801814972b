use gomoku_engine::{Board, CELL_COUNT, Cell, Mark, Player, Pos};
use rand::Rng;

const RANDOM_PROBES: usize = 10;

/// Baseline player that picks a random empty cell.
///
/// Probes a few random cells first and falls back to the first empty cell in
/// scan order, so it always finds a move on a non-full board.
#[derive(Debug, Clone)]
pub struct RandomPlayer<R> {
    rng: R,
}

impl<R> RandomPlayer<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R> Player for RandomPlayer<R>
where
    R: Rng,
{
    fn select_move(&mut self, board: &Board, _mark: Mark) -> Option<Pos> {
        for _ in 0..RANDOM_PROBES {
            let pos = Board::position_of(self.rng.random_range(0..CELL_COUNT))?;
            if board.get(pos) == Some(Cell::Empty) {
                return Some(pos);
            }
        }
        board.empty_positions().next()
    }
}
