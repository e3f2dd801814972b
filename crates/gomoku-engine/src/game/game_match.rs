use crate::{Board, CELL_COUNT, IllegalMoveError, Mark, Player};

/// Fitness awarded to the winner of a match.
pub const WIN_REWARD: i32 = 3;
/// Fitness awarded to the loser of a match.
///
/// Losing costs more than winning earns; the scheme is intentionally not zero-sum.
pub const LOSS_PENALTY: i32 = -5;

/// Result of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MatchOutcome {
    /// The player moving first (playing [`Mark::X`]) completed a line.
    FirstWins,
    /// The player moving second (playing [`Mark::O`]) completed a line.
    SecondWins,
    /// The board filled up without a winner.
    Draw,
}

impl MatchOutcome {
    #[must_use]
    pub fn winner(self) -> Option<Mark> {
        match self {
            MatchOutcome::FirstWins => Some(Mark::X),
            MatchOutcome::SecondWins => Some(Mark::O),
            MatchOutcome::Draw => None,
        }
    }

    /// Fitness changes for `(first, second)`.
    #[must_use]
    pub fn fitness_deltas(self) -> (i32, i32) {
        match self {
            MatchOutcome::FirstWins => (WIN_REWARD, LOSS_PENALTY),
            MatchOutcome::SecondWins => (LOSS_PENALTY, WIN_REWARD),
            MatchOutcome::Draw => (0, 0),
        }
    }
}

/// Plays one match on `board`, `first` moving with [`Mark::X`] and `second` with [`Mark::O`].
///
/// The board is expected to be empty and is left in its final state so the
/// caller can render or reset it. The loop is bounded by the number of cells.
pub fn play_match<A, B>(
    board: &mut Board,
    mut first: A,
    mut second: B,
) -> Result<MatchOutcome, IllegalMoveError>
where
    A: Player,
    B: Player,
{
    let mut moves = 0;
    while moves < CELL_COUNT {
        if first.make_move(board, Mark::X)? {
            return Ok(MatchOutcome::FirstWins);
        }
        moves += 1;
        if board.is_full() {
            break;
        }

        if second.make_move(board, Mark::O)? {
            return Ok(MatchOutcome::SecondWins);
        }
        moves += 1;
        if board.is_full() {
            break;
        }
    }
    Ok(MatchOutcome::Draw)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{BOARD_SIZE, Cell, IllegalMoveKind, Pos};

    /// Plays a fixed sequence of moves.
    struct ScriptedPlayer {
        moves: VecDeque<Pos>,
    }

    impl ScriptedPlayer {
        fn new(moves: impl IntoIterator<Item = Pos>) -> Self {
            Self {
                moves: moves.into_iter().collect(),
            }
        }
    }

    impl Player for ScriptedPlayer {
        fn select_move(&mut self, _board: &Board, _mark: Mark) -> Option<Pos> {
            self.moves.pop_front()
        }
    }

    // Runs of at most two in every direction: XXOO along rows, alternating
    // down columns and diagonals.
    fn draw_pattern_owner(pos: Pos) -> Mark {
        if (pos.x + 2 * pos.y) % 4 < 2 {
            Mark::X
        } else {
            Mark::O
        }
    }

    #[test]
    fn test_first_player_wins() {
        let mut board = Board::new();
        let first = ScriptedPlayer::new((0..5).map(|x| Pos::new(x, 0)));
        let second = ScriptedPlayer::new((0..4).map(|x| Pos::new(x, 5)));

        let outcome = play_match(&mut board, first, second).unwrap();
        assert_eq!(outcome, MatchOutcome::FirstWins);
        assert_eq!(outcome.winner(), Some(Mark::X));
        assert_eq!(outcome.fitness_deltas(), (3, -5));
        assert_eq!(board.stone_count(), 9);
    }

    #[test]
    fn test_second_player_wins() {
        let mut board = Board::new();
        let first = ScriptedPlayer::new([0, 2, 4, 6, 8, 10].map(|x| Pos::new(x, 0)));
        let second = ScriptedPlayer::new((0..5).map(|y| Pos::new(10, 3 + y)));

        let outcome = play_match(&mut board, first, second).unwrap();
        assert!(outcome.is_second_wins());
        assert_eq!(outcome.fitness_deltas(), (-5, 3));
        assert_eq!(board.get(Pos::new(10, 7)), Some(Cell::Occupied(Mark::O)));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let positions: Vec<_> = Board::scan_positions().collect();
        let of = |mark: Mark| {
            positions
                .iter()
                .copied()
                .filter(move |&p| draw_pattern_owner(p) == mark)
                .collect::<Vec<_>>()
        };
        let (xs, os) = (of(Mark::X), of(Mark::O));
        assert_eq!(xs.len(), os.len() + 1);

        let mut board = Board::new();
        let outcome = play_match(
            &mut board,
            ScriptedPlayer::new(xs),
            ScriptedPlayer::new(os),
        )
        .unwrap();
        assert!(outcome.is_draw());
        assert_eq!(outcome.fitness_deltas(), (0, 0));
        assert!(board.is_full());
        assert_eq!(board.stone_count(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn test_player_without_move_is_illegal() {
        let mut board = Board::new();
        let first = ScriptedPlayer::new([Pos::new(0, 0)]);
        let second = ScriptedPlayer {
            moves: VecDeque::new(),
        };

        let err = play_match(&mut board, first, second).unwrap_err();
        assert_eq!(err.kind, IllegalMoveKind::NoEmptyCell);
    }

    #[test]
    fn test_occupied_move_propagates() {
        let mut board = Board::new();
        let first = ScriptedPlayer::new([Pos::new(4, 4)]);
        let mut second = ScriptedPlayer::new([Pos::new(4, 4)]);

        let err = play_match(&mut board, first, &mut second).unwrap_err();
        assert_eq!(err.kind, IllegalMoveKind::Occupied);
        assert_eq!(err.pos, Pos::new(4, 4));
    }
}
