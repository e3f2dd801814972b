//! Move selection: score every empty cell and play the best one.
//!
//! Each candidate cell is scored by a fixed two-layer template matcher:
//!
//! ```text
//! channel_sum[c] = max(0, a[c] + Σ w[c][dy][dx] · [cell(x+dx-2, y+dy-2) == target(c)])
//! score          = ar + Σ wr[c] · channel_sum[c]
//! ```
//!
//! Off-board neighbors never match. Cells are visited in
//! [`Board::scan_positions`] order and only a strictly greater score replaces
//! the current best, so ties go to the earliest cell in that order.

use std::iter;

use gomoku_engine::{Board, Mark, Player, Pos};

use crate::agent::{Agent, Channel, FIELD_SIZE};

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const RADIUS: i32 = (FIELD_SIZE / 2) as i32;

const OFFSETS: [i32; FIELD_SIZE] = {
    let mut offsets = [0; FIELD_SIZE];
    let mut i = 0;
    while i < FIELD_SIZE {
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let offset = i as i32 - RADIUS;
        offsets[i] = offset;
        i += 1;
    }
    offsets
};

impl Agent {
    /// Scores placing `mark` at `pos`.
    ///
    /// `pos` is expected to be empty; the score of an occupied cell is still
    /// computed but never used by [`Agent::select_move`].
    #[must_use]
    pub fn score_move(&self, board: &Board, mark: Mark, pos: Pos) -> f32 {
        let mut score = self.bias;
        for (channel, params) in iter::zip(Channel::ALL, &self.channels) {
            let target = channel.target_cell(mark);
            let mut sum = 0.0_f32;
            for (dy, row) in iter::zip(OFFSETS, &params.weights) {
                for (dx, weight) in iter::zip(OFFSETS, row) {
                    if board.get(pos.offset(dx, dy)) == Some(target) {
                        sum += *weight;
                    }
                }
            }
            sum += params.bias;
            score += params.output_weight * f32::max(sum, 0.0);
        }
        score
    }

    /// Picks the best empty cell for `mark`, or `None` if the board is full.
    ///
    /// Deterministic: the same board and parameters always give the same move.
    #[must_use]
    pub fn select_move(&self, board: &Board, mark: Mark) -> Option<Pos> {
        let mut best: Option<(Pos, f32)> = None;
        for pos in board.empty_positions() {
            let score = self.score_move(board, mark, pos);
            match best {
                Some((_, best_score)) if score <= best_score || score.is_nan() => {}
                _ => best = Some((pos, score)),
            }
        }
        best.map(|(pos, _)| pos)
    }
}

impl Player for Agent {
    fn select_move(&mut self, board: &Board, mark: Mark) -> Option<Pos> {
        Agent::select_move(self, board, mark)
    }
}

impl Player for &Agent {
    fn select_move(&mut self, board: &Board, mark: Mark) -> Option<Pos> {
        Agent::select_move(self, board, mark)
    }
}

#[cfg(test)]
mod tests {
    use gomoku_engine::{Cell, IllegalMoveKind, MatchOutcome, play_match};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    /// Agent whose score counts own marks at horizontal distance 1 or 2.
    fn row_builder() -> Agent {
        let mut agent = Agent::default();
        let own = &mut agent.channels[Channel::Own as usize];
        own.output_weight = 1.0;
        own.weights[2] = [1.0, 1.0, 0.0, 1.0, 1.0];
        agent
    }

    #[test]
    fn test_zero_agent_plays_first_scanned_cell() {
        let agent = Agent::default();
        let mut board = Board::new();
        assert_eq!(agent.select_move(&board, Mark::X), Some(Pos::new(0, 0)));
        board.place(Mark::O, Pos::new(0, 0)).unwrap();
        assert_eq!(agent.select_move(&board, Mark::X), Some(Pos::new(0, 1)));
    }

    #[test]
    fn test_score_counts_channels() {
        let mut agent = Agent::default();
        agent.bias = 0.5;
        for params in &mut agent.channels {
            params.output_weight = 1.0;
            params.weights = [[1.0; FIELD_SIZE]; FIELD_SIZE];
        }
        let mut board = Board::new();
        board.place(Mark::X, Pos::new(1, 0)).unwrap();
        board.place(Mark::O, Pos::new(0, 1)).unwrap();
        board.place(Mark::O, Pos::new(2, 2)).unwrap();

        // The corner sees a 3x3 on-board window: 1 own, 2 opponent, 6 empty.
        let score = agent.score_move(&board, Mark::X, Pos::new(0, 0));
        assert!((score - (0.5 + 6.0 + 1.0 + 2.0)).abs() < 1e-6);
        // Relative channels flip with the mark to move.
        let score = agent.score_move(&board, Mark::O, Pos::new(0, 0));
        assert!((score - (0.5 + 6.0 + 2.0 + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_rectifier_clamps_negative_channel() {
        let mut agent = Agent::default();
        let empty = &mut agent.channels[Channel::Empty as usize];
        empty.bias = -100.0;
        empty.output_weight = 3.0;
        empty.weights = [[1.0; FIELD_SIZE]; FIELD_SIZE];
        let board = Board::new();
        assert_eq!(agent.score_move(&board, Mark::X, Pos::new(9, 9)), 0.0);
    }

    #[test]
    fn test_weight_orientation() {
        let mut agent = Agent::default();
        let opponent = &mut agent.channels[Channel::Opponent as usize];
        opponent.output_weight = 1.0;
        // w[dy = 0][dx = 4]: the cell two right and two up
        opponent.weights[0][4] = 1.0;
        let mut board = Board::new();
        board.place(Mark::O, Pos::new(7, 3)).unwrap();
        assert_eq!(agent.select_move(&board, Mark::X), Some(Pos::new(5, 5)));
    }

    #[test]
    fn test_ties_keep_earliest_cell() {
        let agent = row_builder();
        let mut board = Board::new();
        board.place(Mark::X, Pos::new(9, 9)).unwrap();
        // (7, 9), (8, 9), (10, 9) and (11, 9) all score 1; (7, 9) is scanned first
        assert_eq!(agent.select_move(&board, Mark::X), Some(Pos::new(7, 9)));
    }

    #[test]
    fn test_selection_is_pure() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let agent = Agent::random(&mut rng);
        let mut board = Board::new();
        for (i, pos) in Board::scan_positions().step_by(7).take(40).enumerate() {
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            board.place(mark, pos).unwrap();
        }
        let snapshot = board.clone();
        let first = agent.select_move(&board, Mark::O);
        for _ in 0..5 {
            assert_eq!(agent.select_move(&board, Mark::O), first);
        }
        assert_eq!(board, snapshot);
        assert_eq!(board.get(first.unwrap()), Some(Cell::Empty));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new();
        for pos in Board::scan_positions() {
            // alternating columns of pairs never line up five
            let mark = if (pos.x + 2 * pos.y) % 4 < 2 { Mark::X } else { Mark::O };
            board.place(mark, pos).unwrap();
        }
        let mut agent = Agent::default();
        assert_eq!(Agent::select_move(&agent, &board, Mark::X), None);
        let err = agent.make_move(&mut board, Mark::X).unwrap_err();
        assert_eq!(err.kind, IllegalMoveKind::NoEmptyCell);
    }

    #[test]
    fn test_row_builder_beats_first_cell_player() {
        let builder = row_builder();
        let filler = Agent::default();

        let mut board = Board::new();
        let outcome = play_match(&mut board, &builder, &filler).unwrap();
        assert_eq!(outcome, MatchOutcome::FirstWins);
        for x in 0..5 {
            assert_eq!(board.get(Pos::new(x, 0)), Some(Cell::Occupied(Mark::X)));
        }

        board.reset();
        let outcome = play_match(&mut board, &filler, &builder).unwrap();
        assert_eq!(outcome, MatchOutcome::SecondWins);
        for x in 0..5 {
            assert_eq!(board.get(Pos::new(x, 1)), Some(Cell::Occupied(Mark::O)));
        }
    }
}
