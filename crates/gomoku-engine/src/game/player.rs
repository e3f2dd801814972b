use crate::{Board, IllegalMoveError, IllegalMoveKind, Mark, Pos};

/// Something that chooses moves on a [`Board`].
///
/// Players only read the board; the match runner performs the placement.
pub trait Player {
    /// Picks an empty cell for `mark`, or `None` if the board has no empty cell.
    fn select_move(&mut self, board: &Board, mark: Mark) -> Option<Pos>;

    /// Selects a move and places it, returning whether it won.
    ///
    /// Fails fast with [`IllegalMoveKind::NoEmptyCell`] instead of silently
    /// passing when asked to move on a full board.
    fn make_move(&mut self, board: &mut Board, mark: Mark) -> Result<bool, IllegalMoveError> {
        let pos = self.select_move(board, mark).ok_or(IllegalMoveError {
            pos: Pos::default(),
            kind: IllegalMoveKind::NoEmptyCell,
        })?;
        board.place(mark, pos)
    }
}

impl<P> Player for &mut P
where
    P: Player + ?Sized,
{
    fn select_move(&mut self, board: &Board, mark: Mark) -> Option<Pos> {
        (**self).select_move(board, mark)
    }
}
