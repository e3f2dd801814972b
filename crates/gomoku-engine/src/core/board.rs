use std::fmt;

use crate::{IllegalMoveError, IllegalMoveKind};

/// Edge length of the square board.
pub const BOARD_SIZE: usize = 19;
/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
/// Number of consecutive marks needed to win.
pub const WIN_LENGTH: usize = 5;

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const SIZE: i32 = BOARD_SIZE as i32;
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const RUN: i32 = WIN_LENGTH as i32;

// Each direction covers both senses through the placed stone.
const LINE_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A mark placed by one of the two sides.
///
/// The marks are symmetric: nothing about a player is baked into them, the
/// match runner simply hands `X` to whoever moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the mark of the other side.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// State of a single in-bounds cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Mark),
}

/// A board coordinate.
///
/// Signed so that neighborhood queries may step outside the grid; such
/// positions read back as `None` from [`Board::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub const fn is_on_board(self) -> bool {
        0 <= self.x && self.x < SIZE && 0 <= self.y && self.y < SIZE
    }

    #[expect(clippy::cast_sign_loss)]
    fn index(self) -> Option<usize> {
        self.is_on_board()
            .then(|| self.y as usize * BOARD_SIZE + self.x as usize)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 19×19 five-in-a-row board.
///
/// Cells only go from [`Cell::Empty`] to occupied through [`Board::place`];
/// the only way back is a full [`Board::reset`].
///
/// # Example
///
/// ```
/// use gomoku_engine::{Board, Mark, Pos};
///
/// let mut board = Board::new();
/// for x in 2..6 {
///     assert!(!board.place(Mark::X, Pos::new(x, 2)).unwrap());
/// }
/// assert!(board.place(Mark::X, Pos::new(6, 2)).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    stone_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;

    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            stone_count: 0,
        }
    }

    /// Places `mark` at `pos` and reports whether it completes a winning line.
    ///
    /// Fails if `pos` is outside the board or already occupied; the board is
    /// left untouched in that case.
    pub fn place(&mut self, mark: Mark, pos: Pos) -> Result<bool, IllegalMoveError> {
        let Some(index) = pos.index() else {
            return Err(IllegalMoveError {
                pos,
                kind: IllegalMoveKind::OutOfBounds,
            });
        };
        if !self.cells[index].is_empty() {
            return Err(IllegalMoveError {
                pos,
                kind: IllegalMoveKind::Occupied,
            });
        }
        self.cells[index] = Cell::Occupied(mark);
        self.stone_count += 1;
        Ok(self.completes_line(pos, mark))
    }

    /// Returns the cell at `pos`, or `None` outside the board.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        pos.index().map(|index| self.cells[index])
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
        self.stone_count = 0;
    }

    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.stone_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stone_count == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.stone_count == CELL_COUNT
    }

    /// Returns the position of the `index`-th cell in row-major order.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn position_of(index: usize) -> Option<Pos> {
        (index < CELL_COUNT).then(|| {
            Pos::new((index % BOARD_SIZE) as i32, (index / BOARD_SIZE) as i32)
        })
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_SIZE)
    }

    /// Iterates over every position in the fixed scan order: columns left to
    /// right, each column top to bottom.
    ///
    /// Move selection breaks score ties by this order, so changing it changes
    /// which move an agent picks.
    pub fn scan_positions() -> impl Iterator<Item = Pos> {
        (0..SIZE).flat_map(|x| (0..SIZE).map(move |y| Pos::new(x, y)))
    }

    /// Iterates over empty positions in [scan order](Self::scan_positions).
    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        Self::scan_positions().filter(|&pos| self.get(pos) == Some(Cell::Empty))
    }

    // Scans the 9-cell window centered on `pos` along each line direction.
    // Off-board positions are skipped without breaking the run.
    fn completes_line(&self, pos: Pos, mark: Mark) -> bool {
        let target = Cell::Occupied(mark);
        LINE_DIRECTIONS.iter().any(|&(dx, dy)| {
            let mut in_row = 0;
            for k in -(RUN - 1)..RUN {
                match self.get(pos.offset(dx * k, dy * k)) {
                    None => {}
                    Some(cell) if cell == target => {
                        in_row += 1;
                        if in_row == RUN {
                            return true;
                        }
                    }
                    Some(_) => in_row = 0,
                }
            }
            false
        })
    }
}
