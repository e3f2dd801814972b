use std::fmt::{self, Write as _};

use super::board::{BOARD_SIZE, Board, Cell, Mark};

impl Cell {
    /// Glyph used when rendering the board.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Mark::X) => 'x',
            Cell::Occupied(Mark::O) => 'o',
        }
    }
}

/// Renders the board as a grid with zero-padded column headers and row labels.
///
/// ```text
///
///      00 01 02 ...
///    --------- ...
/// 00 | .  x  .  ...
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n     ")?;
        for x in 0..BOARD_SIZE {
            write!(f, "{x:02} ")?;
        }
        f.write_str("\n   --")?;
        for _ in 0..BOARD_SIZE {
            f.write_str("---")?;
        }
        f.write_char('\n')?;
        for (y, row) in self.rows().enumerate() {
            write!(f, "{y:02} | ")?;
            for cell in row {
                write!(f, "{}  ", cell.glyph())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
