pub use self::board::*;

pub(crate) mod board;
pub(crate) mod render_board;
