pub use self::{game_match::*, player::*};

pub(crate) mod game_match;
pub(crate) mod player;
