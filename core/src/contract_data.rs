//! Storage layouts of the deployed contracts, as written at deployment and read back from
//! get-method results.

mod crash_game;
mod game_round;
mod jetton_minter;

pub use crash_game::*;
pub use game_round::*;
pub use jetton_minter::*;
