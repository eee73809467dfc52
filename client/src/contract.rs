pub use crash_game::*;
pub use deploy::*;
pub use error::*;
pub use factory::*;
pub use interface::*;
pub use jetton::*;

mod crash_game;
mod deploy;
mod error;
mod factory;
mod interface;
mod jetton;
