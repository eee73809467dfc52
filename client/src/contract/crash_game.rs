pub use crash_game_contract::*;
pub use game_record_contract::*;
pub use game_wallet_contract::*;

mod crash_game_contract;
mod game_record_contract;
mod game_wallet_contract;
