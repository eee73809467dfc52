// Crash game contract opcodes, declared with tlb magics in the deploy tooling

pub const CRASH_GAME_NEW_ROUND: u32 = 0x6cd87433;
pub const CRASH_GAME_CRASH: u32 = 0x71bb125e;
pub const CRASH_GAME_SET_TEST_DICT: u32 = 0x20a4c01e;
pub const GAME_WALLET_SETTLEMENT: u32 = 0xbbc88046;
/// Dedicated bet opcode of newer revisions; older ones reuse [`super::JETTON_TRANSFER`].
pub const CRASH_GAME_BET: u32 = 0x9b0663d8;

mod bet;
mod crash;
mod new_round;
mod set_test_dict;
mod settlement;

pub use bet::*;
pub use crash::*;
pub use new_round::*;
pub use set_test_dict::*;
pub use settlement::*;

use crate::message::TonMessageError;

/// Slot of `round_num` in the round dictionary: `(round_num - 1) % max_rounds_parallel`.
///
/// Round numbers start at 1.
pub fn round_index_for(round_num: u64, max_rounds_parallel: u64) -> Result<u64, TonMessageError> {
    if round_num == 0 {
        return Err(TonMessageError::InvalidArgument(
            "round number starts at 1".to_string(),
        ));
    }
    if max_rounds_parallel == 0 {
        return Err(TonMessageError::InvalidArgument(
            "max_rounds_parallel must be positive".to_string(),
        ));
    }
    Ok((round_num - 1) % max_rounds_parallel)
}
