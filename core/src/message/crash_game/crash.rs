use num_bigint::BigUint;

use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::message::CRASH_GAME_CRASH;
use crate::tlb_types::tlb::{TLBPrefix, TLB};

/// Ends a round:
///
/// ```raw
/// crash#71bb125e query_id:uint64 round_num:uint32 forward_gas_fee:(VarUInteger 16)
///               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CrashMessage {
    pub query_id: u64,
    pub round_num: u32,
    /// nanotons forwarded to the game records and wallets of the round.
    pub forward_gas_fee: BigUint,
}

impl CrashMessage {
    pub fn new(query_id: u64, round_num: u32, forward_gas_fee: &BigUint) -> Self {
        CrashMessage {
            query_id,
            round_num,
            forward_gas_fee: forward_gas_fee.clone(),
        }
    }
}

impl TLB for CrashMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(CRASH_GAME_CRASH);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let round_num = parser.load_u32(32)?;
        let forward_gas_fee = parser.load_coins()?;
        parser.ensure_empty()?;
        Ok(CrashMessage {
            query_id,
            round_num,
            forward_gas_fee,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_u32(32, self.round_num)?;
        dst.store_coins(&self.forward_gas_fee)?;
        Ok(())
    }
}
