use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::message::CRASH_GAME_NEW_ROUND;
use crate::tlb_types::tlb::{TLBPrefix, TLB};

/// Opens the next round of the crash game:
///
/// ```raw
/// new_round#6cd87433 query_id:uint64 = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NewRoundMessage {
    pub query_id: u64,
}

impl NewRoundMessage {
    pub fn new(query_id: u64) -> Self {
        NewRoundMessage { query_id }
    }
}

impl TLB for NewRoundMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(CRASH_GAME_NEW_ROUND);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        parser.ensure_empty()?;
        Ok(NewRoundMessage { query_id })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        Ok(())
    }
}
