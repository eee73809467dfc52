use num_bigint::BigUint;

use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::message::{round_index_for, TonMessageError, GAME_WALLET_SETTLEMENT};
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Settles a player's game wallet for one round:
///
/// ```raw
/// settlement#bbc88046 query_id:uint64 round_num:uint32 round_index:uint32
///                     forward_gas_fee:(VarUInteger 16) settle_address:MsgAddress
///                     = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SettlementMessage {
    pub query_id: u64,
    pub round_num: u32,
    pub round_index: u32,
    pub forward_gas_fee: BigUint,
    pub settle_address: TonAddress,
}

impl SettlementMessage {
    /// Computes `round_index` from the game's `max_rounds_parallel`.
    pub fn new(
        query_id: u64,
        round_num: u32,
        max_rounds_parallel: u32,
        forward_gas_fee: &BigUint,
        settle_address: &TonAddress,
    ) -> Result<Self, TonMessageError> {
        let round_index = round_index_for(round_num as u64, max_rounds_parallel as u64)?;
        Ok(SettlementMessage {
            query_id,
            round_num,
            // the index is below max_rounds_parallel, a u32
            round_index: round_index as u32,
            forward_gas_fee: forward_gas_fee.clone(),
            settle_address: settle_address.clone(),
        })
    }
}

impl TLB for SettlementMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(GAME_WALLET_SETTLEMENT);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let round_num = parser.load_u32(32)?;
        let round_index = parser.load_u32(32)?;
        let forward_gas_fee = parser.load_coins()?;
        let settle_address = parser.load_address()?;
        parser.ensure_empty()?;
        Ok(SettlementMessage {
            query_id,
            round_num,
            round_index,
            forward_gas_fee,
            settle_address,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_u32(32, self.round_num)?;
        dst.store_u32(32, self.round_index)?;
        dst.store_coins(&self.forward_gas_fee)?;
        dst.store_address(&self.settle_address)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use tokio_test::assert_err;

    use super::SettlementMessage;
    use crate::tlb_types::tlb::TLB;
    use crate::TonAddress;

    #[test]
    fn test_settlement_round_trip() -> anyhow::Result<()> {
        let settle = TonAddress::from_str("EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt")?;
        let msg = SettlementMessage::new(5, 7, 3, &BigUint::from(10_000_000u32), &settle)?;
        assert_eq!(msg.round_index, 0);

        let cell = msg.to_cell()?;
        assert_eq!(cell.bit_len(), 32 + 64 + 32 + 32 + (4 + 24) + 267);
        let mut parser = cell.parser();
        assert_eq!(parser.load_u32(32)?, 0xbbc88046);
        assert_eq!(SettlementMessage::from_cell(&cell)?, msg);
        Ok(())
    }

    #[test]
    fn test_settlement_rejects_round_zero() -> anyhow::Result<()> {
        let settle = TonAddress::from_str("EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt")?;
        assert_err!(SettlementMessage::new(5, 0, 3, &BigUint::from(1u8), &settle));
        Ok(())
    }
}
