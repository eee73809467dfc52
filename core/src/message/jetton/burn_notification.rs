use num_bigint::BigUint;

use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::message::JETTON_BURN_NOTIFICATION;
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Sent by a jetton wallet to its minter after a burn:
///
/// ```raw
/// burn_notification#7bdd97de query_id:uint64 amount:(VarUInteger 16)
///               sender:MsgAddress response_destination:MsgAddress
///               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonBurnNotificationMessage {
    pub query_id: u64,
    pub amount: BigUint,
    pub sender: TonAddress,
    pub response_destination: Option<TonAddress>,
}

impl TLB for JettonBurnNotificationMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_BURN_NOTIFICATION);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let amount = parser.load_coins()?;
        let sender = parser.load_address()?;
        let response_destination = parser.load_address_opt()?;
        parser.ensure_empty()?;

        Ok(JettonBurnNotificationMessage {
            query_id,
            amount,
            sender,
            response_destination,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_coins(&self.amount)?;
        dst.store_address(&self.sender)?;
        dst.store_address_opt(self.response_destination.as_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;

    use super::JettonBurnNotificationMessage;
    use crate::tlb_types::tlb::TLB;
    use crate::TonAddress;

    #[test]
    fn test_burn_notification() -> anyhow::Result<()> {
        let sender = TonAddress::from_str("EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt")?;
        let msg = JettonBurnNotificationMessage {
            query_id: 3,
            amount: BigUint::from(1u8),
            sender,
            response_destination: None,
        };
        let cell = msg.to_cell()?;
        assert_eq!(cell.bit_len(), 32 + 64 + 12 + 267 + 2);
        assert_eq!(JettonBurnNotificationMessage::from_cell(&cell)?, msg);
        Ok(())
    }
}
