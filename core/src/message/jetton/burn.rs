use num_bigint::BigUint;

use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::message::JETTON_BURN;
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Creates a body for jetton burn according to TL-B schema:
///
/// ```raw
/// burn#595f07bc query_id:uint64 amount:(VarUInteger 16)
///               response_destination:MsgAddress custom_payload:(Maybe ^Cell)
///               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonBurnMessage {
    /// arbitrary request number.
    pub query_id: u64,
    /// amount of burned jettons
    pub amount: BigUint,
    /// address where to send a response with confirmation of a successful burn and the rest of the incoming message coins.
    pub response_destination: Option<TonAddress>,
    /// optional custom data
    pub custom_payload: Option<ArcCell>,
}

impl JettonBurnMessage {
    pub fn new(amount: &BigUint) -> Self {
        JettonBurnMessage {
            query_id: 0,
            amount: amount.clone(),
            response_destination: None,
            custom_payload: None,
        }
    }

    pub fn with_query_id(&mut self, query_id: u64) -> &mut Self {
        self.query_id = query_id;
        self
    }

    pub fn with_response_destination(&mut self, response_destination: &TonAddress) -> &mut Self {
        self.response_destination = Some(response_destination.clone());
        self
    }

    pub fn with_custom_payload(&mut self, custom_payload: &ArcCell) -> &mut Self {
        self.custom_payload = Some(custom_payload.clone());
        self
    }
}

impl TLB for JettonBurnMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_BURN);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let amount = parser.load_coins()?;
        let response_destination = parser.load_address_opt()?;
        let custom_payload = parser.load_maybe_cell_ref()?;
        parser.ensure_empty()?;

        Ok(JettonBurnMessage {
            query_id,
            amount,
            response_destination,
            custom_payload,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_coins(&self.amount)?;
        dst.store_address_opt(self.response_destination.as_ref())?;
        dst.store_maybe_cell_ref(&self.custom_payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;

    use super::JettonBurnMessage;
    use crate::cell::{CellBuilder, TonCellError};
    use crate::tlb_types::tlb::TLB;
    use crate::TonAddress;

    #[test]
    fn test_jetton_burn_layout() -> anyhow::Result<()> {
        let response = TonAddress::from_str("EQAd8QRKoA5sKcug9bwK6vMdmhSAoAxr8vvABvC1TCeTude5")?;
        let custom = CellBuilder::new().store_u8(8, 0xaa)?.build()?.to_arc();
        let mut msg = JettonBurnMessage::new(&BigUint::from(300u32));
        msg.with_query_id(77)
            .with_response_destination(&response)
            .with_custom_payload(&custom);

        let cell = msg.to_cell()?;
        assert_eq!(cell.bit_len(), 32 + 64 + (4 + 16) + 267 + 1);
        assert_eq!(cell.references().len(), 1);

        let mut parser = cell.parser();
        assert_eq!(parser.load_u32(32)?, 0x595f07bc);
        assert_eq!(parser.load_u64(64)?, 77);

        assert_eq!(JettonBurnMessage::from_cell(&cell)?, msg);
        Ok(())
    }

    #[test]
    fn test_jetton_burn_truncated() -> anyhow::Result<()> {
        let cell = CellBuilder::new()
            .store_u32(32, 0x595f07bc)?
            .store_u64(64, 1)?
            .build()?;
        assert!(matches!(
            JettonBurnMessage::from_cell(&cell),
            Err(TonCellError::TruncatedPayload(_))
        ));
        Ok(())
    }
}
