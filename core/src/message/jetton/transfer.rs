use num_bigint::BigUint;

use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::message::{EMPTY_ARC_CELL, JETTON_TRANSFER, ZERO_COINS};
use crate::tlb_types::primitives::either::{EitherRef, EitherRefLayout};
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Creates a body for jetton transfer according to TL-B schema:
///
/// ```raw
/// transfer#0f8a7ea5 query_id:uint64 amount:(VarUInteger 16) destination:MsgAddress
///                  response_destination:MsgAddress custom_payload:(Maybe ^Cell)
///                  forward_ton_amount:(VarUInteger 16) forward_payload:(Either Cell ^Cell)
///                  = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonTransferMessage {
    /// arbitrary request number.
    pub query_id: u64,
    /// amount of transferred jettons in elementary units.
    pub amount: BigUint,
    /// address of the new owner of the jettons.
    pub destination: TonAddress,
    /// address where to send a response with confirmation of a successful transfer and the rest of the incoming message Toncoins.
    pub response_destination: Option<TonAddress>,
    /// optional custom data (which is used by either sender or receiver jetton wallet for inner logic).
    pub custom_payload: Option<ArcCell>,
    /// the amount of nanotons to be sent to the destination address.
    pub forward_ton_amount: BigUint,
    /// optional custom data that should be sent to the destination address.
    pub forward_payload: EitherRef<ArcCell>,
}

impl JettonTransferMessage {
    pub fn new(destination: &TonAddress, amount: &BigUint) -> Self {
        JettonTransferMessage {
            query_id: 0,
            amount: amount.clone(),
            destination: destination.clone(),
            response_destination: None,
            custom_payload: None,
            forward_ton_amount: ZERO_COINS.clone(),
            forward_payload: EitherRef {
                value: EMPTY_ARC_CELL.clone(),
                layout: EitherRefLayout::ToCell,
            },
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

    /// Attaches a payload for the destination, always as a reference.
    pub fn with_forward_payload(
        &mut self,
        forward_ton_amount: &BigUint,
        forward_payload: &ArcCell,
    ) -> &mut Self {
        self.forward_ton_amount = forward_ton_amount.clone();
        self.forward_payload = EitherRef::to_ref(forward_payload.clone());
        self
    }
}

impl TLB for JettonTransferMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_TRANSFER);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let amount = parser.load_coins()?;
        let destination = parser.load_address()?;
        let response_destination = parser.load_address_opt()?;
        let custom_payload = parser.load_maybe_cell_ref()?;
        let forward_ton_amount = parser.load_coins()?;
        let forward_payload = TLB::read(parser)?;

        parser.ensure_empty()?;

        Ok(JettonTransferMessage {
            query_id,
            amount,
            destination,
            response_destination,
            custom_payload,
            forward_ton_amount,
            forward_payload,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_coins(&self.amount)?;
        dst.store_address(&self.destination)?;
        dst.store_address_opt(self.response_destination.as_ref())?;
        dst.store_maybe_cell_ref(&self.custom_payload)?;
        dst.store_coins(&self.forward_ton_amount)?;
        self.forward_payload.write(dst)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use lazy_static::lazy_static;
    use num_bigint::BigUint;

    use super::JettonTransferMessage;
    use crate::cell::{Cell, CellBuilder, TonCellError};
    use crate::tlb_types::primitives::either::{EitherRef, EitherRefLayout};
    use crate::tlb_types::tlb::TLB;
    use crate::TonAddress;

    const JETTON_TRANSFER_MSG : &str="b5ee9c720101020100a800016d0f8a7ea5001f5512dab844d643b9aca00800ef3b9902a271b2a01c8938a523cfe24e71847aaeb6a620001ed44a77ac0e709c1033428f030100d7259385618009dd924373a9aad41b28cec02da9384d67363af2034fc2a7ccc067e28d4110de86e66deb002365dfa32dfd419308ebdf35e0f6ba7c42534bbb5dab5e89e28ea3e0455cc2d2f00257a672371a90e149b7d25864dbfd44827cc1e8a30df1b1e0c4338502ade2ad96";
    const TRANSFER_PAYLOAD: &str = "259385618009DD924373A9AAD41B28CEC02DA9384D67363AF2034FC2A7CCC067E28D4110DE86E66DEB002365DFA32DFD419308EBDF35E0F6BA7C42534BBB5DAB5E89E28EA3E0455CC2D2F00257A672371A90E149B7D25864DBFD44827CC1E8A30DF1B1E0C4338502ADE2AD94";

    lazy_static! {
        static ref TRANSFER_MESSAGE_CELL: Arc<Cell> =
            Arc::new(Cell::new(hex::decode(TRANSFER_PAYLOAD).unwrap(), 862, vec![]).unwrap());
        static ref EXPECTED_JETTON_TRANSFER_MSG: JettonTransferMessage = JettonTransferMessage {
            query_id: 8819263745311958,
            amount: BigUint::from(1000000000u64),
            destination: TonAddress::from_str("EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt")
                .unwrap(),
            // addr_none on the wire
            response_destination: None,
            custom_payload: None,
            forward_ton_amount: BigUint::from(215000000u64),
            forward_payload: EitherRef {
                value: TRANSFER_MESSAGE_CELL.clone(),
                layout: EitherRefLayout::ToRef,
            },
        };
    }

    #[test]
    fn test_jetton_transfer_parser() -> anyhow::Result<()> {
        let result_jetton_transfer_msg = JettonTransferMessage::from_boc_hex(JETTON_TRANSFER_MSG)?;
        assert_eq!(*EXPECTED_JETTON_TRANSFER_MSG, result_jetton_transfer_msg);
        Ok(())
    }

    #[test]
    fn test_jetton_transfer_builder() -> anyhow::Result<()> {
        let jetton_transfer_msg = EXPECTED_JETTON_TRANSFER_MSG.clone();
        let result_cell = jetton_transfer_msg.to_cell()?;
        let result_boc_serialized = result_cell.to_boc(false)?;

        let expected_boc_serialized = hex::decode(JETTON_TRANSFER_MSG)?;

        assert_eq!(expected_boc_serialized, result_boc_serialized);
        Ok(())
    }

    #[test]
    fn test_jetton_transfer_defaults() -> anyhow::Result<()> {
        let destination =
            TonAddress::from_str("EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt")?;
        let mut msg = JettonTransferMessage::new(&destination, &BigUint::from(5u8));
        msg.with_query_id(1);
        let cell = msg.to_cell()?;
        // opcode, query_id, coins(4+8), addr, addr_none, no custom payload, zero coins, inline payload
        assert_eq!(cell.bit_len(), 32 + 64 + 12 + 267 + 2 + 1 + 4 + 1);
        assert!(cell.references().is_empty());

        let parsed = JettonTransferMessage::from_cell(&cell)?;
        assert_eq!(parsed.response_destination, None);
        assert_eq!(parsed.forward_payload.value.bit_len(), 0);
        assert_eq!(parsed, msg);
        Ok(())
    }

    #[test]
    fn test_jetton_transfer_wrong_opcode() -> anyhow::Result<()> {
        let cell = CellBuilder::new()
            .store_u32(32, 0x7362d09c)?
            .store_u64(64, 0)?
            .build()?;
        assert!(matches!(
            JettonTransferMessage::from_cell(&cell),
            Err(TonCellError::OpcodeMismatch {
                expected: 0x0f8a7ea5,
                actual: 0x7362d09c,
                ..
            })
        ));
        Ok(())
    }
}
