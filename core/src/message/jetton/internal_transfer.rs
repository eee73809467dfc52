use num_bigint::BigUint;

use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::message::{EMPTY_ARC_CELL, JETTON_INTERNAL_TRANSFER, ZERO_COINS};
use crate::tlb_types::primitives::either::{EitherRef, EitherRefLayout};
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Wallet-to-wallet transfer, also sent by the minter when minting:
///
/// ```raw
/// internal_transfer#178d4519 query_id:uint64 amount:(VarUInteger 16) from:MsgAddress
///                     response_address:MsgAddress forward_ton_amount:(VarUInteger 16)
///                     forward_payload:(Either Cell ^Cell) = InternalMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JettonInternalTransferMessage {
    pub query_id: u64,
    pub amount: BigUint,
    /// `None` when jettons are minted.
    pub from_address: Option<TonAddress>,
    pub response_address: Option<TonAddress>,
    pub forward_ton_amount: BigUint,
    pub forward_payload: EitherRef<ArcCell>,
}

impl JettonInternalTransferMessage {
    pub fn new(amount: &BigUint) -> Self {
        JettonInternalTransferMessage {
            query_id: 0,
            amount: amount.clone(),
            from_address: None,
            response_address: None,
            forward_ton_amount: ZERO_COINS.clone(),
            forward_payload: EitherRef {
                value: EMPTY_ARC_CELL.clone(),
                layout: EitherRefLayout::ToCell,
            },
        }
    }
}

impl TLB for JettonInternalTransferMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_INTERNAL_TRANSFER);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let amount = parser.load_coins()?;
        let from_address = parser.load_address_opt()?;
        let response_address = parser.load_address_opt()?;
        let forward_ton_amount = parser.load_coins()?;
        let forward_payload = TLB::read(parser)?;

        parser.ensure_empty()?;

        Ok(JettonInternalTransferMessage {
            query_id,
            amount,
            from_address,
            response_address,
            forward_ton_amount,
            forward_payload,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_coins(&self.amount)?;
        dst.store_address_opt(self.from_address.as_ref())?;
        dst.store_address_opt(self.response_address.as_ref())?;
        dst.store_coins(&self.forward_ton_amount)?;
        self.forward_payload.write(dst)?;
        Ok(())
    }
}
