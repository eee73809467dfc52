use num_bigint::BigUint;

use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::message::{EMPTY_ARC_CELL, JETTON_TRANSFER_NOTIFICATION};
use crate::tlb_types::primitives::either::{EitherRef, EitherRefLayout};
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Creates a body for jetton transfer notification according to TL-B schema:
///
/// ```raw
///transfer_notification#7362d09c query_id:uint64 amount:(VarUInteger 16)
///                               sender:MsgAddress forward_payload:(Either Cell ^Cell)
///                               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonTransferNotificationMessage {
    /// should be equal with request's query_id.
    pub query_id: u64,
    /// amount of transferred jettons.
    pub amount: BigUint,
    /// is address of the previous owner of transferred jettons.
    pub sender: TonAddress,
    ///  optional custom data that should be sent to the destination address.
    pub forward_payload: EitherRef<ArcCell>,
}

impl JettonTransferNotificationMessage {
    pub fn new(sender: &TonAddress, amount: &BigUint) -> Self {
        JettonTransferNotificationMessage {
            query_id: 0,
            amount: amount.clone(),
            sender: sender.clone(),
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

    pub fn with_forward_payload(&mut self, forward_payload: &ArcCell) -> &mut Self {
        self.forward_payload = EitherRef::to_ref(forward_payload.clone());
        self
    }
}

impl TLB for JettonTransferNotificationMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_TRANSFER_NOTIFICATION);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let amount = parser.load_coins()?;
        let sender = parser.load_address()?;
        let forward_payload = TLB::read(parser)?;
        parser.ensure_empty()?;

        Ok(JettonTransferNotificationMessage {
            query_id,
            amount,
            sender,
            forward_payload,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_coins(&self.amount)?;
        dst.store_address(&self.sender)?;
        self.forward_payload.write(dst)?;
        Ok(())
    }
}
