use num_bigint::BigUint;

use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::message::{JettonInternalTransferMessage, JETTON_MINT};
use crate::tlb_types::primitives::reference::Ref;
use crate::tlb_types::tlb::{TLBPrefix, TLB};
use crate::TonAddress;

/// Mint request handled by the jetton minter:
///
/// ```raw
/// mint#00000015 query_id:uint64 to_address:MsgAddress amount:(VarUInteger 16)
///               master_msg:^InternalMsgBody = InternalMsgBody;
/// ```
///
/// `amount` is the Toncoin amount attached to the internal transfer, the jetton amount is in
/// `master_msg`.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonMintMessage {
    pub query_id: u64,
    pub to_address: TonAddress,
    pub ton_amount: BigUint,
    pub master_msg: Ref<JettonInternalTransferMessage>,
}

impl JettonMintMessage {
    /// Mint body as sent by the minter owner: the internal transfer has no sender and shares the
    /// query id.
    pub fn new(
        query_id: u64,
        to_address: &TonAddress,
        ton_amount: &BigUint,
        jetton_amount: &BigUint,
        response_address: &TonAddress,
        forward_ton_amount: &BigUint,
    ) -> Self {
        let mut master_msg = JettonInternalTransferMessage::new(jetton_amount);
        master_msg.query_id = query_id;
        master_msg.response_address = Some(response_address.clone());
        master_msg.forward_ton_amount = forward_ton_amount.clone();

        JettonMintMessage {
            query_id,
            to_address: to_address.clone(),
            ton_amount: ton_amount.clone(),
            master_msg: Ref::new(master_msg),
        }
    }
}

impl TLB for JettonMintMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_MINT);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let to_address = parser.load_address()?;
        let ton_amount = parser.load_coins()?;
        let master_msg = TLB::read(parser)?;
        parser.ensure_empty()?;

        Ok(JettonMintMessage {
            query_id,
            to_address,
            ton_amount,
            master_msg,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_address(&self.to_address)?;
        dst.store_coins(&self.ton_amount)?;
        self.master_msg.write(dst)?;
        Ok(())
    }
}
