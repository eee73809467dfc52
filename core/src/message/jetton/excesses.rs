use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::message::JETTON_EXCESSES;
use crate::tlb_types::tlb::{TLBPrefix, TLB};

/// Creates a body for excesses according to TL-B schema:
///
/// ```raw
/// excesses#d53276db query_id:uint64 = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonExcessesMessage {
    /// arbitrary request number.
    pub query_id: u64,
}

impl JettonExcessesMessage {
    pub fn new(query_id: u64) -> Self {
        JettonExcessesMessage { query_id }
    }
}

impl TLB for JettonExcessesMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(JETTON_EXCESSES);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        parser.ensure_empty()?;
        Ok(JettonExcessesMessage { query_id })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::JettonExcessesMessage;
    use crate::cell::{CellBuilder, TonCellError};
    use crate::tlb_types::tlb::TLB;

    #[test]
    fn test_excesses() -> anyhow::Result<()> {
        let msg = JettonExcessesMessage::new(0x0102030405060708);
        let cell = msg.to_cell()?;
        assert_eq!(
            cell.data(),
            &[0xd5, 0x32, 0x76, 0xdb, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
        assert_eq!(JettonExcessesMessage::from_cell(&cell)?, msg);
        Ok(())
    }

    #[test]
    fn test_excesses_trailing_data() -> anyhow::Result<()> {
        let cell = CellBuilder::new()
            .store_u32(32, 0xd53276db)?
            .store_u64(64, 1)?
            .store_bit(true)?
            .build()?;
        assert!(matches!(
            JettonExcessesMessage::from_cell(&cell),
            Err(TonCellError::NonEmptyReader {
                remaining_bits: 1,
                remaining_refs: 0
            })
        ));
        Ok(())
    }
}
