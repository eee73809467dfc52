use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::message::CRASH_GAME_SET_TEST_DICT;
use crate::tlb_types::tlb::{TLBPrefix, TLB};

/// Replaces the round dictionary of a test deployment:
///
/// ```raw
/// set_test_dict#20a4c01e query_id:uint64 update:(Maybe ^Cell) = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SetTestDictMessage {
    pub query_id: u64,
    pub update: Option<ArcCell>,
}

impl TLB for SetTestDictMessage {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(CRASH_GAME_SET_TEST_DICT);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let query_id = parser.load_u64(64)?;
        let update = parser.load_maybe_cell_ref()?;
        parser.ensure_empty()?;
        Ok(SetTestDictMessage { query_id, update })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u64(64, self.query_id)?;
        dst.store_maybe_cell_ref(&self.update)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::SetTestDictMessage;
    use crate::cell::dict::Dictionary;
    use crate::tlb_types::tlb::TLB;

    #[test]
    fn test_set_test_dict() -> anyhow::Result<()> {
        let dict = Dictionary::from_map(16, [(0u16, 10u32), (1u16, 11u32)], |builder, value| {
            builder.store_u32(32, value)?;
            Ok(())
        })?;
        let msg = SetTestDictMessage {
            query_id: 1,
            update: dict.as_cell()?,
        };
        let cell = msg.to_cell()?;
        assert_eq!(cell.bit_len(), 32 + 64 + 1);
        assert_eq!(cell.references().len(), 1);

        let parsed = SetTestDictMessage::from_cell(&cell)?;
        let root = parsed.update.as_ref().expect("dict root");
        let reparsed = Dictionary::parse(root, 16)?;
        assert_eq!(reparsed, dict);
        assert!(reparsed.get_int_key(&BigUint::from(1u8))?.is_some());

        let empty = SetTestDictMessage {
            query_id: 2,
            update: None,
        };
        assert_eq!(SetTestDictMessage::from_cell(&empty.to_cell()?)?, empty);
        Ok(())
    }
}
