use crate::cell::{Cell, CellBuilder, CellParser, TonCellError};
use crate::message::{OpcodeTable, PayloadKind, TonMessageError};
use crate::tlb_types::tlb::TLBPrefix;

/// Bet placed through the forward payload of a jetton transfer to the crash game:
///
/// ```raw
/// bet#<configured> round_num:uint32 multiple:uint32 = ForwardPayload;
/// ```
///
/// The opcode differs between contract revisions and comes from [`OpcodeTable`].
#[derive(Clone, Debug, PartialEq)]
pub struct BetMessage {
    pub round_num: u32,
    /// cash-out multiple in percent.
    pub multiple: u32,
}

impl BetMessage {
    pub fn new(round_num: u32, multiple: u32) -> Self {
        BetMessage {
            round_num,
            multiple,
        }
    }

    pub fn to_cell(&self, opcodes: &OpcodeTable) -> Result<Cell, TonMessageError> {
        let opcode = opcodes.require(PayloadKind::Bet)?;
        let mut builder = CellBuilder::new();
        builder.store_u32(32, opcode)?;
        builder.store_u32(32, self.round_num)?;
        builder.store_u32(32, self.multiple)?;
        Ok(builder.build()?)
    }

    pub fn from_cell(cell: &Cell, opcodes: &OpcodeTable) -> Result<Self, TonMessageError> {
        let opcode = opcodes.require(PayloadKind::Bet)?;
        let mut parser = cell.parser();
        Self::read_with_opcode(&mut parser, opcode)
            .map_err(|e| e.into_truncated_payload("BetMessage"))
            .map_err(TonMessageError::from)
    }

    fn read_with_opcode(parser: &mut CellParser, opcode: u32) -> Result<Self, TonCellError> {
        let actual = parser.load_u32(32)?;
        if actual != opcode {
            return Err(TonCellError::tlb_prefix_error(
                &TLBPrefix::opcode(opcode),
                actual as u64,
            ));
        }
        let round_num = parser.load_u32(32)?;
        let multiple = parser.load_u32(32)?;
        parser.ensure_empty()?;
        Ok(BetMessage {
            round_num,
            multiple,
        })
    }
}
