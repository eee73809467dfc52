use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::tlb_types::tlb::{TLBPrefix, TLB};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestType1 {
    pub(crate) value: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestType2 {
    pub(crate) value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestPrefixed {
    pub(crate) value: u16,
}

impl TLB for TestType1 {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        Ok(TestType1 {
            value: parser.load_i32(32)?,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_i32(32, self.value)?;
        Ok(())
    }
}

impl TLB for TestType2 {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        Ok(TestType2 {
            value: parser.load_i64(64)?,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_i64(64, self.value)?;
        Ok(())
    }
}

impl TLB for TestPrefixed {
    const PREFIX: TLBPrefix = TLBPrefix::opcode(0xcafebabe);

    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        Ok(TestPrefixed {
            value: parser.load_u16(16)?,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u16(16, self.value)?;
        Ok(())
    }
}
