use std::any::type_name;
use std::fmt::Debug;
use std::ops::Deref;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use crate::cell::{BagOfCells, Cell, CellBuilder, CellParser, TonCellError};
use crate::TonHash;

/// A value with a fixed TL-B layout.
///
/// Implementors describe their fields in `read_definition`/`write_definition`; the optional
/// `PREFIX` (the opcode for message bodies) is handled by `read`/`write`.
/// https://docs.ton.org/v3/documentation/data-formats/tlb/tl-b-language#overview
pub trait TLB: Sized + Clone + Debug {
    const PREFIX: TLBPrefix = TLBPrefix::NULL;

    /// Field layout without the prefix.
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError>;
    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError>;

    /// Reads the prefix and the fields. Running out of bits or references is reported as
    /// `TruncatedPayload`, a different leading value as `OpcodeMismatch`.
    fn read(parser: &mut CellParser) -> Result<Self, TonCellError> {
        Self::verify_prefix(parser)?;
        Self::read_definition(parser).map_err(|e| e.into_truncated_payload(type_name::<Self>()))
    }

    fn write(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        Self::write_prefix(dst)?;
        self.write_definition(dst)
    }

    fn to_cell_hash(&self) -> Result<TonHash, TonCellError> {
        Ok(self.to_cell()?.cell_hash())
    }

    fn from_cell(cell: &Cell) -> Result<Self, TonCellError> {
        Self::read(&mut cell.parser())
    }

    fn from_boc(boc: &[u8]) -> Result<Self, TonCellError> {
        let cell = BagOfCells::parse(boc)?.single_root()?;
        Self::from_cell(cell.deref())
    }

    fn from_boc_hex(boc_hex: &str) -> Result<Self, TonCellError> {
        let cell = BagOfCells::parse_hex(boc_hex)?.single_root()?;
        Self::from_cell(cell.deref())
    }

    fn from_boc_b64(boc_b64: &str) -> Result<Self, TonCellError> {
        let cell = BagOfCells::parse_base64(boc_b64)?.single_root()?;
        Self::from_cell(cell.deref())
    }

    fn to_cell(&self) -> Result<Cell, TonCellError> {
        let mut builder = CellBuilder::new();
        self.write(&mut builder)?;
        builder.build()
    }

    fn to_boc(&self, add_crc32: bool) -> Result<Vec<u8>, TonCellError> {
        BagOfCells::from_root(self.to_cell()?).serialize(add_crc32)
    }

    fn to_boc_hex(&self, add_crc32: bool) -> Result<String, TonCellError> {
        Ok(hex::encode(self.to_boc(add_crc32)?))
    }

    fn to_boc_b64(&self, add_crc32: bool) -> Result<String, TonCellError> {
        Ok(BASE64_STANDARD.encode(self.to_boc(add_crc32)?))
    }

    fn verify_prefix(parser: &mut CellParser) -> Result<(), TonCellError> {
        if Self::PREFIX == TLBPrefix::NULL {
            return Ok(());
        }

        let remaining = parser.remaining_bits();
        if remaining < Self::PREFIX.bit_len {
            return Err(TonCellError::TruncatedPayload(format!(
                "{}: prefix of {} bits requested, {} remaining",
                type_name::<Self>(),
                Self::PREFIX.bit_len,
                remaining
            )));
        }

        let actual_prefix = parser.load_u64(Self::PREFIX.bit_len)?;
        if actual_prefix != Self::PREFIX.value {
            return Err(TonCellError::tlb_prefix_error(&Self::PREFIX, actual_prefix));
        }
        Ok(())
    }

    fn write_prefix(builder: &mut CellBuilder) -> Result<(), TonCellError> {
        if Self::PREFIX != TLBPrefix::NULL {
            builder.store_u64(Self::PREFIX.bit_len, Self::PREFIX.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TLBPrefix {
    pub bit_len: usize,
    pub value: u64,
}

impl TLBPrefix {
    pub const NULL: TLBPrefix = TLBPrefix::new(0, 0);

    pub const fn new(bit_len: usize, value: u64) -> Self {
        TLBPrefix { bit_len, value }
    }

    /// 32-bit message opcode.
    pub const fn opcode(value: u32) -> Self {
        TLBPrefix::new(32, value as u64)
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_err;

    use super::*;
    use crate::tlb_types::primitives::test_types::{TestPrefixed, TestType1};

    #[test]
    fn prefix_is_written_and_verified() -> anyhow::Result<()> {
        let obj = TestPrefixed { value: 42 };
        let cell = obj.to_cell()?;
        assert_eq!(cell.bit_len(), 32 + 16);
        assert_eq!(&cell.data()[..4], &[0xca, 0xfe, 0xba, 0xbe]);
        assert_eq!(TestPrefixed::from_cell(&cell)?, obj);
        Ok(())
    }

    #[test]
    fn wrong_prefix_is_an_opcode_mismatch() -> anyhow::Result<()> {
        let cell = CellBuilder::new().store_u32(32, 0)?.store_u16(16, 42)?.build()?;
        let err = TestPrefixed::from_cell(&cell).unwrap_err();
        assert!(matches!(
            err,
            TonCellError::OpcodeMismatch {
                expected: 0xcafebabe,
                actual: 0,
                bit_len: 32
            }
        ));
        Ok(())
    }

    #[test]
    fn short_input_is_a_truncated_payload() -> anyhow::Result<()> {
        let prefix_only = CellBuilder::new().store_u32(32, 0xcafebabe)?.build()?;
        assert!(matches!(
            TestPrefixed::from_cell(&prefix_only),
            Err(TonCellError::TruncatedPayload(_))
        ));

        let too_short = CellBuilder::new().store_u16(16, 0xcafe)?.build()?;
        assert!(matches!(
            TestPrefixed::from_cell(&too_short),
            Err(TonCellError::TruncatedPayload(_))
        ));
        assert_err!(TestType1::from_cell(&Cell::default()));
        Ok(())
    }

    #[test]
    fn boc_helpers() -> anyhow::Result<()> {
        let obj = TestPrefixed { value: 7 };
        let boc_hex = obj.to_boc_hex(true)?;
        assert_eq!(TestPrefixed::from_boc_hex(&boc_hex)?, obj);
        let boc_b64 = obj.to_boc_b64(false)?;
        assert_eq!(TestPrefixed::from_boc_b64(&boc_b64)?, obj);
        assert_eq!(obj.to_cell_hash()?, obj.to_cell()?.cell_hash());
        Ok(())
    }
}
