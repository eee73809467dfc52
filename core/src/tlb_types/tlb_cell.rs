use std::sync::Arc;

use crate::cell::{ArcCell, BagOfCells, Cell, CellBuilder, CellParser, TonCellError};
use crate::tlb_types::tlb::TLB;
use crate::types::TON_HASH_BYTES;
use crate::TonHash;

/// A bare `Cell` field takes everything left in the reader.
impl TLB for Cell {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        parser.load_remaining()
    }

    fn write_definition(&self, builder: &mut CellBuilder) -> Result<(), TonCellError> {
        builder.store_cell(self)?;
        Ok(())
    }

    fn from_boc(boc: &[u8]) -> Result<Self, TonCellError> {
        let arc_cell = BagOfCells::parse(boc)?.single_root()?;
        Ok(Arc::unwrap_or_clone(arc_cell))
    }
}

impl TLB for ArcCell {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        Ok(Cell::read(parser)?.to_arc())
    }

    fn write_definition(&self, builder: &mut CellBuilder) -> Result<(), TonCellError> {
        self.as_ref().write(builder)?;
        Ok(())
    }

    fn from_boc(boc: &[u8]) -> Result<Self, TonCellError> {
        BagOfCells::parse(boc)?.single_root()
    }
}

impl TLB for TonHash {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let mut hash: TonHash = [0; TON_HASH_BYTES];
        parser.load_slice(&mut hash)?;
        Ok(hash)
    }

    fn write_definition(&self, builder: &mut CellBuilder) -> Result<(), TonCellError> {
        builder.store_slice(self.as_slice())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_takes_the_remainder() -> anyhow::Result<()> {
        let child = CellBuilder::new().store_u8(8, 9)?.build()?.to_arc();
        let cell = CellBuilder::new()
            .store_u8(8, 1)?
            .store_u16(16, 0xabcd)?
            .store_reference(&child)?
            .build()?;
        let mut parser = cell.parser();
        parser.load_u8(8)?;
        let rest: Cell = parser.load_tlb()?;
        assert_eq!(rest.bit_len(), 16);
        assert_eq!(rest.data(), &[0xab, 0xcd]);
        assert_eq!(rest.references(), &[child]);
        parser.ensure_empty()?;

        assert_eq!(Cell::from_boc(&cell.to_boc(false)?)?, cell);
        assert_eq!(ArcCell::from_boc(&cell.to_boc(true)?)?.as_ref(), &cell);
        Ok(())
    }

    #[test]
    fn arc_cell_hash_is_the_representation_hash() -> anyhow::Result<()> {
        let child = CellBuilder::new().store_u8(8, 9)?.build()?.to_arc();
        let cell = CellBuilder::new()
            .store_u8(8, 3)?
            .store_reference(&child)?
            .build()?
            .to_arc();
        let hash: TonHash = cell.cell_hash();
        assert_eq!(hex::encode(hash), cell.cell_hash_hex());
        assert_eq!(cell.to_cell_hash()?, hash);
        Ok(())
    }

    #[test]
    fn hash_is_256_bits() -> anyhow::Result<()> {
        let hash: TonHash = [7; TON_HASH_BYTES];
        let cell = CellBuilder::new().store_tlb(&hash)?.build()?;
        assert_eq!(cell.bit_len(), 256);
        assert_eq!(cell.parser().load_tlb::<TonHash>()?, hash);
        Ok(())
    }
}
