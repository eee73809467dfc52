use crate::cell::{ArcCell, Cell, CellBuilder, CellParser, TonCellError};

/// A window into a cell: a bit range and a reference range.
///
/// Get-methods return slices, typically an address or a tail of some cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSlice {
    pub cell: ArcCell,
    pub start_bit: usize,
    pub end_bit: usize,
    pub start_ref: usize,
    pub end_ref: usize,
}

impl CellSlice {
    pub fn new(
        cell: &ArcCell,
        start_bit: usize,
        end_bit: usize,
        start_ref: usize,
        end_ref: usize,
    ) -> Result<CellSlice, TonCellError> {
        if end_bit < start_bit || end_bit > cell.bit_len() {
            return Err(TonCellError::OutOfRange(format!(
                "Invalid bit offsets: start: {}, end: {}, bit_len: {}",
                start_bit,
                end_bit,
                cell.bit_len()
            )));
        }
        if end_ref < start_ref || end_ref > cell.references().len() {
            return Err(TonCellError::OutOfRange(format!(
                "Invalid references: start: {}, end: {}, count: {}",
                start_ref,
                end_ref,
                cell.references().len()
            )));
        }
        Ok(CellSlice {
            cell: cell.clone(),
            start_bit,
            end_bit,
            start_ref,
            end_ref,
        })
    }

    pub fn full_cell(cell: ArcCell) -> CellSlice {
        CellSlice {
            start_bit: 0,
            end_bit: cell.bit_len(),
            start_ref: 0,
            end_ref: cell.references().len(),
            cell,
        }
    }

    pub fn bit_len(&self) -> usize {
        self.end_bit - self.start_bit
    }

    pub fn parser(&self) -> Result<CellParser, TonCellError> {
        let mut parser = CellParser::new(
            self.end_bit,
            self.cell.data(),
            &self.cell.references()[self.start_ref..self.end_ref],
        );
        parser.skip_bits(self.start_bit)?;
        Ok(parser)
    }

    pub fn parse<F, T>(&self, parse: F) -> Result<T, TonCellError>
    where
        F: FnOnce(&mut CellParser) -> Result<T, TonCellError>,
    {
        parse(&mut self.parser()?)
    }

    pub fn parse_fully<F, T>(&self, parse: F) -> Result<T, TonCellError>
    where
        F: FnOnce(&mut CellParser) -> Result<T, TonCellError>,
    {
        let mut reader = self.parser()?;
        let res = parse(&mut reader)?;
        reader.ensure_empty()?;
        Ok(res)
    }

    pub fn reference(&self, idx: usize) -> Result<&ArcCell, TonCellError> {
        let ref_count = self.end_ref - self.start_ref;
        if idx >= ref_count {
            return Err(TonCellError::OutOfRange(format!(
                "reference {idx} requested, slice has {ref_count}"
            )));
        }
        self.cell.reference(self.start_ref + idx)
    }

    /// Copies the window into a standalone cell, references included.
    pub fn to_cell(&self) -> Result<Cell, TonCellError> {
        let mut parser = self.parser()?;
        parser.load_remaining()
    }

    /// Copies only the data bits of the window.
    pub fn data_cell(&self) -> Result<Cell, TonCellError> {
        let mut parser = self.parser()?;
        let bits = parser.load_bits(self.bit_len())?;
        CellBuilder::new().store_bits(self.bit_len(), &bits)?.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::{CellBuilder, CellSlice};

    #[test]
    fn slice_window() -> anyhow::Result<()> {
        let child = CellBuilder::new().store_u8(8, 9)?.build()?.to_arc();
        let cell = CellBuilder::new()
            .store_u8(4, 0xf)?
            .store_u16(16, 0xabcd)?
            .store_u8(4, 0x3)?
            .store_reference(&child)?
            .store_reference(&child)?
            .build()?
            .to_arc();

        let slice = CellSlice::new(&cell, 4, 20, 1, 2)?;
        assert_eq!(slice.bit_len(), 16);
        assert_eq!(slice.parse_fully(|p| {
            let value = p.load_u16(16)?;
            p.next_reference()?;
            Ok(value)
        })?, 0xabcd);
        assert_eq!(slice.reference(0)?, &child);
        assert!(slice.reference(1).is_err());

        let copy = slice.to_cell()?;
        assert_eq!(copy.bit_len(), 16);
        assert_eq!(copy.references().len(), 1);
        assert!(slice.data_cell()?.references().is_empty());

        assert!(CellSlice::new(&cell, 4, 40, 0, 0).is_err());
        assert!(CellSlice::new(&cell, 0, 8, 1, 3).is_err());
        Ok(())
    }
}
