use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::cell::raw_boc_from_boc::convert_to_raw_boc;
use crate::cell::*;

/// Envelope (`serialized_boc#b5ee9c72`) holding one or more root cells.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct BagOfCells {
    pub roots: Vec<ArcCell>,
}

impl BagOfCells {
    pub fn new(roots: &[ArcCell]) -> BagOfCells {
        BagOfCells {
            roots: roots.to_vec(),
        }
    }

    pub fn from_root(root: Cell) -> BagOfCells {
        BagOfCells {
            roots: vec![root.to_arc()],
        }
    }

    pub fn add_root(&mut self, root: Cell) {
        self.roots.push(root.to_arc())
    }

    pub fn num_roots(&self) -> usize {
        self.roots.len()
    }

    pub fn root(&self, idx: usize) -> Result<&ArcCell, TonCellError> {
        self.roots.get(idx).ok_or_else(|| {
            TonCellError::OutOfRange(format!(
                "Invalid root index: {}, envelope contains {} roots",
                idx,
                self.roots.len()
            ))
        })
    }

    pub fn single_root(mut self) -> Result<ArcCell, TonCellError> {
        match (self.roots.pop(), self.roots.is_empty()) {
            (Some(root), true) => Ok(root),
            (root, _) => Err(TonCellError::MalformedEnvelope(format!(
                "Single root expected, got {}",
                self.roots.len() + usize::from(root.is_some())
            ))),
        }
    }

    pub fn parse(serial: &[u8]) -> Result<BagOfCells, TonCellError> {
        let raw = RawBagOfCells::parse(serial)?;
        let num_cells = raw.cells.len();
        let mut cells: Vec<ArcCell> = Vec::with_capacity(num_cells);

        // Cells are built from the last one, so every referenced cell already exists.
        for (cell_index, raw_cell) in raw.cells.into_iter().enumerate().rev() {
            let mut references = Vec::with_capacity(raw_cell.references.len());
            for &ref_index in &raw_cell.references {
                if ref_index == cell_index {
                    return Err(TonCellError::CyclicReference {
                        cell_index,
                        ref_index,
                    });
                }
                if ref_index < cell_index {
                    return Err(TonCellError::boc_deserialization_error(format!(
                        "Cell {cell_index} refers to preceding cell {ref_index}"
                    )));
                }
                references.push(cells[num_cells - 1 - ref_index].clone());
            }

            let cell = Cell::new(raw_cell.data, raw_cell.bit_len, references)
                .map_err(TonCellError::boc_deserialization_error)?;
            cells.push(cell.to_arc());
        }

        let roots = raw
            .roots
            .into_iter()
            .map(|r| &cells[num_cells - 1 - r])
            .map(Arc::clone)
            .collect();

        Ok(BagOfCells { roots })
    }

    pub fn parse_hex(hex: &str) -> Result<BagOfCells, TonCellError> {
        let str: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
        let bin = hex::decode(str.as_str()).map_boc_deserialization_error()?;
        Self::parse(&bin)
    }

    pub fn parse_base64(base64: &str) -> Result<BagOfCells, TonCellError> {
        let bin = STANDARD.decode(base64).map_boc_deserialization_error()?;
        Self::parse(&bin)
    }

    pub fn serialize(&self, has_crc32: bool) -> Result<Vec<u8>, TonCellError> {
        let raw = convert_to_raw_boc(self)?;
        raw.serialize(has_crc32)
    }
}
