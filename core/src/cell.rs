use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::sync::Arc;
use std::{fmt, io};

pub use bag_of_cells::*;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bitstream_io::{BigEndian, BitWrite, BitWriter};
pub use builder::*;
pub use error::*;
pub use parser::*;
pub use raw::*;
use sha2::{Digest, Sha256};
pub use slice::*;
pub use util::*;

use crate::TonHash;

mod bag_of_cells;
mod builder;
pub mod dict;
mod error;
mod parser;
mod raw;
mod raw_boc_from_boc;
mod slice;
mod util;

pub type ArcCell = Arc<Cell>;

/// Immutable ordinary cell: up to 1023 data bits and up to 4 references.
///
/// Hash and depth are computed once in [`Cell::new`]. A cell can only reference cells that
/// already exist, so a cell graph is always acyclic.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<ArcCell>,
    hash: TonHash,
    depth: u16,
}

impl Cell {
    pub fn new(
        mut data: Vec<u8>,
        bit_len: usize,
        references: Vec<ArcCell>,
    ) -> Result<Self, TonCellError> {
        if bit_len > MAX_CELL_BITS {
            return Err(TonCellError::CellOverflow {
                unit: "bits",
                requested: bit_len,
                available: MAX_CELL_BITS,
            });
        }
        if references.len() > MAX_CELL_REFERENCES {
            return Err(TonCellError::CellOverflow {
                unit: "references",
                requested: references.len(),
                available: MAX_CELL_REFERENCES,
            });
        }
        let byte_len = bit_len.div_ceil(8);
        if data.len() < byte_len {
            return Err(TonCellError::InvalidInput(format!(
                "Cell data has {} bytes, {} bits require {} bytes",
                data.len(),
                bit_len,
                byte_len
            )));
        }
        data.truncate(byte_len);
        // bits past bit_len never take part in hashing or comparison
        if bit_len % 8 != 0 {
            data[byte_len - 1] &= 0xffu8 << (8 - bit_len % 8);
        }

        let depth = references
            .iter()
            .map(|r| r.depth + 1)
            .max()
            .unwrap_or_default();
        let repr = get_repr_for_data(&data, bit_len, &references)?;
        let mut hash: TonHash = [0; 32];
        hash.copy_from_slice(&Sha256::new_with_prefix(repr).finalize());

        Ok(Self {
            data,
            bit_len,
            references,
            hash,
            depth,
        })
    }

    pub fn parser(&self) -> CellParser {
        CellParser::new(self.bit_len, &self.data, &self.references)
    }

    pub fn parse<F, T>(&self, parse: F) -> Result<T, TonCellError>
    where
        F: FnOnce(&mut CellParser) -> Result<T, TonCellError>,
    {
        parse(&mut self.parser())
    }

    pub fn parse_fully<F, T>(&self, parse: F) -> Result<T, TonCellError>
    where
        F: FnOnce(&mut CellParser) -> Result<T, TonCellError>,
    {
        let mut reader = self.parser();
        let res = parse(&mut reader)?;
        reader.ensure_empty()?;
        Ok(res)
    }

    pub fn reference(&self, idx: usize) -> Result<&ArcCell, TonCellError> {
        self.references.get(idx).ok_or_else(|| {
            TonCellError::OutOfRange(format!(
                "reference {} requested, cell has {}",
                idx,
                self.references.len()
            ))
        })
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn references(&self) -> &[ArcCell] {
        self.references.as_slice()
    }

    pub fn depth(&self) -> u16 {
        self.depth
    }

    pub fn cell_hash(&self) -> TonHash {
        self.hash
    }

    pub fn cell_hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    pub fn cell_hash_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.hash)
    }

    pub fn to_arc(self) -> ArcCell {
        Arc::new(self)
    }

    pub fn to_boc(&self, add_crc32: bool) -> Result<Vec<u8>, TonCellError> {
        BagOfCells::from_root(self.clone()).serialize(add_crc32)
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // The tag only marks an incomplete last byte, the completion bit itself is not shown
        let completion_tag = if self.bit_len % 8 != 0 { "_" } else { "" };
        writeln!(
            f,
            "Cell {{ data: [{}{}]\n, bit_len: {}\n, references: [",
            hex::encode_upper(&self.data),
            completion_tag,
            self.bit_len,
        )?;

        for reference in &self.references {
            writeln!(
                f,
                "    {}\n",
                format!("{:?}", reference).replace('\n', "\n    ")
            )?;
        }

        write!(f, "]\n hash: {}\n depth: {}\n }}", self.cell_hash_hex(), self.depth)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            data: vec![],
            bit_len: 0,
            references: vec![],
            hash: EMPTY_CELL_HASH,
            depth: 0,
        }
    }
}

/// Representation hash of a cell with no data and no references.
pub const EMPTY_CELL_HASH: TonHash = [
    0x96, 0xa2, 0x96, 0xd2, 0x24, 0xf2, 0x85, 0xc6, 0x7b, 0xee, 0x93, 0xc3, 0x0f, 0x8a, 0x30, 0x91,
    0x57, 0xf0, 0xda, 0xa3, 0x5d, 0xc5, 0xb8, 0x7e, 0x41, 0x0b, 0x78, 0x63, 0x0a, 0x09, 0xcf, 0xc7,
];

/// Standard cell representation: d1, d2, data with completion tag, child depths, child hashes.
/// See https://docs.ton.org/tvm.pdf 3.1.4 for details
fn get_repr_for_data(
    data: &[u8],
    bit_len: usize,
    refs: &[ArcCell],
) -> Result<Vec<u8>, TonCellError> {
    // descriptors + data + (hash + depth) * refs_count
    let buffer_len = 2 + data.len() + (32 + 2) * refs.len();

    let mut writer = BitWriter::endian(Vec::with_capacity(buffer_len), BigEndian);
    writer
        .write(8, get_refs_descriptor(refs)?)
        .map_cell_builder_error()?;
    writer
        .write(8, get_bits_descriptor(bit_len)?)
        .map_cell_builder_error()?;
    write_data(&mut writer, data, bit_len).map_cell_builder_error()?;
    for reference in refs {
        writer
            .write_bytes(&reference.depth.to_be_bytes())
            .map_cell_builder_error()?;
    }
    for reference in refs {
        writer
            .write_bytes(&reference.hash)
            .map_cell_builder_error()?;
    }

    writer
        .writer()
        .ok_or_else(|| TonCellError::cell_builder_error("Stream for cell repr is not byte-aligned"))
        .map(|b| b.to_vec())
}

/// Calculates d1 descriptor for an ordinary cell of level 0
pub(crate) fn get_refs_descriptor(references: &[ArcCell]) -> Result<u8, TonCellError> {
    if references.len() > MAX_CELL_REFERENCES {
        Err(TonCellError::CellOverflow {
            unit: "references",
            requested: references.len(),
            available: MAX_CELL_REFERENCES,
        })
    } else {
        Ok(references.len() as u8)
    }
}

/// Calculates d2 descriptor for cell
pub(crate) fn get_bits_descriptor(bit_len: usize) -> Result<u8, TonCellError> {
    if bit_len > MAX_CELL_BITS {
        Err(TonCellError::CellOverflow {
            unit: "bits",
            requested: bit_len,
            available: MAX_CELL_BITS,
        })
    } else {
        Ok((bit_len / 8 + bit_len.div_ceil(8)) as u8)
    }
}

fn write_data(
    writer: &mut BitWriter<Vec<u8>, BigEndian>,
    data: &[u8],
    bit_len: usize,
) -> Result<(), io::Error> {
    let rest_bits = bit_len % 8;
    if rest_bits == 0 {
        writer.write_bytes(data)
    } else {
        let last = data.len() - 1;
        writer.write_bytes(&data[..last])?;
        writer.write(8, data[last] | 1 << (8 - rest_bits - 1))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{get_bits_descriptor, get_refs_descriptor, Cell, EMPTY_CELL_HASH};
    use crate::cell::{CellBuilder, TonCellError};

    #[test]
    fn default_cell() -> anyhow::Result<()> {
        let result = Cell::default();
        let expected = Cell::new(vec![], 0, vec![])?;
        assert_eq!(result, expected);
        assert_eq!(expected.cell_hash(), EMPTY_CELL_HASH);
        Ok(())
    }

    #[test]
    fn d1_descriptor_test() -> anyhow::Result<()> {
        let empty_cell = Arc::new(CellBuilder::new().build()?);

        assert_eq!(get_refs_descriptor(&[])?, 0);
        assert_eq!(get_refs_descriptor(&[empty_cell.clone()])?, 1);
        assert!(matches!(
            get_refs_descriptor(vec![empty_cell; 5].as_slice()),
            Err(TonCellError::CellOverflow { .. })
        ));
        Ok(())
    }

    #[test]
    fn d2_descriptor_test() -> anyhow::Result<()> {
        assert_eq!(get_bits_descriptor(0)?, 0);
        assert_eq!(get_bits_descriptor(1)?, 1);
        assert_eq!(get_bits_descriptor(8)?, 2);
        assert_eq!(get_bits_descriptor(1023)?, 255);
        assert!(get_bits_descriptor(1024).is_err());
        Ok(())
    }

    #[test]
    fn trailing_bits_do_not_change_hash() -> anyhow::Result<()> {
        let clean = Cell::new(vec![0b1010_0000], 3, vec![])?;
        let dirty = Cell::new(vec![0b1011_1111, 0xff], 3, vec![])?;
        assert_eq!(clean, dirty);
        assert_eq!(clean.cell_hash(), dirty.cell_hash());
        Ok(())
    }

    #[test]
    fn hash_is_structural() -> anyhow::Result<()> {
        let leaf_a = CellBuilder::new().store_u32(32, 7)?.build()?.to_arc();
        let leaf_b = CellBuilder::new().store_u32(32, 7)?.build()?.to_arc();
        let parent_a = CellBuilder::new()
            .store_bit(true)?
            .store_reference(&leaf_a)?
            .build()?;
        let parent_b = CellBuilder::new()
            .store_bit(true)?
            .store_reference(&leaf_b)?
            .build()?;
        assert!(!Arc::ptr_eq(&leaf_a, &leaf_b));
        assert_eq!(parent_a.cell_hash(), parent_b.cell_hash());
        assert_eq!(parent_a.depth(), 1);
        assert_eq!(leaf_a.depth(), 0);
        Ok(())
    }

    #[test]
    fn rejects_oversized_cells() {
        assert!(matches!(
            Cell::new(vec![0; 128], 1024, vec![]),
            Err(TonCellError::CellOverflow { .. })
        ));
        let child = Arc::new(Cell::default());
        assert!(matches!(
            Cell::new(vec![], 0, vec![child; 5]),
            Err(TonCellError::CellOverflow { .. })
        ));
        assert!(matches!(
            Cell::new(vec![0], 9, vec![]),
            Err(TonCellError::InvalidInput(_))
        ));
    }
}
