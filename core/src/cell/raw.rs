use std::io::Cursor;

use bitstream_io::{BigEndian, BitWrite, BitWriter, ByteRead, ByteReader};
use crc::Crc;
use lazy_static::lazy_static;

use crate::cell::{MapTonCellError, TonCellError, MAX_CELL_REFERENCES};

lazy_static! {
    pub static ref CRC_32_ISCSI: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_ISCSI);
}

/// Raw representation of Cell.
///
/// References are stored as indices in BagOfCells.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub(crate) struct RawCell {
    pub(crate) data: Vec<u8>,
    pub(crate) bit_len: usize,
    pub(crate) references: Vec<usize>,
}

/// Raw representation of BagOfCells.
///
/// `cells` must be topologically sorted: a cell only refers to cells with greater indices.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub(crate) struct RawBagOfCells {
    pub(crate) cells: Vec<RawCell>,
    pub(crate) roots: Vec<usize>,
}

pub(crate) const GENERIC_BOC_MAGIC: u32 = 0xb5ee9c72;

/// Fields of `serialized_boc#b5ee9c72` preceding the cell data.
struct BocHeader {
    has_idx: bool,
    has_crc32c: bool,
    size: u8,
    off_bytes: u8,
    cells: usize,
    roots: usize,
    tot_cells_size: usize,
}

impl BocHeader {
    /// Byte length of the header, root list and optional index.
    fn len(&self) -> usize {
        let size = self.size as usize;
        let off_bytes = self.off_bytes as usize;
        let index_len = if self.has_idx {
            self.cells * off_bytes
        } else {
            0
        };
        4 + 1 + 1 + 3 * size + off_bytes + self.roots * size + index_len
    }
}

impl RawBagOfCells {
    pub(crate) fn parse(serial: &[u8]) -> Result<RawBagOfCells, TonCellError> {
        let mut reader = ByteReader::endian(Cursor::new(serial), BigEndian);
        let header = read_header(&mut reader)?;

        let crc_len = if header.has_crc32c { 4 } else { 0 };
        let expected_len = header
            .len()
            .checked_add(header.tot_cells_size)
            .and_then(|len| len.checked_add(crc_len));
        if expected_len != Some(serial.len()) {
            return Err(TonCellError::boc_deserialization_error(format!(
                "Envelope length mismatch: header declares {:?} bytes, got {}",
                expected_len,
                serial.len()
            )));
        }

        //   crc32c:has_crc32c?uint32
        if header.has_crc32c {
            let (body, crc_bytes) = serial.split_at(serial.len() - 4);
            let expected = u32::from_le_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
            let actual = CRC_32_ISCSI.checksum(body);
            if expected != actual {
                return Err(TonCellError::boc_deserialization_error(format!(
                    "CRC32C mismatch: declared {expected:#010x}, computed {actual:#010x}"
                )));
            }
        }

        //   root_list:(roots * ##(size * 8))
        let mut root_list = Vec::with_capacity(header.roots);
        for _ in 0..header.roots {
            let root = read_var_size(&mut reader, header.size)?;
            if root >= header.cells {
                return Err(TonCellError::boc_deserialization_error(format!(
                    "Root index {} is out of range, envelope has {} cells",
                    root, header.cells
                )));
            }
            root_list.push(root);
        }

        //   index:has_idx?(cells * ##(off_bytes * 8))
        if header.has_idx {
            reader
                .skip((header.cells * header.off_bytes as usize) as u32)
                .map_boc_deserialization_error()?;
        }

        //   cell_data:(tot_cells_size * [ uint8 ])
        let mut consumed = 0;
        let mut cell_vec = Vec::with_capacity(header.cells);
        for cell_index in 0..header.cells {
            let (cell, cell_size) = read_cell(&mut reader, header.size, header.cells)?;
            log::trace!(
                "envelope cell {}: {} bits, refs {:?}",
                cell_index,
                cell.bit_len,
                cell.references
            );
            consumed += cell_size;
            cell_vec.push(cell);
        }
        if consumed != header.tot_cells_size {
            return Err(TonCellError::boc_deserialization_error(format!(
                "Cell data size mismatch: declared {}, read {}",
                header.tot_cells_size, consumed
            )));
        }

        Ok(RawBagOfCells {
            cells: cell_vec,
            roots: root_list,
        })
    }

    pub(crate) fn serialize(&self, has_crc32: bool) -> Result<Vec<u8>, TonCellError> {
        //Based on https://github.com/toncenter/tonweb/blob/c2d5d0fc23d2aec55a0412940ce6e580344a288c/src/boc/Cell.js#L198
        if self.roots.is_empty() {
            return Err(TonCellError::boc_serialization_error(
                "Envelope must contain at least one root",
            ));
        }

        let num_ref_bits = 32 - (self.cells.len() as u32).leading_zeros();
        let num_ref_bytes = num_ref_bits.div_ceil(8).max(1);

        let full_size: u32 = self
            .cells
            .iter()
            .map(|cell| raw_cell_size(cell, num_ref_bytes))
            .sum();

        let num_offset_bits = 32 - full_size.leading_zeros();
        let num_offset_bytes = num_offset_bits.div_ceil(8).max(1);

        let mut writer = BitWriter::endian(Vec::new(), BigEndian);

        writer
            .write(32, GENERIC_BOC_MAGIC)
            .map_boc_serialization_error()?;

        // has_idx:(## 1) has_crc32c:(## 1) has_cache_bits:(## 1) flags:(## 2) size:(## 3)
        writer.write_bit(false).map_boc_serialization_error()?;
        writer.write_bit(has_crc32).map_boc_serialization_error()?;
        writer.write_bit(false).map_boc_serialization_error()?;
        writer.write(2, 0u8).map_boc_serialization_error()?;
        writer
            .write(3, num_ref_bytes)
            .map_boc_serialization_error()?;
        writer
            .write(8, num_offset_bytes)
            .map_boc_serialization_error()?;
        writer
            .write(8 * num_ref_bytes, self.cells.len() as u32)
            .map_boc_serialization_error()?;
        writer
            .write(8 * num_ref_bytes, self.roots.len() as u32)
            .map_boc_serialization_error()?;
        writer
            .write(8 * num_ref_bytes, 0u32)
            .map_boc_serialization_error()?; // Complete BOCs only
        writer
            .write(8 * num_offset_bytes, full_size)
            .map_boc_serialization_error()?;
        for root in &self.roots {
            writer
                .write(8 * num_ref_bytes, *root as u32)
                .map_boc_serialization_error()?;
        }

        for cell in &self.cells {
            write_raw_cell(&mut writer, cell, num_ref_bytes)?;
        }

        let mut res = writer
            .writer()
            .ok_or_else(|| TonCellError::boc_serialization_error("Stream is not byte-aligned"))?
            .to_vec();
        if has_crc32 {
            let cs = CRC_32_ISCSI.checksum(res.as_slice());
            res.extend_from_slice(&cs.to_le_bytes());
        }
        Ok(res)
    }
}

fn read_header(
    reader: &mut ByteReader<Cursor<&[u8]>, BigEndian>,
) -> Result<BocHeader, TonCellError> {
    // serialized_boc#b5ee9c72
    let magic = reader.read::<u32>().map_boc_deserialization_error()?;
    if magic != GENERIC_BOC_MAGIC {
        return Err(TonCellError::boc_deserialization_error(format!(
            "Unsupported envelope magic number: {magic:#010x}"
        )));
    }
    // has_idx:(## 1) has_crc32c:(## 1) has_cache_bits:(## 1) flags:(## 2) { flags = 0 }
    let flags = reader.read::<u8>().map_boc_deserialization_error()?;
    let has_idx = (flags >> 7) & 1 == 1;
    let has_crc32c = (flags >> 6) & 1 == 1;
    // size:(## 3) { size <= 4 }
    let size = flags & 0b0000_0111;
    if size == 0 || size > 4 {
        return Err(TonCellError::boc_deserialization_error(format!(
            "Invalid reference size: {size}"
        )));
    }
    // off_bytes:(## 8) { off_bytes <= 8 }
    let off_bytes = reader.read::<u8>().map_boc_deserialization_error()?;
    if off_bytes == 0 || off_bytes > 8 {
        return Err(TonCellError::boc_deserialization_error(format!(
            "Invalid offset size: {off_bytes}"
        )));
    }
    // cells:(##(size * 8)) roots:(##(size * 8)) { roots >= 1 } absent:(##(size * 8))
    let cells = read_var_size(reader, size)?;
    let roots = read_var_size(reader, size)?;
    let absent = read_var_size(reader, size)?;
    if roots == 0 || roots + absent > cells {
        return Err(TonCellError::boc_deserialization_error(format!(
            "Invalid counters: cells {cells}, roots {roots}, absent {absent}"
        )));
    }
    if absent != 0 {
        return Err(TonCellError::boc_deserialization_error(
            "Envelopes with absent cells are not supported",
        ));
    }
    // tot_cells_size:(##(off_bytes * 8))
    let tot_cells_size = read_var_size(reader, off_bytes)?;
    // every cell takes at least its two descriptor bytes
    if cells > tot_cells_size / 2 {
        return Err(TonCellError::boc_deserialization_error(format!(
            "{cells} cells cannot fit in {tot_cells_size} bytes of cell data"
        )));
    }

    Ok(BocHeader {
        has_idx,
        has_crc32c,
        size,
        off_bytes,
        cells,
        roots,
        tot_cells_size,
    })
}

fn read_cell(
    reader: &mut ByteReader<Cursor<&[u8]>, BigEndian>,
    size: u8,
    cell_count: usize,
) -> Result<(RawCell, usize), TonCellError> {
    let d1 = reader.read::<u8>().map_boc_deserialization_error()?;
    let d2 = reader.read::<u8>().map_boc_deserialization_error()?;

    let level = d1 >> 5;
    let is_exotic = (d1 & 8) != 0;
    let ref_num = (d1 & 0x07) as usize;
    if is_exotic || level != 0 {
        return Err(TonCellError::boc_deserialization_error(format!(
            "Only ordinary cells are supported (d1: {d1:#04x})"
        )));
    }
    if ref_num > MAX_CELL_REFERENCES {
        return Err(TonCellError::boc_deserialization_error(format!(
            "Cell declares {ref_num} references"
        )));
    }
    let data_size = ((d2 >> 1) + (d2 & 1)) as usize;
    let full_bytes = (d2 & 0x01) == 0;

    let mut data = reader
        .read_to_vec(data_size)
        .map_boc_deserialization_error()?;

    let padding_len = if !full_bytes {
        // d2 is odd only when data_size > 0
        let last = data_size - 1;
        let num_zeros = data[last].trailing_zeros();
        if num_zeros >= 8 {
            return Err(TonCellError::boc_deserialization_error(
                "Last byte of binary must not be zero if full_byte flag is not set",
            ));
        }
        data[last] &= !(1 << num_zeros);
        num_zeros as usize + 1
    } else {
        0
    };
    let bit_len = data_size * 8 - padding_len;

    let mut references = Vec::with_capacity(ref_num);
    for _ in 0..ref_num {
        let ref_index = read_var_size(reader, size)?;
        if ref_index >= cell_count {
            return Err(TonCellError::boc_deserialization_error(format!(
                "Reference to cell {ref_index} is out of range, envelope has {cell_count} cells"
            )));
        }
        references.push(ref_index);
    }
    let cell_size = 2 + data_size + ref_num * size as usize;
    Ok((
        RawCell {
            data,
            bit_len,
            references,
        },
        cell_size,
    ))
}

fn raw_cell_size(cell: &RawCell, ref_size_bytes: u32) -> u32 {
    let data_len = cell.bit_len.div_ceil(8);
    2 + data_len as u32 + cell.references.len() as u32 * ref_size_bytes
}

fn write_raw_cell(
    writer: &mut BitWriter<Vec<u8>, BigEndian>,
    cell: &RawCell,
    ref_size_bytes: u32,
) -> Result<(), TonCellError> {
    let d1 = cell.references.len() as u8;
    let padding_bits = cell.bit_len % 8;
    let full_bytes = padding_bits == 0;
    let data = cell.data.as_slice();
    let data_len = cell.bit_len.div_ceil(8);
    // floor(b / 8) + ceil(b / 8)
    let d2 = (cell.bit_len / 8 + data_len) as u8;

    writer.write(8, d1).map_boc_serialization_error()?;
    writer.write(8, d2).map_boc_serialization_error()?;
    if !full_bytes {
        writer
            .write_bytes(&data[..data_len - 1])
            .map_boc_serialization_error()?;
        let last_byte = data[data_len - 1];
        let l = last_byte | 1 << (8 - padding_bits - 1);
        writer.write(8, l).map_boc_serialization_error()?;
    } else {
        writer
            .write_bytes(&data[..data_len])
            .map_boc_serialization_error()?;
    }

    for r in cell.references.as_slice() {
        writer
            .write(8 * ref_size_bytes, *r as u32)
            .map_boc_serialization_error()?;
    }

    Ok(())
}

fn read_var_size(
    reader: &mut ByteReader<Cursor<&[u8]>, BigEndian>,
    n: u8,
) -> Result<usize, TonCellError> {
    let bytes = reader
        .read_to_vec(n.into())
        .map_boc_deserialization_error()?;

    let mut result = 0;
    for &byte in &bytes {
        result <<= 8;
        result |= usize::from(byte);
    }
    Ok(result)
}
