use std::sync::Arc;

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::cell::dict::Dictionary;
use crate::cell::error::{MapTonCellError, TonCellError};
use crate::cell::{ArcCell, Cell, CellParser};
use crate::tlb_types::tlb::TLB;
use crate::TonAddress;

pub const MAX_CELL_BITS: usize = 1023;
pub const MAX_CELL_REFERENCES: usize = 4;
/// Largest chunk of a snake byte string held by a single cell.
pub const SNAKE_CHUNK_BYTES: usize = 127;
/// `VarUInteger 16`: the 4-bit length prefix limits coins to 15 bytes.
pub const MAX_COINS_BYTES: usize = 15;

/// Appends fields to a cell under construction.
///
/// Every store checks the remaining capacity first, so a failed store leaves the builder unchanged.
pub struct CellBuilder {
    bit_writer: BitWriter<Vec<u8>, BigEndian>,
    bits_to_write: usize,
    references: Vec<ArcCell>,
}

#[derive(Clone, Debug, PartialEq, Copy)]
pub enum EitherCellLayout {
    Native,
    ToRef,
    ToCell,
}

impl CellBuilder {
    pub fn new() -> CellBuilder {
        let bit_writer = BitWriter::endian(Vec::new(), BigEndian);
        CellBuilder {
            bit_writer,
            bits_to_write: 0,
            references: Vec::new(),
        }
    }

    pub fn store_bit(&mut self, val: bool) -> Result<&mut Self, TonCellError> {
        self.ensure_bits_capacity(1)?;
        self.bit_writer.write_bit(val).map_cell_builder_error()?;
        self.bits_to_write += 1;
        Ok(self)
    }

    pub fn store_u8(&mut self, bit_len: usize, val: u8) -> Result<&mut Self, TonCellError> {
        self.store_u64(bit_len, val as u64)
    }

    pub fn store_i8(&mut self, bit_len: usize, val: i8) -> Result<&mut Self, TonCellError> {
        self.store_i64(bit_len, val as i64)
    }

    pub fn store_u16(&mut self, bit_len: usize, val: u16) -> Result<&mut Self, TonCellError> {
        self.store_u64(bit_len, val as u64)
    }

    pub fn store_u32(&mut self, bit_len: usize, val: u32) -> Result<&mut Self, TonCellError> {
        self.store_u64(bit_len, val as u64)
    }

    pub fn store_i32(&mut self, bit_len: usize, val: i32) -> Result<&mut Self, TonCellError> {
        self.store_i64(bit_len, val as i64)
    }

    pub fn store_u64(&mut self, bit_len: usize, val: u64) -> Result<&mut Self, TonCellError> {
        if bit_len > 64 {
            return self.store_uint(bit_len, &BigUint::from(val));
        }
        if bit_len < 64 && val >> bit_len != 0 {
            return Err(TonCellError::Overflow(format!(
                "Value {val} doesn't fit in {bit_len} bits"
            )));
        }
        self.ensure_bits_capacity(bit_len)?;
        if bit_len > 0 {
            self.bit_writer
                .write(bit_len as u32, val)
                .map_cell_builder_error()?;
        }
        self.bits_to_write += bit_len;
        Ok(self)
    }

    pub fn store_i64(&mut self, bit_len: usize, val: i64) -> Result<&mut Self, TonCellError> {
        if bit_len > 64 {
            return self.store_int(bit_len, &BigInt::from(val));
        }
        let fits = match bit_len {
            0 => val == 0,
            64 => true,
            _ => {
                let bound = 1i64 << (bit_len - 1);
                (-bound..bound).contains(&val)
            }
        };
        if !fits {
            return Err(TonCellError::Overflow(format!(
                "Value {val} doesn't fit in {bit_len} signed bits"
            )));
        }
        let mask = if bit_len == 64 {
            u64::MAX
        } else {
            (1u64 << bit_len) - 1
        };
        self.store_u64(bit_len, val as u64 & mask)
    }

    pub fn store_uint(&mut self, bit_len: usize, val: &BigUint) -> Result<&mut Self, TonCellError> {
        let value_bits = val.bits() as usize;
        if value_bits > bit_len {
            return Err(TonCellError::Overflow(format!(
                "Value {val} doesn't fit in {bit_len} bits (takes {value_bits} bits)"
            )));
        }
        self.ensure_bits_capacity(bit_len)?;
        if bit_len == 0 {
            return Ok(self);
        }

        let value_bytes = val.to_bytes_be();
        let bytes_bits = value_bytes.len() * 8;
        if bit_len >= bytes_bits {
            self.write_zeros(bit_len - bytes_bits)?;
            self.bit_writer
                .write_bytes(&value_bytes)
                .map_cell_builder_error()?;
        } else {
            // the leading byte carries unused high zero bits
            let first_byte_bits = 8 - (bytes_bits - bit_len);
            self.bit_writer
                .write(first_byte_bits as u32, value_bytes[0])
                .map_cell_builder_error()?;
            self.bit_writer
                .write_bytes(&value_bytes[1..])
                .map_cell_builder_error()?;
        }
        self.bits_to_write += bit_len;
        Ok(self)
    }

    /// Stores `val` as a two's complement integer of exactly `bit_len` bits.
    pub fn store_int(&mut self, bit_len: usize, val: &BigInt) -> Result<&mut Self, TonCellError> {
        let overflow = || {
            TonCellError::Overflow(format!("Value {val} doesn't fit in {bit_len} signed bits"))
        };
        if bit_len == 0 {
            return if val.is_zero() {
                Ok(self)
            } else {
                Err(overflow())
            };
        }
        let bound = BigInt::one() << (bit_len - 1);
        if val >= &bound || val < &-&bound {
            return Err(overflow());
        }
        let unsigned = match val.sign() {
            Sign::Minus => (BigInt::one() << bit_len) + val,
            _ => val.clone(),
        };
        let unsigned = unsigned.to_biguint().ok_or_else(overflow)?;
        self.store_uint(bit_len, &unsigned)
    }

    pub fn store_byte(&mut self, val: u8) -> Result<&mut Self, TonCellError> {
        self.store_u8(8, val)
    }

    pub fn store_slice(&mut self, slice: &[u8]) -> Result<&mut Self, TonCellError> {
        self.ensure_bits_capacity(slice.len() * 8)?;
        self.bit_writer
            .write_bytes(slice)
            .map_cell_builder_error()?;
        self.bits_to_write += slice.len() * 8;
        Ok(self)
    }

    pub fn store_bits(&mut self, bit_len: usize, slice: &[u8]) -> Result<&mut Self, TonCellError> {
        if slice.len() * 8 < bit_len {
            return Err(TonCellError::InvalidInput(format!(
                "{} bits requested from a {} byte buffer",
                bit_len,
                slice.len()
            )));
        }
        self.ensure_bits_capacity(bit_len)?;
        let full_bytes = bit_len / 8;
        self.store_slice(&slice[0..full_bytes])?;
        let last_byte_len = bit_len % 8;
        if last_byte_len != 0 {
            let last_byte = slice[full_bytes] >> (8 - last_byte_len);
            self.store_u8(last_byte_len, last_byte)?;
        }
        Ok(self)
    }

    pub fn store_string(&mut self, val: &str) -> Result<&mut Self, TonCellError> {
        self.store_slice(val.as_bytes())
    }

    pub fn store_coins(&mut self, val: &BigUint) -> Result<&mut Self, TonCellError> {
        let num_bytes = (val.bits() as usize).div_ceil(8);
        if num_bytes > MAX_COINS_BYTES {
            return Err(TonCellError::Overflow(format!(
                "Coins value {val} takes {num_bytes} bytes, at most {MAX_COINS_BYTES} allowed"
            )));
        }
        self.ensure_bits_capacity(4 + num_bytes * 8)?;
        self.store_u8(4, num_bytes as u8)?;
        self.store_uint(num_bytes * 8, val)
    }

    /// Stores `addr_std$10 anycast:(Maybe Anycast) workchain_id:int8 address:bits256`.
    pub fn store_address(&mut self, val: &TonAddress) -> Result<&mut Self, TonCellError> {
        let workchain = i8::try_from(val.workchain).map_err(|_| {
            TonCellError::MalformedAddress(format!(
                "Workchain {} doesn't fit in 8 bits",
                val.workchain
            ))
        })?;
        self.ensure_bits_capacity(2 + 1 + 8 + 256)?;
        self.store_u8(2, 0b10u8)?;
        self.store_bit(false)?;
        self.store_i8(8, workchain)?;
        self.store_slice(&val.hash_part)?;
        Ok(self)
    }

    /// Stores `addr_none$00` for `None`, the standard address otherwise.
    pub fn store_address_opt(&mut self, val: Option<&TonAddress>) -> Result<&mut Self, TonCellError> {
        match val {
            Some(addr) => self.store_address(addr),
            None => self.store_u8(2, 0),
        }
    }

    /// Adds reference to an existing `Cell`.
    ///
    /// The reference is passed as `ArcCell` so it might be references from other cells.
    pub fn store_reference(&mut self, cell: &ArcCell) -> Result<&mut Self, TonCellError> {
        self.ensure_refs_capacity(1)?;
        self.references.push(cell.clone());
        Ok(self)
    }

    pub fn store_references(&mut self, refs: &[ArcCell]) -> Result<&mut Self, TonCellError> {
        self.ensure_refs_capacity(refs.len())?;
        for r in refs {
            self.store_reference(r)?;
        }
        Ok(self)
    }

    /// Adds a reference to a newly constructed `Cell`.
    ///
    /// The cell is wrapped it the `Arc`.
    pub fn store_child(&mut self, cell: Cell) -> Result<&mut Self, TonCellError> {
        self.store_reference(&Arc::new(cell))
    }

    /// Copies the unread bits of `parser`, references are not copied.
    pub fn store_remaining_bits(
        &mut self,
        parser: &mut CellParser,
    ) -> Result<&mut Self, TonCellError> {
        let num_bits = parser.remaining_bits();
        let bits = parser.load_bits(num_bits)?;
        self.store_bits(num_bits, &bits)
    }

    pub fn store_cell_data(&mut self, cell: &Cell) -> Result<&mut Self, TonCellError> {
        self.store_bits(cell.bit_len(), cell.data())
    }

    /// Inlines both data and references of `cell`.
    pub fn store_cell(&mut self, cell: &Cell) -> Result<&mut Self, TonCellError> {
        self.ensure_bits_capacity(cell.bit_len())?;
        self.ensure_refs_capacity(cell.references().len())?;
        self.store_cell_data(cell)?;
        self.store_references(cell.references())?;
        Ok(self)
    }

    // https://docs.ton.org/develop/data-formats/tl-b-types#either
    pub fn store_either_cell_or_cell_ref(
        &mut self,
        cell: &ArcCell,
        layout: EitherCellLayout,
    ) -> Result<&mut Self, TonCellError> {
        match layout {
            EitherCellLayout::Native => {
                let fits_inline = cell.bit_len() < self.remaining_bits()
                    && cell.references().len() <= self.remaining_refs();
                if fits_inline {
                    self.store_bit(false)?;
                    self.store_cell(cell)?;
                } else {
                    self.store_bit(true)?;
                    self.store_reference(cell)?;
                }
            }
            EitherCellLayout::ToRef => {
                self.ensure_refs_capacity(1)?;
                self.store_bit(true)?;
                self.store_reference(cell)?;
            }
            EitherCellLayout::ToCell => {
                self.ensure_bits_capacity(cell.bit_len() + 1)?;
                self.store_bit(false)?;
                self.store_cell(cell)?;
            }
        }

        Ok(self)
    }

    // https://docs.ton.org/develop/data-formats/tl-b-types#maybe
    pub fn store_maybe_cell_ref(
        &mut self,
        maybe_cell: &Option<ArcCell>,
    ) -> Result<&mut Self, TonCellError> {
        if let Some(cell) = maybe_cell {
            self.ensure_refs_capacity(1)?;
            self.store_bit(true)?;
            self.store_reference(cell)?;
        } else {
            self.store_bit(false)?;
        }

        Ok(self)
    }

    /// Stores `HashmapE`: a single zero bit for an empty dictionary, a bit and a reference to the
    /// root otherwise.
    pub fn store_dict(&mut self, dict: &Dictionary) -> Result<&mut Self, TonCellError> {
        let root = dict.as_cell()?;
        self.store_maybe_cell_ref(&root)
    }

    /// Stores bytes as a snake string: as many whole bytes as fit here, the rest in a chain of
    /// cells holding up to 127 bytes each, every cell linked to the next through its first ref.
    pub fn store_snake_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, TonCellError> {
        let head_len = (self.remaining_bits() / 8)
            .min(SNAKE_CHUNK_BYTES)
            .min(bytes.len());
        let (head, tail) = bytes.split_at(head_len);
        if !tail.is_empty() {
            self.ensure_refs_capacity(1)?;
        }

        let mut next: Option<ArcCell> = None;
        for chunk in tail.chunks(SNAKE_CHUNK_BYTES).rev() {
            let mut builder = CellBuilder::new();
            builder.store_slice(chunk)?;
            if let Some(next_cell) = &next {
                builder.store_reference(next_cell)?;
            }
            next = Some(builder.build()?.to_arc());
        }

        self.store_slice(head)?;
        if let Some(chain) = next {
            self.store_reference(&chain)?;
        }
        Ok(self)
    }

    pub fn store_tlb<T: TLB>(&mut self, value: &T) -> Result<&mut Self, TonCellError> {
        value.write(self)?;
        Ok(self)
    }

    pub fn remaining_bits(&self) -> usize {
        MAX_CELL_BITS - self.bits_to_write
    }

    pub fn remaining_refs(&self) -> usize {
        MAX_CELL_REFERENCES - self.references.len()
    }

    /// Builds the cell from the bits and references stored so far.
    ///
    /// The builder keeps its state, so further stores continue right after the last stored bit.
    pub fn build(&mut self) -> Result<Cell, TonCellError> {
        let data = self.padded_data()?;
        Cell::new(data, self.bits_to_write, self.references.clone())
    }

    fn padded_data(&mut self) -> Result<Vec<u8>, TonCellError> {
        let tail_bits = (self.bits_to_write % 8) as u32;
        while !self.bit_writer.byte_aligned() {
            self.bit_writer.write_bit(false).map_cell_builder_error()?;
        }
        let data = self
            .bit_writer
            .writer()
            .ok_or_else(|| TonCellError::cell_builder_error("Stream is not byte-aligned"))?
            .clone();
        if tail_bits > 0 {
            // drop the padding again: rewrite the stream up to the last stored bit
            let (last, whole) = data
                .split_last()
                .ok_or_else(|| TonCellError::cell_builder_error("Missing trailing byte"))?;
            let mut restored = BitWriter::endian(Vec::with_capacity(data.len()), BigEndian);
            restored.write_bytes(whole).map_cell_builder_error()?;
            restored
                .write(tail_bits, last >> (8 - tail_bits))
                .map_cell_builder_error()?;
            self.bit_writer = restored;
        }
        Ok(data)
    }

    fn write_zeros(&mut self, mut bit_len: usize) -> Result<(), TonCellError> {
        while bit_len > 0 {
            let chunk = bit_len.min(32);
            self.bit_writer
                .write(chunk as u32, 0u32)
                .map_cell_builder_error()?;
            bit_len -= chunk;
        }
        Ok(())
    }

    fn ensure_bits_capacity(&self, bit_len: usize) -> Result<(), TonCellError> {
        if bit_len > self.remaining_bits() {
            return Err(TonCellError::CellOverflow {
                unit: "bits",
                requested: bit_len,
                available: self.remaining_bits(),
            });
        }
        Ok(())
    }

    fn ensure_refs_capacity(&self, refs: usize) -> Result<(), TonCellError> {
        if refs > self.remaining_refs() {
            return Err(TonCellError::CellOverflow {
                unit: "references",
                requested: refs,
                available: self.remaining_refs(),
            });
        }
        Ok(())
    }
}

impl Default for CellBuilder {
    fn default() -> Self {
        Self::new()
    }
}
