use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};
use num_bigint::{BigInt, BigUint};
use num_traits::identities::Zero;
use num_traits::One;

use crate::cell::dict::Dictionary;
use crate::cell::util::*;
use crate::cell::{ArcCell, Cell, CellBuilder, MapTonCellError, TonCellError};
use crate::tlb_types::tlb::TLB;
use crate::TonAddress;

/// Sequential reader over the data bits and references of a cell.
pub struct CellParser<'a> {
    pub(crate) bit_len: usize,
    pub(crate) bit_reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    references: &'a [ArcCell],
    next_ref: usize,
}

impl<'a> CellParser<'a> {
    pub fn new(bit_len: usize, data: &'a [u8], references: &'a [ArcCell]) -> CellParser<'a> {
        CellParser {
            bit_len,
            bit_reader: BitReader::endian(Cursor::new(data), BigEndian),
            references,
            next_ref: 0,
        }
    }

    pub fn remaining_bits(&mut self) -> usize {
        let pos = self.bit_reader.position_in_bits().unwrap_or_default() as usize;
        self.bit_len.saturating_sub(pos)
    }

    /// Return number of full bytes remaining
    pub fn remaining_bytes(&mut self) -> usize {
        self.remaining_bits() / 8
    }

    pub fn remaining_refs(&self) -> usize {
        self.references.len() - self.next_ref
    }

    pub fn load_bit(&mut self) -> Result<bool, TonCellError> {
        self.ensure_enough_bits(1)?;
        self.bit_reader.read_bit().map_cell_parser_error()
    }

    pub fn load_u8(&mut self, bit_len: usize) -> Result<u8, TonCellError> {
        ensure_width(bit_len, 8)?;
        Ok(self.load_u64(bit_len)? as u8)
    }

    pub fn load_i8(&mut self, bit_len: usize) -> Result<i8, TonCellError> {
        ensure_width(bit_len, 8)?;
        Ok(self.load_i64(bit_len)? as i8)
    }

    pub fn load_u16(&mut self, bit_len: usize) -> Result<u16, TonCellError> {
        ensure_width(bit_len, 16)?;
        Ok(self.load_u64(bit_len)? as u16)
    }

    pub fn load_i16(&mut self, bit_len: usize) -> Result<i16, TonCellError> {
        ensure_width(bit_len, 16)?;
        Ok(self.load_i64(bit_len)? as i16)
    }

    pub fn load_u32(&mut self, bit_len: usize) -> Result<u32, TonCellError> {
        ensure_width(bit_len, 32)?;
        Ok(self.load_u64(bit_len)? as u32)
    }

    pub fn load_i32(&mut self, bit_len: usize) -> Result<i32, TonCellError> {
        ensure_width(bit_len, 32)?;
        Ok(self.load_i64(bit_len)? as i32)
    }

    pub fn load_u64(&mut self, bit_len: usize) -> Result<u64, TonCellError> {
        ensure_width(bit_len, 64)?;
        if bit_len == 0 {
            return Ok(0);
        }
        self.ensure_enough_bits(bit_len)?;
        self.bit_reader
            .read::<u64>(bit_len as u32)
            .map_cell_parser_error()
    }

    /// Reads a two's complement integer of `bit_len` bits.
    pub fn load_i64(&mut self, bit_len: usize) -> Result<i64, TonCellError> {
        let raw = self.load_u64(bit_len)?;
        if bit_len == 0 || bit_len == 64 || raw >> (bit_len - 1) == 0 {
            Ok(raw as i64)
        } else {
            Ok((raw | (u64::MAX << bit_len)) as i64)
        }
    }

    pub fn load_uint(&mut self, bit_len: usize) -> Result<BigUint, TonCellError> {
        if bit_len == 0 {
            return Ok(BigUint::zero());
        }
        let bytes = self.load_bits(bit_len)?;
        let padding = bytes.len() * 8 - bit_len;
        Ok(BigUint::from_bytes_be(&bytes) >> padding)
    }

    pub fn load_int(&mut self, bit_len: usize) -> Result<BigInt, TonCellError> {
        let unsigned = BigInt::from(self.load_uint(bit_len)?);
        if bit_len > 0 && unsigned.bit((bit_len - 1) as u64) {
            Ok(unsigned - (BigInt::one() << bit_len))
        } else {
            Ok(unsigned)
        }
    }

    pub fn load_byte(&mut self) -> Result<u8, TonCellError> {
        self.load_u8(8)
    }

    pub fn load_slice(&mut self, slice: &mut [u8]) -> Result<(), TonCellError> {
        self.ensure_enough_bits(slice.len() * 8)?;
        self.bit_reader.read_bytes(slice).map_cell_parser_error()
    }

    pub fn load_bytes(&mut self, num_bytes: usize) -> Result<Vec<u8>, TonCellError> {
        let mut res = vec![0_u8; num_bytes];
        self.load_slice(res.as_mut_slice())?;
        Ok(res)
    }

    pub fn load_bits_to_slice(
        &mut self,
        num_bits: usize,
        slice: &mut [u8],
    ) -> Result<(), TonCellError> {
        self.ensure_enough_bits(num_bits)?;
        self.bit_reader.read_bits(num_bits, slice)?;
        Ok(())
    }

    pub fn load_bits(&mut self, num_bits: usize) -> Result<Vec<u8>, TonCellError> {
        let mut res = vec![0_u8; num_bits.div_ceil(8)];
        self.load_bits_to_slice(num_bits, res.as_mut_slice())?;
        Ok(res)
    }

    pub fn load_utf8(&mut self, num_bytes: usize) -> Result<String, TonCellError> {
        let bytes = self.load_bytes(num_bytes)?;
        String::from_utf8(bytes).map_err(|e| TonCellError::InvalidInput(e.to_string()))
    }

    pub fn load_coins(&mut self) -> Result<BigUint, TonCellError> {
        let num_bytes = self.load_u8(4)? as usize;
        self.load_uint(num_bytes * 8)
    }

    /// Reads `addr_std` without anycast.
    ///
    /// `addr_none`, external and variable-length addresses are rejected with `MalformedAddress`.
    pub fn load_address(&mut self) -> Result<TonAddress, TonCellError> {
        self.load_address_opt()?.ok_or_else(|| {
            TonCellError::MalformedAddress("addr_none where a standard address is required".into())
        })
    }

    /// Reads `addr_none` as `None` and `addr_std` as `Some`.
    pub fn load_address_opt(&mut self) -> Result<Option<TonAddress>, TonCellError> {
        let tag = self.load_u8(2)?;
        match tag {
            0b00 => Ok(None),
            0b10 => {
                if self.load_bit()? {
                    return Err(TonCellError::MalformedAddress(
                        "anycast addresses are not supported".into(),
                    ));
                }
                let workchain = self.load_i8(8)? as i32;
                let mut hash_part = [0_u8; 32];
                self.load_slice(&mut hash_part)?;
                Ok(Some(TonAddress::new(workchain, &hash_part)))
            }
            _ => Err(TonCellError::MalformedAddress(format!(
                "unsupported address tag {tag:#04b}"
            ))),
        }
    }

    pub fn load_unary_length(&mut self) -> Result<usize, TonCellError> {
        let mut res = 0;
        while self.load_bit()? {
            res += 1;
        }
        Ok(res)
    }

    pub fn next_reference(&mut self) -> Result<ArcCell, TonCellError> {
        let reference = self.references.get(self.next_ref).ok_or_else(|| {
            TonCellError::OutOfRange(format!(
                "reference {} requested, cell has {}",
                self.next_ref,
                self.references.len()
            ))
        })?;
        self.next_ref += 1;
        Ok(reference.clone())
    }

    // https://docs.ton.org/develop/data-formats/tl-b-types#maybe
    pub fn load_maybe_cell_ref(&mut self) -> Result<Option<ArcCell>, TonCellError> {
        if self.load_bit()? {
            Ok(Some(self.next_reference()?))
        } else {
            Ok(None)
        }
    }

    /// Reads `Either X ^X`: the remainder of this cell for the left branch, a reference for the
    /// right one.
    pub fn load_either_cell_or_cell_ref(&mut self) -> Result<ArcCell, TonCellError> {
        if self.load_bit()? {
            self.next_reference()
        } else {
            Ok(self.load_remaining()?.to_arc())
        }
    }

    /// Moves all unread bits and references into a new cell.
    pub fn load_remaining(&mut self) -> Result<Cell, TonCellError> {
        let mut builder = CellBuilder::new();
        builder.store_remaining_bits(self)?;
        while self.remaining_refs() > 0 {
            builder.store_reference(&self.next_reference()?)?;
        }
        builder.build()
    }

    /// Reads `HashmapE n X` with `n = key_len_bits`.
    pub fn load_dict(&mut self, key_len_bits: usize) -> Result<Dictionary, TonCellError> {
        match self.load_maybe_cell_ref()? {
            Some(root) => Dictionary::parse(&root, key_len_bits),
            None => Ok(Dictionary::new(key_len_bits)),
        }
    }

    /// Reads a snake byte string starting at the current position and following the first
    /// reference of every cell in the chain.
    pub fn load_snake_bytes(&mut self) -> Result<Vec<u8>, TonCellError> {
        let head_len = self.remaining_bytes();
        let mut result = self.load_bytes(head_len)?;
        let mut next = if self.remaining_refs() > 0 {
            Some(self.next_reference()?)
        } else {
            None
        };
        while let Some(cell) = next {
            let mut parser = cell.parser();
            let chunk_len = parser.remaining_bytes();
            let chunk = parser.load_bytes(chunk_len)?;
            result.extend_from_slice(&chunk);
            next = cell.references().first().cloned();
        }
        Ok(result)
    }

    pub fn load_tlb<T: TLB>(&mut self) -> Result<T, TonCellError> {
        T::read(self)
    }

    pub fn ensure_empty(&mut self) -> Result<(), TonCellError> {
        let remaining_bits = self.remaining_bits();
        let remaining_refs = self.remaining_refs();
        if remaining_bits == 0 && remaining_refs == 0 {
            Ok(())
        } else {
            Err(TonCellError::NonEmptyReader {
                remaining_bits,
                remaining_refs,
            })
        }
    }

    pub fn skip_bits(&mut self, num_bits: usize) -> Result<(), TonCellError> {
        self.ensure_enough_bits(num_bits)?;
        self.bit_reader
            .skip(num_bits as u32)
            .map_cell_parser_error()
    }

    fn ensure_enough_bits(&mut self, bit_len: usize) -> Result<(), TonCellError> {
        let remaining = self.remaining_bits();
        if remaining < bit_len {
            return Err(TonCellError::OutOfRange(format!(
                "{bit_len} bits requested, {remaining} remaining"
            )));
        }
        Ok(())
    }
}

fn ensure_width(bit_len: usize, max: usize) -> Result<(), TonCellError> {
    if bit_len > max {
        return Err(TonCellError::InvalidInput(format!(
            "{bit_len} bits don't fit into a {max}-bit integer"
        )));
    }
    Ok(())
}
