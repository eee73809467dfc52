use std::io;

use bitstream_io::{BitRead, BitReader, Endianness};

use crate::cell::{MapTonCellError, TonCellError};

pub trait BitReadExt {
    fn read_bits(&mut self, num_bits: usize, slice: &mut [u8]) -> Result<(), TonCellError>;
}

impl<R: io::Read, E: Endianness> BitReadExt for BitReader<R, E> {
    fn read_bits(&mut self, num_bits: usize, slice: &mut [u8]) -> Result<(), TonCellError> {
        let total_bytes = num_bits.div_ceil(8);
        if total_bytes > slice.len() {
            return Err(TonCellError::InternalError(format!(
                "Attempt to read {} bits into buffer {} bytes",
                num_bits,
                slice.len()
            )));
        }
        let full_bytes = num_bits / 8;
        self.read_bytes(&mut slice[0..full_bytes])
            .map_cell_parser_error()?;
        let last_byte_len = num_bits % 8;
        if last_byte_len != 0 {
            let last_byte = self
                .read::<u8>(last_byte_len as u32)
                .map_cell_parser_error()?;
            slice[full_bytes] = last_byte << (8 - last_byte_len);
        }
        Ok(())
    }
}

/// Copies `len` bits from `src` starting at `src_offset_bits` into `dst` at `dst_offset_bits`.
///
/// Returns false if either buffer is too short.
pub fn rewrite_bits(
    src: &[u8],
    src_offset_bits: usize,
    dst: &mut [u8],
    dst_offset_bits: usize,
    len: usize,
) -> bool {
    if src_offset_bits + len > src.len() * 8 || dst_offset_bits + len > dst.len() * 8 {
        return false;
    }

    for i in 0..len {
        let src_pos = src_offset_bits + i;
        let bit = (src[src_pos / 8] >> (7 - src_pos % 8)) & 1;

        let dst_pos = dst_offset_bits + i;
        let dst_shift = 7 - dst_pos % 8;
        dst[dst_pos / 8] &= !(1 << dst_shift);
        dst[dst_pos / 8] |= bit << dst_shift;
    }

    true
}

#[cfg(test)]
mod tests {
    use crate::cell::rewrite_bits;

    #[test]
    fn test_rewrite_bits() {
        let src = vec![0b11001100, 0b10101010];
        let mut dst = vec![0b00000000, 0b00000000];
        assert!(rewrite_bits(&src, 4, &mut dst, 8, 8));
        assert_eq!(dst, vec![0b00000000, 0b11001010]);

        let mut dst = vec![0b00000000, 0b00000000];
        assert!(rewrite_bits(&src, 0, &mut dst, 0, 16));
        assert_eq!(dst, src);

        let mut dst = vec![0b00000000, 0b00000000];
        assert!(rewrite_bits(&src, 0, &mut dst, 3, 5));
        assert_eq!(dst[0], 0b00011001);

        assert!(!rewrite_bits(&src, 14, &mut dst, 6, 10));
    }
}
