use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::One;

use super::leading_bit_utils::label_len_width;
use super::types::LabelType;
use crate::cell::{ArcCell, CellParser, TonCellError};

/// Walks a `Hashmap n X` trie collecting `(key, value)` pairs.
///
/// Structural problems are reported as `MalformedDictionary`.
pub(crate) struct DictParser {
    key_len_bits: usize,
    cur_key_prefix: BigUint, // store leading 1 to determinate len properly
}

impl DictParser {
    pub(crate) fn new(key_len_bits: usize) -> DictParser {
        DictParser {
            key_len_bits,
            cur_key_prefix: BigUint::one(),
        }
    }

    pub(crate) fn parse(
        &mut self,
        parser: &mut CellParser,
    ) -> Result<BTreeMap<BigUint, ArcCell>, TonCellError> {
        // reset state in case of reusing
        self.cur_key_prefix = BigUint::one();

        let mut result = BTreeMap::new();
        self.parse_impl(parser, &mut result)?;
        Ok(result)
    }

    fn parse_impl(
        &mut self,
        parser: &mut CellParser,
        dst: &mut BTreeMap<BigUint, ArcCell>,
    ) -> Result<(), TonCellError> {
        // will rollback prefix to original value at the end of the function
        let origin_key_prefix_len = self.cur_key_prefix.bits();
        let bits_left = self.key_len_bits + 1 - origin_key_prefix_len as usize;

        let label_type = detect_label_type(parser)?;
        match label_type {
            LabelType::Same => {
                let prefix_val = parser.load_bit().map_err(TonCellError::dict_error)?;
                let prefix_len = self.load_label_len(parser, bits_left)?;
                if prefix_val {
                    self.cur_key_prefix += 1u32;
                    self.cur_key_prefix <<= prefix_len;
                    self.cur_key_prefix -= 1u32;
                } else {
                    self.cur_key_prefix <<= prefix_len;
                }
            }
            LabelType::Short => {
                let prefix_len = parser
                    .load_unary_length()
                    .map_err(TonCellError::dict_error)?;
                ensure_label_fits(prefix_len, bits_left)?;
                let val = parser
                    .load_uint(prefix_len)
                    .map_err(TonCellError::dict_error)?;
                self.cur_key_prefix <<= prefix_len;
                self.cur_key_prefix |= val;
            }
            LabelType::Long => {
                let prefix_len = self.load_label_len(parser, bits_left)?;
                let val = parser
                    .load_uint(prefix_len)
                    .map_err(TonCellError::dict_error)?;
                self.cur_key_prefix <<= prefix_len;
                self.cur_key_prefix |= val;
            }
        }
        if self.cur_key_prefix.bits() as usize == self.key_len_bits + 1 {
            let mut key = BigUint::one() << self.key_len_bits;
            key ^= &self.cur_key_prefix;
            let value = parser.load_remaining()?.to_arc();
            dst.insert(key, value);
        } else {
            if parser.remaining_refs() < 2 {
                return Err(TonCellError::dict_error(format!(
                    "Fork node must have 2 references, got {}",
                    parser.remaining_refs()
                )));
            }
            let left_ref = parser.next_reference()?;
            self.cur_key_prefix <<= 1;
            self.parse_impl(&mut left_ref.parser(), dst)?;

            let right_ref = parser.next_reference()?;
            self.cur_key_prefix += BigUint::one();
            self.parse_impl(&mut right_ref.parser(), dst)?;
            // a fork holds its label and the two branches, nothing else
            parser.ensure_empty().map_err(TonCellError::dict_error)?;
        }
        self.cur_key_prefix >>= self.cur_key_prefix.bits() - origin_key_prefix_len;
        Ok(())
    }

    fn load_label_len(
        &self,
        parser: &mut CellParser,
        bits_left: usize,
    ) -> Result<usize, TonCellError> {
        let len = parser
            .load_u64(label_len_width(bits_left))
            .map_err(TonCellError::dict_error)? as usize;
        ensure_label_fits(len, bits_left)?;
        Ok(len)
    }
}

fn detect_label_type(parser: &mut CellParser) -> Result<LabelType, TonCellError> {
    let label = if parser.load_bit().map_err(TonCellError::dict_error)? {
        if parser.load_bit().map_err(TonCellError::dict_error)? {
            LabelType::Same
        } else {
            LabelType::Long
        }
    } else {
        LabelType::Short
    };
    Ok(label)
}

fn ensure_label_fits(label_len: usize, bits_left: usize) -> Result<(), TonCellError> {
    if label_len > bits_left {
        return Err(TonCellError::dict_error(format!(
            "Label of {label_len} bits exceeds {bits_left} remaining key bits"
        )));
    }
    Ok(())
}
