use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::leading_bit_utils::{
    add_leading_bit, all_bits_same, common_prefix_len, label_len_width, remove_leading_bit,
};
use super::types::LabelType;
use crate::cell::{ArcCell, Cell, CellBuilder, TonCellError};

/// Serializes sorted entries into the canonical `Hashmap n X` trie.
///
/// Forks carry both subtrees as references (left = 0, right = 1), leaves carry the value cell
/// inline right after the label.
pub(crate) struct DictBuilder<'a> {
    // keys contain 1 extra leading bit set to 1
    entries: Vec<(BigUint, &'a ArcCell)>,
    key_len_bits_left: usize,
}

impl<'a> DictBuilder<'a> {
    pub(crate) fn new(key_len_bits: usize, data: &'a BTreeMap<BigUint, ArcCell>) -> Self {
        // BTreeMap order of plain keys is the order of keys with the leading bit
        let entries = data
            .iter()
            .map(|(key, value)| (add_leading_bit(key, key_len_bits), value))
            .collect();
        DictBuilder {
            entries,
            key_len_bits_left: key_len_bits,
        }
    }

    pub(crate) fn build(mut self) -> Result<Cell, TonCellError> {
        let mut builder = CellBuilder::new();
        if self.entries.is_empty() {
            return builder.build();
        }
        let keys = self
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .enumerate()
            .collect();
        self.fill_cell(&mut builder, keys)?;
        builder.build()
    }

    // keys: Vec<(original_key_position, remaining_key_part)>
    fn fill_cell(
        &mut self,
        builder: &mut CellBuilder,
        keys: Vec<(usize, BigUint)>,
    ) -> Result<(), TonCellError> {
        let (first, last) = match (keys.first(), keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TonCellError::dict_error("Empty subtree")),
        };
        if keys.len() == 1 {
            let (orig_key_pos, remaining_key) = first;
            self.store_label(builder, remaining_key)?;
            let value = self.entries[*orig_key_pos].1;
            builder.store_cell(value)?;
            return Ok(());
        }

        // will restore it at the end
        let key_len_bits_left_original = self.key_len_bits_left;

        let key = &first.1;
        let key_len = key.bits() as usize; // includes leading bit

        let common_prefix_len = common_prefix_len(key, &last.1);
        let label = key >> (key_len - common_prefix_len - 1);
        self.store_label(builder, &label)?;

        let mut left_keys = Vec::with_capacity(keys.len() / 2);
        let mut right_keys = Vec::with_capacity(keys.len() / 2);

        // the first bit after the common prefix selects the branch
        let new_key_len = key_len - common_prefix_len - 1;
        let new_key_mask = (BigUint::one() << new_key_len) - 1u32;
        for (pos, key) in keys {
            let new_key = key & &new_key_mask;
            let is_right = new_key.bits() as usize == new_key_len;
            let new_key_internal = add_leading_bit(&new_key, new_key_len - 1);
            if is_right {
                right_keys.push((pos, new_key_internal));
            } else {
                left_keys.push((pos, new_key_internal));
            }
        }

        self.key_len_bits_left -= common_prefix_len + 1;
        let mut left_builder = CellBuilder::new();
        self.fill_cell(&mut left_builder, left_keys)?;
        builder.store_child(left_builder.build()?)?;

        let mut right_builder = CellBuilder::new();
        self.fill_cell(&mut right_builder, right_keys)?;
        builder.store_child(right_builder.build()?)?;

        self.key_len_bits_left = key_len_bits_left_original;
        Ok(())
    }

    // expect label with leading one
    fn store_label(&self, builder: &mut CellBuilder, label: &BigUint) -> Result<(), TonCellError> {
        if label.is_zero() {
            return Err(TonCellError::dict_error("Label without leading bit"));
        }
        if label.is_one() {
            // it's leading bit => label_type == short, len == 0 => store [false, false]
            builder.store_u8(2, 0)?;
            return Ok(());
        }

        let label_len = label.bits() as usize - 1;
        let label_len_len = label_len_width(self.key_len_bits_left);
        let fair_label = remove_leading_bit(label);
        let same_label_len = if all_bits_same(label) {
            3 + label_len_len
        } else {
            usize::MAX
        };
        let short_label_len = 2 + label_len * 2;
        let long_label_len = 2 + label_len_len + label_len;

        let mut label_type = LabelType::Short;
        if long_label_len < short_label_len {
            label_type = LabelType::Long;
        }
        if same_label_len < short_label_len {
            label_type = LabelType::Same;
        }
        match label_type {
            LabelType::Same => {
                builder.store_u8(2, 0b11)?;
                builder.store_bit(!fair_label.is_zero())?;
                builder.store_u64(label_len_len, label_len as u64)?;
            }
            LabelType::Short => {
                builder.store_bit(false)?;
                for _ in 0..label_len {
                    builder.store_bit(true)?;
                }
                builder.store_bit(false)?;
                builder.store_uint(label_len, &fair_label)?;
            }
            LabelType::Long => {
                builder.store_u8(2, 0b10)?;
                builder.store_u64(label_len_len, label_len as u64)?;
                builder.store_uint(label_len, &fair_label)?;
            }
        }
        Ok(())
    }
}
