use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use num_bigint::BigUint;

use super::{DictBuilder, DictParser, KeyReader, ValReader, ValWriter};
use crate::cell::{ArcCell, CellBuilder, TonCellError};
use crate::TonHash;

/// Fixed-width dictionary key: a big-endian bit string of exactly `bit_len` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DictKey {
    bit_len: usize,
    value: BigUint,
}

impl DictKey {
    pub fn new(bit_len: usize, value: BigUint) -> Result<DictKey, TonCellError> {
        let value_bits = value.bits() as usize;
        if value_bits > bit_len {
            return Err(TonCellError::KeyLengthMismatch {
                expected: bit_len,
                actual: value_bits,
            });
        }
        Ok(DictKey { bit_len, value })
    }

    pub fn from_uint<T: Into<BigUint>>(bit_len: usize, value: T) -> Result<DictKey, TonCellError> {
        Self::new(bit_len, value.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> DictKey {
        DictKey {
            bit_len: bytes.len() * 8,
            value: BigUint::from_bytes_be(bytes),
        }
    }

    pub fn from_hash(hash: &TonHash) -> DictKey {
        Self::from_bytes(hash)
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Big-endian bytes, left-padded with zeros to `ceil(bit_len / 8)` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let byte_len = self.bit_len.div_ceil(8);
        let digits = self.value.to_bytes_be();
        if self.bit_len == 0 {
            return vec![];
        }
        let mut bytes = vec![0u8; byte_len.saturating_sub(digits.len())];
        bytes.extend_from_slice(&digits);
        bytes
    }
}

/// `HashmapE n ^Cell`-like map from `n`-bit keys to cells.
///
/// Entries are kept sorted; the trie is only materialized by [`Dictionary::as_cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    key_len_bits: usize,
    entries: BTreeMap<BigUint, ArcCell>,
}

impl Dictionary {
    pub fn new(key_len_bits: usize) -> Dictionary {
        Dictionary {
            key_len_bits,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a dictionary from typed entries, writing each value with `value_writer`.
    pub fn from_map<K, V>(
        key_len_bits: usize,
        data: impl IntoIterator<Item = (K, V)>,
        value_writer: ValWriter<V>,
    ) -> Result<Dictionary, TonCellError>
    where
        BigUint: From<K>,
    {
        let mut dict = Dictionary::new(key_len_bits);
        for (key, value) in data {
            let mut builder = CellBuilder::new();
            value_writer(&mut builder, value)?;
            dict.set_int_key(&BigUint::from(key), builder.build()?.to_arc())?;
        }
        Ok(dict)
    }

    pub fn key_len_bits(&self) -> usize {
        self.key_len_bits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or overwrites the value, returning the previous one.
    pub fn set(&mut self, key: DictKey, value: ArcCell) -> Result<Option<ArcCell>, TonCellError> {
        self.check_key(&key)?;
        Ok(self.entries.insert(key.value, value))
    }

    pub fn set_int_key(
        &mut self,
        key: &BigUint,
        value: ArcCell,
    ) -> Result<Option<ArcCell>, TonCellError> {
        let key = DictKey::new(self.key_len_bits, key.clone())?;
        self.set(key, value)
    }

    /// Looks the key up; a missing key is `Ok(None)`.
    pub fn get(&self, key: &DictKey) -> Result<Option<&ArcCell>, TonCellError> {
        self.check_key(key)?;
        Ok(self.entries.get(&key.value))
    }

    pub fn get_int_key(&self, key: &BigUint) -> Result<Option<&ArcCell>, TonCellError> {
        let key_bits = key.bits() as usize;
        if key_bits > self.key_len_bits {
            return Err(TonCellError::KeyLengthMismatch {
                expected: self.key_len_bits,
                actual: key_bits,
            });
        }
        Ok(self.entries.get(key))
    }

    pub fn remove(&mut self, key: &DictKey) -> Result<Option<ArcCell>, TonCellError> {
        self.check_key(key)?;
        Ok(self.entries.remove(&key.value))
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (DictKey, &ArcCell)> + '_ {
        self.entries.iter().map(|(key, value)| {
            (
                DictKey {
                    bit_len: self.key_len_bits,
                    value: key.clone(),
                },
                value,
            )
        })
    }

    /// Serializes the trie. An empty dictionary has no root cell.
    pub fn as_cell(&self) -> Result<Option<ArcCell>, TonCellError> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        let root = DictBuilder::new(self.key_len_bits, &self.entries).build()?;
        Ok(Some(root.to_arc()))
    }

    /// Parses a trie root cell (the referenced cell of a `HashmapE`, not the maybe bit).
    pub fn parse(root: &ArcCell, key_len_bits: usize) -> Result<Dictionary, TonCellError> {
        let mut parser = root.parser();
        let entries = DictParser::new(key_len_bits).parse(&mut parser)?;
        parser.ensure_empty().map_err(TonCellError::dict_error)?;
        Ok(Dictionary {
            key_len_bits,
            entries,
        })
    }

    /// Decodes every entry with the given key and value readers.
    pub fn to_map<K, V>(
        &self,
        key_reader: KeyReader<K>,
        val_reader: ValReader<V>,
    ) -> Result<HashMap<K, V>, TonCellError>
    where
        K: Eq + Hash,
    {
        self.entries
            .iter()
            .map(|(key, value)| {
                let mut parser = value.parser();
                Ok((key_reader(key)?, val_reader(&mut parser)?))
            })
            .collect()
    }

    fn check_key(&self, key: &DictKey) -> Result<(), TonCellError> {
        if key.bit_len != self.key_len_bits {
            return Err(TonCellError::KeyLengthMismatch {
                expected: self.key_len_bits,
                actual: key.bit_len,
            });
        }
        Ok(())
    }
}
