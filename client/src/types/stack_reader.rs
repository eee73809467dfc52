use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};
use tonplay_core::cell::ArcCell;
use tonplay_core::TonAddress;

use crate::types::{StackParseError, TvmStackEntry};

/// Sequential reader over a get-method result stack. Every read names the field, so errors
/// point at the offending position.
pub struct StackReader<'a> {
    entries: &'a [TvmStackEntry],
    index: usize,
}

impl<'a> StackReader<'a> {
    pub fn new(entries: &'a [TvmStackEntry]) -> StackReader<'a> {
        StackReader { entries, index: 0 }
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.index)
    }

    pub fn next_entry(&mut self, name: &str) -> Result<&'a TvmStackEntry, StackParseError> {
        let entry = self
            .entries
            .get(self.index)
            .ok_or_else(|| StackParseError::MissingEntry {
                index: self.index,
                name: name.to_string(),
            })?;
        self.index += 1;
        Ok(entry)
    }

    pub fn next_int(&mut self, name: &str) -> Result<BigInt, StackParseError> {
        let index = self.index;
        let entry = self.next_entry(name)?;
        entry
            .expect_int()
            .cloned()
            .map_err(|e| e.at(index, name))
    }

    pub fn next_biguint(&mut self, name: &str) -> Result<BigUint, StackParseError> {
        let index = self.index;
        let number = self.next_int(name)?;
        number
            .to_biguint()
            .ok_or_else(|| Self::overflow(index, name, &number))
    }

    pub fn next_u64(&mut self, name: &str) -> Result<u64, StackParseError> {
        let index = self.index;
        let number = self.next_int(name)?;
        number
            .to_u64()
            .ok_or_else(|| Self::overflow(index, name, &number))
    }

    pub fn next_u32(&mut self, name: &str) -> Result<u32, StackParseError> {
        let index = self.index;
        let number = self.next_int(name)?;
        number
            .to_u32()
            .ok_or_else(|| Self::overflow(index, name, &number))
    }

    /// TVM booleans: `0` is false, anything else (normally `-1`) is true.
    pub fn next_bool(&mut self, name: &str) -> Result<bool, StackParseError> {
        Ok(!self.next_int(name)?.is_zero())
    }

    pub fn next_address(&mut self, name: &str) -> Result<TonAddress, StackParseError> {
        let index = self.index;
        self.next_address_opt(name)?
            .ok_or_else(|| StackParseError::MissingAddress {
                index,
                name: name.to_string(),
            })
    }

    pub fn next_address_opt(&mut self, name: &str) -> Result<Option<TonAddress>, StackParseError> {
        let index = self.index;
        let entry = self.next_entry(name)?;
        entry.get_address_opt().map_err(|e| e.at(index, name))
    }

    pub fn next_cell(&mut self, name: &str) -> Result<ArcCell, StackParseError> {
        let index = self.index;
        let entry = self.next_entry(name)?;
        entry
            .expect_cell()
            .cloned()
            .map_err(|e| e.at(index, name))
    }

    /// Like [`StackReader::next_cell`], but an exhausted stack gives `None`.
    pub fn next_optional_cell(&mut self, name: &str) -> Result<Option<ArcCell>, StackParseError> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        self.next_cell(name).map(Some)
    }

    fn overflow(index: usize, name: &str, value: &BigInt) -> StackParseError {
        StackParseError::ValueOverflow {
            index,
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigInt;
    use tokio_test::assert_err;
    use tonplay_core::cell::{CellBuilder, CellSlice};
    use tonplay_core::TonAddress;

    use super::StackReader;
    use crate::types::{StackParseError, TvmStackEntry, TvmStackEntryKind};

    #[test]
    fn test_sequential_read() -> anyhow::Result<()> {
        let address = TonAddress::from_str("EQAd8QRKoA5sKcug9bwK6vMdmhSAoAxr8vvABvC1TCeTude5")?;
        let code = CellBuilder::new().store_u8(8, 1)?.build()?;
        let stack = vec![
            TvmStackEntry::from(12u64),
            TvmStackEntry::from(true),
            TvmStackEntry::try_from(&address)?,
            TvmStackEntry::from(code.clone()),
        ];

        let mut reader = StackReader::new(&stack);
        assert_eq!(reader.next_u32("round_num")?, 12);
        assert!(reader.next_bool("mintable")?);
        assert_eq!(reader.next_address("admin")?, address);
        assert_eq!(reader.next_cell("code")?.as_ref(), &code);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.next_optional_cell("extra")?, None);
        assert!(matches!(
            reader.next_u64("missing"),
            Err(StackParseError::MissingEntry { index: 4, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_errors_name_the_field() -> anyhow::Result<()> {
        let stack = vec![
            TvmStackEntry::from(BigInt::from(-5)),
            TvmStackEntry::from(BigInt::from(u64::MAX) + 1),
        ];

        let mut reader = StackReader::new(&stack);
        match reader.next_cell("wallet_code") {
            Err(StackParseError::TypeMismatch {
                index,
                name,
                expected,
                found,
            }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "wallet_code");
                assert_eq!(expected, TvmStackEntryKind::Cell);
                assert_eq!(found, TvmStackEntryKind::Int);
            }
            other => panic!("unexpected result {:?}", other),
        }

        assert_err!(reader.next_u64("supply"));

        let mut reader = StackReader::new(&stack);
        assert_err!(reader.next_biguint("negative"));
        Ok(())
    }

    #[test]
    fn test_addr_none() -> anyhow::Result<()> {
        let none = CellBuilder::new().store_u8(2, 0)?.build()?.to_arc();
        let stack = vec![
            TvmStackEntry::Slice(CellSlice::full_cell(none.clone())),
            TvmStackEntry::Slice(CellSlice::full_cell(none)),
        ];

        let mut reader = StackReader::new(&stack);
        assert_eq!(reader.next_address_opt("admin")?, None);
        match reader.next_address("owner") {
            Err(StackParseError::MissingAddress { index, name }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "owner");
            }
            other => panic!("unexpected result {:?}", other),
        }
        Ok(())
    }
}
