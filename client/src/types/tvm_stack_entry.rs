use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use strum::{Display, EnumDiscriminants};
use tonplay_core::cell::{ArcCell, Cell, CellBuilder, CellSlice};
use tonplay_core::TonAddress;

use crate::types::StackParseError;

/// Get-method stack value.
#[derive(Debug, Display, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(TvmStackEntryKind), derive(Display, Hash))]
pub enum TvmStackEntry {
    Int(BigInt),
    Slice(CellSlice),
    Cell(ArcCell),
}

impl TvmStackEntry {
    pub fn kind(&self) -> TvmStackEntryKind {
        self.into()
    }

    pub fn expect(&self, kind: TvmStackEntryKind) -> Result<&TvmStackEntry, StackParseError> {
        if self.kind() == kind {
            Ok(self)
        } else {
            Err(self.type_error(kind))
        }
    }

    pub fn expect_int(&self) -> Result<&BigInt, StackParseError> {
        match self {
            TvmStackEntry::Int(number) => Ok(number),
            t => Err(t.type_error(TvmStackEntryKind::Int)),
        }
    }

    pub fn expect_slice(&self) -> Result<&CellSlice, StackParseError> {
        match self {
            TvmStackEntry::Slice(slice) => Ok(slice),
            t => Err(t.type_error(TvmStackEntryKind::Slice)),
        }
    }

    pub fn expect_cell(&self) -> Result<&ArcCell, StackParseError> {
        match self {
            TvmStackEntry::Cell(cell) => Ok(cell),
            t => Err(t.type_error(TvmStackEntryKind::Cell)),
        }
    }

    /// Reads an address from a slice (or a cell) holding exactly one `MsgAddress`.
    /// `addr_none` gives `None`.
    pub fn get_address_opt(&self) -> Result<Option<TonAddress>, StackParseError> {
        let address = match self {
            TvmStackEntry::Slice(slice) => slice.parse_fully(|r| r.load_address_opt())?,
            TvmStackEntry::Cell(cell) => cell.parse_fully(|r| r.load_address_opt())?,
            t => return Err(t.type_error(TvmStackEntryKind::Slice)),
        };
        Ok(address)
    }

    fn type_error(&self, expected: TvmStackEntryKind) -> StackParseError {
        StackParseError::InvalidEntryType {
            expected,
            found: self.kind(),
        }
    }
}

impl From<bool> for TvmStackEntry {
    fn from(value: bool) -> Self {
        let i = if value { -1 } else { 0 };
        TvmStackEntry::Int(BigInt::from(i))
    }
}

impl From<u64> for TvmStackEntry {
    fn from(value: u64) -> Self {
        TvmStackEntry::Int(BigInt::from(value))
    }
}

impl From<BigInt> for TvmStackEntry {
    fn from(value: BigInt) -> Self {
        TvmStackEntry::Int(value)
    }
}

impl From<BigUint> for TvmStackEntry {
    fn from(value: BigUint) -> Self {
        TvmStackEntry::Int(value.into())
    }
}

impl From<Cell> for TvmStackEntry {
    fn from(value: Cell) -> Self {
        TvmStackEntry::Cell(Arc::new(value))
    }
}

impl From<ArcCell> for TvmStackEntry {
    fn from(value: ArcCell) -> Self {
        TvmStackEntry::Cell(value)
    }
}

impl From<CellSlice> for TvmStackEntry {
    fn from(value: CellSlice) -> Self {
        TvmStackEntry::Slice(value)
    }
}

impl TryFrom<&TonAddress> for TvmStackEntry {
    type Error = StackParseError;

    fn try_from(value: &TonAddress) -> Result<Self, Self::Error> {
        let cell = CellBuilder::new().store_address(value)?.build()?;
        Ok(TvmStackEntry::Slice(CellSlice::full_cell(cell.to_arc())))
    }
}
