use std::ops::{Deref, DerefMut};

use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::tlb_types::tlb::TLB;

/// `Maybe ^X`: a presence bit, then the value in a referenced cell.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionRef<T>(pub Option<T>);

impl<T> OptionRef<T> {
    pub const NONE: OptionRef<T> = OptionRef(None);

    pub const fn new(value: T) -> Self {
        OptionRef(Some(value))
    }
}

impl<T> Deref for OptionRef<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for OptionRef<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Option<T>> for OptionRef<T> {
    fn from(value: Option<T>) -> Self {
        OptionRef(value)
    }
}

impl<T: TLB> TLB for OptionRef<T> {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        match parser.load_bit()? {
            false => Ok(OptionRef(None)),
            true => {
                let child = parser.next_reference()?;
                Ok(OptionRef(Some(T::from_cell(child.as_ref())?)))
            }
        }
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        match &self.0 {
            Some(value) => {
                dst.store_bit(true)?;
                dst.store_child(value.to_cell()?)?;
            }
            None => {
                dst.store_bit(false)?;
            }
        }
        Ok(())
    }
}

// Maybe X
impl<T: TLB> TLB for Option<T> {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        match parser.load_bit()? {
            false => Ok(None),
            true => Ok(Some(parser.load_tlb()?)),
        }
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        match self {
            None => dst.store_bit(false)?,
            Some(value) => dst.store_bit(true)?.store_tlb(value)?,
        };
        Ok(())
    }
}
