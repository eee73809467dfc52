use std::ops::{Deref, DerefMut};

use crate::cell::{CellBuilder, CellParser, TonCellError};
use crate::tlb_types::tlb::TLB;

/// `^X`: the value lives in the next referenced cell.
#[derive(Debug, PartialEq, Clone)]
pub struct Ref<T>(pub T);

impl<T> Ref<T> {
    pub const fn new(value: T) -> Self {
        Ref(value)
    }
}

impl<T> Deref for Ref<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Ref<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: TLB> TLB for Ref<T> {
    fn read_definition(parser: &mut CellParser) -> Result<Ref<T>, TonCellError> {
        Ok(Ref(T::from_cell(parser.next_reference()?.as_ref())?))
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_child(self.0.to_cell()?)?;
        Ok(())
    }
}
