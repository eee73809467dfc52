use crate::cell::{CellBuilder, CellParser, EitherCellLayout, TonCellError};
use crate::tlb_types::tlb::TLB;

/// `Either X ^X`: the value is stored inline after a zero bit, or in a reference after a one bit.
#[derive(Debug, PartialEq, Clone)]
pub struct EitherRef<T> {
    pub value: T,
    pub layout: EitherRefLayout,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum EitherRefLayout {
    ToCell,
    ToRef,
    /// Inline when the value fits into the rest of the builder, a reference otherwise.
    Native,
}

impl<T> EitherRef<T> {
    pub fn new(value: T) -> Self {
        EitherRef {
            value,
            layout: EitherRefLayout::Native,
        }
    }

    pub fn to_ref(value: T) -> Self {
        EitherRef {
            value,
            layout: EitherRefLayout::ToRef,
        }
    }
}

impl From<EitherRefLayout> for EitherCellLayout {
    fn from(layout: EitherRefLayout) -> Self {
        match layout {
            EitherRefLayout::ToCell => EitherCellLayout::ToCell,
            EitherRefLayout::ToRef => EitherCellLayout::ToRef,
            EitherRefLayout::Native => EitherCellLayout::Native,
        }
    }
}

impl<T: TLB> TLB for EitherRef<T> {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        match parser.load_bit()? {
            false => Ok(EitherRef {
                value: T::read(parser)?,
                layout: EitherRefLayout::ToCell,
            }),
            true => {
                let child = parser.next_reference()?;
                Ok(EitherRef {
                    value: T::from_cell(child.as_ref())?,
                    layout: EitherRefLayout::ToRef,
                })
            }
        }
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        let cell = self.value.to_cell()?.to_arc();
        dst.store_either_cell_or_cell_ref(&cell, self.layout.into())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::cell::{ArcCell, CellBuilder};
    use crate::tlb_types::primitives::test_types::{TestType1, TestType2};

    #[test]
    fn test_either_ref() -> anyhow::Result<()> {
        let obj1 = EitherRef {
            value: TestType1 { value: 1 },
            layout: EitherRefLayout::ToCell,
        };

        let obj2 = EitherRef {
            value: TestType2 { value: 2 },
            layout: EitherRefLayout::ToRef,
        };

        let cell = CellBuilder::new()
            .store_tlb(&obj1)?
            .store_tlb(&obj2)?
            .build()?;
        let mut parser = cell.parser();
        let parsed_obj1: EitherRef<TestType1> = parser.load_tlb()?;
        let parsed_obj2: EitherRef<TestType2> = parser.load_tlb()?;
        assert_eq!(obj1, parsed_obj1);
        assert_eq!(obj2, parsed_obj2);

        // check layout
        let mut parser = cell.parser();
        assert!(!parser.load_bit()?); // to_cell
        assert_ok!(parser.load_bits(32)); // skipping
        assert!(parser.load_bit()?); // to_ref
        assert_eq!(cell.references().len(), 1);
        Ok(())
    }

    #[test]
    fn test_native_layout() -> anyhow::Result<()> {
        let small = EitherRef::new(TestType1 { value: 3 });
        let cell = CellBuilder::new().store_tlb(&small)?.build()?;
        assert_eq!(cell.bit_len(), 33);
        let parsed: EitherRef<TestType1> = cell.parser().load_tlb()?;
        assert_eq!(parsed.value, small.value);
        assert_eq!(parsed.layout, EitherRefLayout::ToCell);

        let mut builder = CellBuilder::new();
        builder.store_bits(1000, &[0; 125])?;
        builder.store_tlb(&small)?;
        let cell = builder.build()?;
        assert_eq!(cell.bit_len(), 1001);
        assert_eq!(cell.references().len(), 1);
        Ok(())
    }

    #[test]
    fn test_either_cell_payload() -> anyhow::Result<()> {
        let payload: ArcCell = CellBuilder::new().store_u32(32, 0xdead)?.build()?.to_arc();
        let obj = EitherRef::to_ref(payload.clone());
        let cell = CellBuilder::new().store_tlb(&obj)?.build()?;
        let parsed: EitherRef<ArcCell> = cell.parser().load_tlb()?;
        assert_eq!(parsed.value, payload);
        assert_eq!(parsed.layout, EitherRefLayout::ToRef);
        Ok(())
    }
}
