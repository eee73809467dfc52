use std::cmp::max;

use num_bigint::BigUint;

use crate::cell::{ArcCell, CellBuilder, TonCellError};

pub fn val_writer_ref_cell(builder: &mut CellBuilder, val: ArcCell) -> Result<(), TonCellError> {
    builder.store_reference(&val)?;
    Ok(())
}

pub fn val_writer_unsigned_min_size<V>(
    builder: &mut CellBuilder,
    val: V,
) -> Result<(), TonCellError>
where
    BigUint: From<V>,
{
    let internal_val = BigUint::from(val);
    let len_bits = max(1, internal_val.bits()) as usize;
    builder.store_uint(len_bits, &internal_val)?;
    Ok(())
}
