pub mod block;
pub mod primitives;
pub mod tlb;
mod tlb_cell;
