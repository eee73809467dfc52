mod crash_game;
mod error;
mod jetton;
mod opcodes;

pub use crash_game::*;
pub use error::*;
pub use jetton::*;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Zero;
pub use opcodes::*;
use rand::Rng;

use crate::cell::{ArcCell, Cell};

lazy_static! {
    pub(crate) static ref ZERO_COINS: BigUint = BigUint::zero();
    pub(crate) static ref EMPTY_ARC_CELL: ArcCell = Cell::default().to_arc();
}

/// Random query id for request/response correlation.
pub fn new_query_id() -> u64 {
    rand::thread_rng().gen()
}
