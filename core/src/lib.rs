pub mod cell;
pub mod contract_data;
pub mod message;
pub mod meta;
pub mod tlb_types;
pub mod types;

pub use crate::types::{TonAddress, TonAddressParseError, TonHash};
