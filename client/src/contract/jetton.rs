pub use master_contract::*;
pub use wallet_contract::*;

mod master_contract;
mod wallet_contract;
