//! Seams to the chain: the read side ([`TonChainApi`]) and the wallet that signs and sends
//! messages ([`MessageSender`]). Transport, proofs and key management live behind them.

pub use error::*;
pub use interface::*;
pub use types::*;

mod error;
mod interface;
mod types;
