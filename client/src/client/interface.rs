use async_trait::async_trait;
use num_bigint::BigUint;
use tonplay_core::cell::ArcCell;
use tonplay_core::TonAddress;

use crate::client::{BlockIdExt, SmcRunResult, TonClientError, TxConfirmation};
use crate::types::TvmStackEntry;

/// Read access to chain state.
#[async_trait]
pub trait TonChainApi: Send + Sync {
    async fn current_head(&self) -> Result<BlockIdExt, TonClientError>;

    async fn run_get_method(
        &self,
        block: &BlockIdExt,
        address: &TonAddress,
        method: &str,
        stack: &[TvmStackEntry],
    ) -> Result<SmcRunResult, TonClientError>;
}

/// A wallet able to sign an internal message, broadcast it and wait until the destination
/// processed it.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Address of the sending wallet.
    fn address(&self) -> &TonAddress;

    async fn send_and_wait(
        &self,
        destination: &TonAddress,
        value: &BigUint,
        body: ArcCell,
    ) -> Result<TxConfirmation, TonClientError>;
}
