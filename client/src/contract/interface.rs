use async_trait::async_trait;
use num_bigint::BigUint;
use tonplay_core::cell::Cell;
use tonplay_core::TonAddress;

use crate::client::{SmcRunResult, TxConfirmation};
use crate::contract::{MapClientError, TonContractError, TonContractFactory};
use crate::types::TvmStackEntry;

#[derive(Clone)]
pub struct TonContract {
    factory: TonContractFactory,
    address: TonAddress,
}

impl TonContract {
    pub fn new(factory: &TonContractFactory, address: &TonAddress) -> TonContract {
        TonContract {
            factory: factory.clone(),
            address: address.clone(),
        }
    }
}

impl TonContractInterface for TonContract {
    fn factory(&self) -> &TonContractFactory {
        &self.factory
    }

    fn address(&self) -> &TonAddress {
        &self.address
    }
}

#[async_trait]
pub trait TonContractInterface: Send + Sync {
    fn factory(&self) -> &TonContractFactory;

    fn address(&self) -> &TonAddress;

    /// Runs `method` on the latest block. Exit codes other than 0 and 1 give
    /// [`TonContractError::TvmRunError`].
    async fn run_get_method(
        &self,
        method: &str,
        stack: &[TvmStackEntry],
    ) -> Result<SmcRunResult, TonContractError> {
        let address = self.address();
        let chain = self.factory().chain();
        let block = chain
            .current_head()
            .await
            .map_client_error(method.to_string(), address)?;
        let result = chain
            .run_get_method(&block, address, method, stack)
            .await
            .map_client_error(method.to_string(), address)?;

        if !result.is_success() {
            return Err(TonContractError::TvmRunError {
                method: method.to_string(),
                address: address.clone(),
                exit_code: result.exit_code,
                gas_used: result.gas_used,
                stack: Box::new(result.stack),
            });
        }
        log::trace!(
            "{}.{} returned {} entries, gas used {}",
            address,
            method,
            result.stack.len(),
            result.gas_used
        );
        Ok(result)
    }

    /// Sends `body` with `value` nanotons attached through the factory's sender and waits until
    /// this contract processed it.
    async fn send_message(
        &self,
        method: &str,
        value: &BigUint,
        body: Cell,
    ) -> Result<TxConfirmation, TonContractError> {
        let address = self.address();
        let sender = self.factory().sender().ok_or_else(|| {
            TonContractError::InvalidArgument(format!(
                "{} to {} needs a message sender",
                method, address
            ))
        })?;

        log::info!(
            "Sending {} to {} from {} (value: {}, body hash: {})",
            method,
            address,
            sender.address(),
            value,
            body.cell_hash_hex()
        );
        let confirmation = sender
            .send_and_wait(address, value, body.to_arc())
            .await
            .map_client_error(method.to_string(), address)?;
        log::info!(
            "{} to {} confirmed in tx {}",
            method,
            address,
            confirmation.tx_hash_hex()
        );
        Ok(confirmation)
    }
}
