use async_trait::async_trait;
use num_bigint::BigUint;
use strum::IntoStaticStr;
use tonplay_core::cell::ArcCell;
use tonplay_core::message::{new_query_id, JettonBurnMessage, JettonTransferMessage};
use tonplay_core::tlb_types::tlb::TLB;
use tonplay_core::TonAddress;

use crate::client::TxConfirmation;
use crate::contract::{MapCellError, MapStackError, TonContractError, TonContractInterface};
use crate::types::StackReader;

#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum JettonWalletMethods {
    GetWalletData,
    Transfer,
    Burn,
}

/// Result of `get_wallet_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletData {
    pub balance: BigUint,
    pub owner_address: TonAddress,
    pub master_address: TonAddress,
    pub wallet_code: ArcCell,
}

#[async_trait]
pub trait JettonWalletContract: TonContractInterface {
    async fn get_wallet_data(&self) -> Result<WalletData, TonContractError> {
        const EXPECTED_STACK_SIZE: usize = 4;
        let method: &'static str = JettonWalletMethods::GetWalletData.into();
        let address = self.address().clone();

        let res = self.run_get_method(method, &[]).await?;
        let stack = res.stack;
        if stack.len() != EXPECTED_STACK_SIZE {
            return Err(TonContractError::InvalidMethodResultStackSize {
                method: method.to_string(),
                address,
                actual: stack.len(),
                expected: EXPECTED_STACK_SIZE,
            });
        }

        let mut reader = StackReader::new(&stack);
        let balance = reader
            .next_biguint("balance")
            .map_stack_error(method, &address)?;
        let owner_address = reader
            .next_address("owner_address")
            .map_stack_error(method, &address)?;
        let master_address = reader
            .next_address("master_address")
            .map_stack_error(method, &address)?;
        let wallet_code = reader
            .next_cell("wallet_code")
            .map_stack_error(method, &address)?;
        Ok(WalletData {
            balance,
            owner_address,
            master_address,
            wallet_code,
        })
    }

    /// Transfers `amount` jettons to `destination`. Excesses go back to `response_destination`.
    /// A forward payload travels as a reference together with `forward_ton_amount`.
    async fn transfer(
        &self,
        destination: &TonAddress,
        amount: &BigUint,
        response_destination: &TonAddress,
        forward_ton_amount: &BigUint,
        forward_payload: Option<&ArcCell>,
        value: &BigUint,
    ) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = JettonWalletMethods::Transfer.into();
        let address = self.address().clone();

        let mut transfer = JettonTransferMessage::new(destination, amount);
        transfer
            .with_query_id(new_query_id())
            .with_response_destination(response_destination);
        match forward_payload {
            Some(payload) => {
                transfer.with_forward_payload(forward_ton_amount, payload);
            }
            None => transfer.forward_ton_amount = forward_ton_amount.clone(),
        }
        let body = transfer.to_cell().map_cell_error(method, &address)?;
        log::debug!("transfer payload hash: {}", body.cell_hash_hex());
        self.send_message(method, value, body).await
    }

    async fn burn(
        &self,
        amount: &BigUint,
        response_destination: &TonAddress,
        value: &BigUint,
    ) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = JettonWalletMethods::Burn.into();
        let address = self.address().clone();

        let mut burn = JettonBurnMessage::new(amount);
        burn.with_query_id(new_query_id())
            .with_response_destination(response_destination);
        let body = burn.to_cell().map_cell_error(method, &address)?;
        log::debug!("burn payload hash: {}", body.cell_hash_hex());
        self.send_message(method, value, body).await
    }
}

impl<T> JettonWalletContract for T where T: TonContractInterface {}
