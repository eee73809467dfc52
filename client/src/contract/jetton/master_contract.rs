use async_trait::async_trait;
use num_bigint::BigUint;
use strum::IntoStaticStr;
use tonplay_core::cell::ArcCell;
use tonplay_core::message::{new_query_id, JettonMintMessage};
use tonplay_core::meta::JettonContent;
use tonplay_core::tlb_types::tlb::TLB;
use tonplay_core::TonAddress;

use crate::client::TxConfirmation;
use crate::contract::{MapCellError, MapStackError, TonContractError, TonContractInterface};
use crate::types::{StackReader, TvmStackEntry};

#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum JettonMasterMethods {
    GetJettonData,
    GetWalletAddress,
    Mint,
}

/// Result of `get_jetton_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct JettonData {
    pub total_supply: BigUint,
    pub mintable: bool,
    pub admin_address: Option<TonAddress>,
    pub content: JettonContent,
    pub wallet_code: ArcCell,
}

#[async_trait]
pub trait JettonMasterContract: TonContractInterface {
    async fn get_jetton_data(&self) -> Result<JettonData, TonContractError> {
        const EXPECTED_STACK_SIZE: usize = 5;
        let method: &'static str = JettonMasterMethods::GetJettonData.into();
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
        let total_supply = reader
            .next_biguint("total_supply")
            .map_stack_error(method, &address)?;
        let mintable = reader
            .next_bool("mintable")
            .map_stack_error(method, &address)?;
        let admin_address = reader
            .next_address_opt("admin_address")
            .map_stack_error(method, &address)?;
        let content_cell = reader
            .next_cell("jetton_content")
            .map_stack_error(method, &address)?;
        let wallet_code = reader
            .next_cell("jetton_wallet_code")
            .map_stack_error(method, &address)?;

        let content = JettonContent::from_cell(&content_cell).map_cell_error(method, &address)?;
        Ok(JettonData {
            total_supply,
            mintable,
            admin_address,
            content,
            wallet_code,
        })
    }

    async fn get_wallet_address(&self, owner: &TonAddress) -> Result<TonAddress, TonContractError> {
        const EXPECTED_STACK_SIZE: usize = 1;
        let method: &'static str = JettonMasterMethods::GetWalletAddress.into();
        let address = self.address().clone();

        let owner_entry = TvmStackEntry::try_from(owner).map_stack_error(method, &address)?;
        let res = self.run_get_method(method, &[owner_entry]).await?;
        let stack = res.stack;
        if stack.len() != EXPECTED_STACK_SIZE {
            return Err(TonContractError::InvalidMethodResultStackSize {
                method: method.to_string(),
                address,
                actual: stack.len(),
                expected: EXPECTED_STACK_SIZE,
            });
        }
        StackReader::new(&stack)
            .next_address("jetton_wallet_address")
            .map_stack_error(method, &address)
    }

    /// Mints `jetton_amount` to `to`, attaching `ton_amount` to the internal transfer the minter
    /// sends. Only the minter admin is allowed to do this.
    async fn mint(
        &self,
        to: &TonAddress,
        ton_amount: &BigUint,
        jetton_amount: &BigUint,
        forward_ton_amount: &BigUint,
        value: &BigUint,
    ) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = JettonMasterMethods::Mint.into();
        let address = self.address().clone();
        let response = match self.factory().sender() {
            Some(sender) => sender.address().clone(),
            None => to.clone(),
        };

        let body = JettonMintMessage::new(
            new_query_id(),
            to,
            ton_amount,
            jetton_amount,
            &response,
            forward_ton_amount,
        )
        .to_cell()
        .map_cell_error(method, &address)?;
        log::debug!("mint payload hash: {}", body.cell_hash_hex());
        self.send_message(method, value, body).await
    }
}

impl<T> JettonMasterContract for T where T: TonContractInterface {}
