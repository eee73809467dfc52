use async_trait::async_trait;
use num_bigint::BigUint;
use strum::IntoStaticStr;
use tonplay_core::cell::ArcCell;
use tonplay_core::message::{new_query_id, SettlementMessage};
use tonplay_core::tlb_types::tlb::TLB;
use tonplay_core::TonAddress;

use crate::client::TxConfirmation;
use crate::contract::{MapCellError, MapStackError, TonContractError, TonContractInterface};
use crate::types::StackReader;

#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum GameWalletMethods {
    GetInfo,
    Settlement,
}

/// Result of the game wallet `get_info`: the player's current bet.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWalletInfo {
    pub round_num: u64,
    pub bet_amount: BigUint,
    /// Cash-out multiple chosen by the player, in percent.
    pub multiple: u64,
    pub owner_address: TonAddress,
    pub crash_game_address: TonAddress,
    pub jetton_minter_address: TonAddress,
    pub jetton_wallet_code: Option<ArcCell>,
    pub game_record_code: Option<ArcCell>,
}

#[async_trait]
pub trait GameWalletContract: TonContractInterface {
    async fn get_game_wallet_data(
        &self,
        show_code: bool,
    ) -> Result<GameWalletInfo, TonContractError> {
        let expected = if show_code { 8 } else { 6 };
        let method: &'static str = GameWalletMethods::GetInfo.into();
        let address = self.address().clone();

        let res = self.run_get_method(method, &[]).await?;
        let stack = res.stack;
        if stack.len() < expected {
            return Err(TonContractError::InvalidMethodResultStackSize {
                method: method.to_string(),
                address,
                actual: stack.len(),
                expected,
            });
        }

        let mut reader = StackReader::new(&stack);
        let round_num = reader
            .next_u64("round_num")
            .map_stack_error(method, &address)?;
        let bet_amount = reader
            .next_biguint("bet_amount")
            .map_stack_error(method, &address)?;
        let multiple = reader
            .next_u64("multiple")
            .map_stack_error(method, &address)?;
        let owner_address = reader
            .next_address("owner_address")
            .map_stack_error(method, &address)?;
        let crash_game_address = reader
            .next_address("crash_game_address")
            .map_stack_error(method, &address)?;
        let jetton_minter_address = reader
            .next_address("jetton_minter_address")
            .map_stack_error(method, &address)?;

        let (jetton_wallet_code, game_record_code) = if show_code {
            let jetton_wallet_code = reader
                .next_cell("jetton_wallet_code")
                .map_stack_error(method, &address)?;
            let game_record_code = reader
                .next_cell("game_record_code")
                .map_stack_error(method, &address)?;
            (Some(jetton_wallet_code), Some(game_record_code))
        } else {
            (None, None)
        };

        Ok(GameWalletInfo {
            round_num,
            bet_amount,
            multiple,
            owner_address,
            crash_game_address,
            jetton_minter_address,
            jetton_wallet_code,
            game_record_code,
        })
    }

    /// Settles the player's bet on `round_num`; the payout goes to `settle_address`.
    async fn settle(
        &self,
        round_num: u32,
        max_rounds_parallel: u32,
        forward_gas_fee: &BigUint,
        settle_address: &TonAddress,
        value: &BigUint,
    ) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = GameWalletMethods::Settlement.into();
        let address = self.address().clone();

        let body = SettlementMessage::new(
            new_query_id(),
            round_num,
            max_rounds_parallel,
            forward_gas_fee,
            settle_address,
        )
        .map_cell_error(method, &address)?
        .to_cell()
        .map_cell_error(method, &address)?;
        log::debug!("settlement payload hash: {}", body.cell_hash_hex());
        self.send_message(method, value, body).await
    }
}

impl<T> GameWalletContract for T where T: TonContractInterface {}
