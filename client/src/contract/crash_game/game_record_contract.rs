use async_trait::async_trait;
use strum::IntoStaticStr;
use tonplay_core::cell::ArcCell;
use tonplay_core::TonAddress;

use crate::contract::{MapStackError, TonContractError, TonContractInterface};
use crate::types::StackReader;

#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum GameRecordMethods {
    GetInfo,
}

/// Result of the game record `get_info`: the outcome of one finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecordInfo {
    pub round_index: u64,
    pub round_num: u64,
    pub seed: u64,
    pub crash_multiple: u64,
    pub game_state: u64,
    pub player_nums: u64,
    pub crash_game_address: TonAddress,
    pub jetton_minter_address: TonAddress,
    pub jetton_wallet_code: Option<ArcCell>,
    pub game_wallet_code: Option<ArcCell>,
}

#[async_trait]
pub trait GameRecordContract: TonContractInterface {
    async fn get_game_record_data(
        &self,
        show_code: bool,
    ) -> Result<GameRecordInfo, TonContractError> {
        let expected = if show_code { 10 } else { 8 };
        let method: &'static str = GameRecordMethods::GetInfo.into();
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
        let mut next_u64 = |name: &str| reader.next_u64(name).map_stack_error(method, &address);
        let round_index = next_u64("round_index")?;
        let round_num = next_u64("round_num")?;
        let seed = next_u64("seed")?;
        let crash_multiple = next_u64("crash_multiple")?;
        let game_state = next_u64("game_state")?;
        let player_nums = next_u64("player_nums")?;

        let crash_game_address = reader
            .next_address("crash_game_address")
            .map_stack_error(method, &address)?;
        let jetton_minter_address = reader
            .next_address("jetton_minter_address")
            .map_stack_error(method, &address)?;
        let mut next_code = |name: &str| -> Result<Option<ArcCell>, TonContractError> {
            if show_code {
                reader.next_cell(name).map(Some).map_stack_error(method, &address)
            } else {
                Ok(None)
            }
        };
        let jetton_wallet_code = next_code("jetton_wallet_code")?;
        let game_wallet_code = next_code("game_wallet_code")?;

        Ok(GameRecordInfo {
            round_index,
            round_num,
            seed,
            crash_multiple,
            game_state,
            player_nums,
            crash_game_address,
            jetton_minter_address,
            jetton_wallet_code,
            game_wallet_code,
        })
    }
}

impl<T> GameRecordContract for T where T: TonContractInterface {}
