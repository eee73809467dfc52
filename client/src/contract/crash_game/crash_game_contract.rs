use async_trait::async_trait;
use num_bigint::BigUint;
use strum::IntoStaticStr;
use tonplay_core::contract_data::{CrashGameCodes, GAME_STATE_BETTING};
use tonplay_core::message::{new_query_id, BetMessage, CrashMessage, NewRoundMessage, OpcodeTable};
use tonplay_core::tlb_types::tlb::TLB;
use tonplay_core::TonAddress;

use crate::client::TxConfirmation;
use crate::contract::{
    JettonMasterContract, JettonWalletContract, MapCellError, MapStackError, TonContractError,
    TonContractInterface,
};
use crate::types::StackReader;

#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum CrashGameMethods {
    GetInfo,
    NewRound,
    Crash,
    Bet,
}

/// Result of the crash game `get_info`, describing the latest round.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashGameInfo {
    pub round_num: u64,
    pub game_state: u64,
    pub seed: u64,
    /// In percent.
    pub crash_multiple: u64,
    pub player_nums: u64,
    pub start_unix_time: u64,
    pub start_tx_time: u64,
    pub start_blk_time: u64,
    pub min_interval_time: u64,
    pub admin_address: TonAddress,
    pub jetton_minter_address: TonAddress,
    /// Only read when asked for.
    pub codes: Option<CrashGameCodes>,
}

impl CrashGameInfo {
    pub fn is_betting(&self) -> bool {
        self.game_state == GAME_STATE_BETTING as u64
    }
}

#[async_trait]
pub trait CrashGameContract: TonContractInterface {
    async fn get_crash_game_data(&self, show_code: bool) -> Result<CrashGameInfo, TonContractError> {
        let expected = if show_code { 14 } else { 11 };
        let method: &'static str = CrashGameMethods::GetInfo.into();
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
        let round_num = next_u64("round_num")?;
        let game_state = next_u64("game_state")?;
        let seed = next_u64("seed")?;
        let crash_multiple = next_u64("crash_multiple")?;
        let player_nums = next_u64("player_nums")?;
        let start_unix_time = next_u64("start_unix_time")?;
        let start_tx_time = next_u64("start_tx_time")?;
        let start_blk_time = next_u64("start_blk_time")?;
        let min_interval_time = next_u64("min_interval_time")?;

        let admin_address = reader
            .next_address("admin_address")
            .map_stack_error(method, &address)?;
        let jetton_minter_address = reader
            .next_address("jetton_minter_address")
            .map_stack_error(method, &address)?;
        let codes = if show_code {
            Some(CrashGameCodes {
                jetton_wallet: reader
                    .next_cell("jetton_wallet_code")
                    .map_stack_error(method, &address)?,
                game_wallet: reader
                    .next_cell("game_wallet_code")
                    .map_stack_error(method, &address)?,
                game_record: reader
                    .next_cell("game_record_code")
                    .map_stack_error(method, &address)?,
            })
        } else {
            None
        };

        Ok(CrashGameInfo {
            round_num,
            game_state,
            seed,
            crash_multiple,
            player_nums,
            start_unix_time,
            start_tx_time,
            start_blk_time,
            min_interval_time,
            admin_address,
            jetton_minter_address,
            codes,
        })
    }

    async fn new_round(&self, value: &BigUint) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = CrashGameMethods::NewRound.into();
        let body = NewRoundMessage::new(new_query_id())
            .to_cell()
            .map_cell_error(method, self.address())?;
        log::debug!("new round payload hash: {}", body.cell_hash_hex());
        self.send_message(method, value, body).await
    }

    /// Ends round `round_num`. `forward_gas_fee` pays for the settlement messages the game sends
    /// to every game wallet.
    async fn crash(
        &self,
        round_num: u32,
        forward_gas_fee: &BigUint,
        value: &BigUint,
    ) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = CrashGameMethods::Crash.into();
        let body = CrashMessage::new(new_query_id(), round_num, forward_gas_fee)
            .to_cell()
            .map_cell_error(method, self.address())?;
        log::debug!("crash payload hash: {}", body.cell_hash_hex());
        self.send_message(method, value, body).await
    }

    /// Bets `amount` jettons on `round_num` cashing out at `multiple` percent.
    ///
    /// The bet rides as the forward payload of a jetton transfer from the sender's jetton wallet
    /// to this game, so `value` goes to that wallet, not to the game.
    async fn bet(
        &self,
        opcodes: &OpcodeTable,
        round_num: u32,
        multiple: u32,
        amount: &BigUint,
        forward_ton_amount: &BigUint,
        value: &BigUint,
    ) -> Result<TxConfirmation, TonContractError> {
        let method: &'static str = CrashGameMethods::Bet.into();
        let address = self.address().clone();
        let player = match self.factory().sender() {
            Some(sender) => sender.address().clone(),
            None => {
                return Err(TonContractError::InvalidArgument(format!(
                    "bet on {} needs a message sender",
                    address
                )))
            }
        };

        opcodes.validate().map_cell_error(method, &address)?;
        let payload = BetMessage::new(round_num, multiple)
            .to_cell(opcodes)
            .map_cell_error(method, &address)?
            .to_arc();
        log::debug!("bet payload hash: {}", payload.cell_hash_hex());

        let info = self.get_crash_game_data(false).await?;
        let minter = self.factory().get_contract(&info.jetton_minter_address);
        let player_wallet_address = minter.get_wallet_address(&player).await?;
        log::info!(
            "Betting {} on round {} at {}% via jetton wallet {}",
            amount,
            round_num,
            multiple,
            player_wallet_address
        );

        self.factory()
            .get_contract(&player_wallet_address)
            .transfer(
                &address,
                amount,
                &player,
                forward_ton_amount,
                Some(&payload),
                value,
            )
            .await
    }
}

impl<T> CrashGameContract for T where T: TonContractInterface {}
