use crate::cell::dict::Dictionary;
use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::contract_data::{init_rounds_dict, parse_rounds_dict, GameInfoPerRound, ROUND_DICT_KEY_BITS};
use crate::tlb_types::primitives::reference::Ref;
use crate::tlb_types::tlb::TLB;
use crate::TonAddress;

/// Crash game storage:
///
/// ```raw
/// rounds:(HashmapE 16 GameInfoPerRound) current_round_num:uint32 max_rounds_parallel:uint32
/// min_interval_time:uint32 admin_address:MsgAddress jetton_minter_address:MsgAddress
/// jetton_wallet_code:^Cell game_wallet_code:^Cell game_record_code:^Cell
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CrashGameData {
    pub rounds: Dictionary,
    /// Total number of rounds started so far.
    pub current_round_num: u32,
    pub max_rounds_parallel: u32,
    /// Seconds between round creation and crash, at least.
    pub min_interval_time: u32,
    pub admin: TonAddress,
    pub jetton_minter: TonAddress,
    pub jetton_wallet_code: Ref<ArcCell>,
    pub game_wallet_code: Ref<ArcCell>,
    pub game_record_code: Ref<ArcCell>,
}

/// Contract codes the crash game deploys and checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashGameCodes {
    pub jetton_wallet: ArcCell,
    pub game_wallet: ArcCell,
    pub game_record: ArcCell,
}

impl CrashGameData {
    /// Deployment storage: no rounds yet, the contract fills its slots on `new_round`.
    pub fn new(
        jetton_minter: &TonAddress,
        admin: &TonAddress,
        max_rounds_parallel: u32,
        min_interval_time: u32,
        codes: &CrashGameCodes,
    ) -> Self {
        CrashGameData {
            rounds: Dictionary::new(ROUND_DICT_KEY_BITS),
            current_round_num: 0,
            max_rounds_parallel,
            min_interval_time,
            admin: admin.clone(),
            jetton_minter: jetton_minter.clone(),
            jetton_wallet_code: Ref::new(codes.jetton_wallet.clone()),
            game_wallet_code: Ref::new(codes.game_wallet.clone()),
            game_record_code: Ref::new(codes.game_record.clone()),
        }
    }

    /// Pre-populates every round slot with an idle round.
    pub fn with_initial_rounds(mut self) -> Result<Self, TonCellError> {
        self.rounds = init_rounds_dict(self.max_rounds_parallel)?;
        Ok(self)
    }

    pub fn round_infos(&self) -> Result<Vec<GameInfoPerRound>, TonCellError> {
        parse_rounds_dict(&self.rounds)
    }
}

impl TLB for CrashGameData {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let rounds = parser.load_dict(ROUND_DICT_KEY_BITS)?;
        let current_round_num = parser.load_u32(32)?;
        let max_rounds_parallel = parser.load_u32(32)?;
        let min_interval_time = parser.load_u32(32)?;
        let admin = parser.load_address()?;
        let jetton_minter = parser.load_address()?;
        let jetton_wallet_code = TLB::read(parser)?;
        let game_wallet_code = TLB::read(parser)?;
        let game_record_code = TLB::read(parser)?;
        parser.ensure_empty()?;

        Ok(CrashGameData {
            rounds,
            current_round_num,
            max_rounds_parallel,
            min_interval_time,
            admin,
            jetton_minter,
            jetton_wallet_code,
            game_wallet_code,
            game_record_code,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_dict(&self.rounds)?
            .store_u32(32, self.current_round_num)?
            .store_u32(32, self.max_rounds_parallel)?
            .store_u32(32, self.min_interval_time)?
            .store_address(&self.admin)?
            .store_address(&self.jetton_minter)?;
        self.jetton_wallet_code.write(dst)?;
        self.game_wallet_code.write(dst)?;
        self.game_record_code.write(dst)?;
        Ok(())
    }
}
