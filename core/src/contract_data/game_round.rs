use num_bigint::BigUint;

use crate::cell::dict::{DictKey, Dictionary};
use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::tlb_types::tlb::TLB;

/// Key width of the crash game round dictionary.
pub const ROUND_DICT_KEY_BITS: usize = 16;

/// Round accepts bets.
pub const GAME_STATE_BETTING: u32 = 0;
/// Round finished or not started yet.
pub const GAME_STATE_IDLE: u32 = 1;

/// One slot of the crash game round dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameInfoPerRound {
    pub round_index: u32,
    pub round_num: u32,
    pub game_state: u32,
    pub seed: u32,
    /// In percent.
    pub crash_multiple: u32,
    pub player_nums: u32,
    pub start_unix_time: u32,
    pub start_tx_time: u64,
    pub start_blk_time: u64,
}

impl GameInfoPerRound {
    /// Idle slot `round_index` waiting for round `round_index + 1`.
    pub fn idle(round_index: u32) -> Self {
        GameInfoPerRound {
            round_index,
            round_num: round_index + 1,
            game_state: GAME_STATE_IDLE,
            ..Default::default()
        }
    }

    pub fn is_betting(&self) -> bool {
        self.game_state == GAME_STATE_BETTING
    }
}

impl TLB for GameInfoPerRound {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        Ok(GameInfoPerRound {
            round_index: parser.load_u32(32)?,
            round_num: parser.load_u32(32)?,
            game_state: parser.load_u32(32)?,
            seed: parser.load_u32(32)?,
            crash_multiple: parser.load_u32(32)?,
            player_nums: parser.load_u32(32)?,
            start_unix_time: parser.load_u32(32)?,
            start_tx_time: parser.load_u64(64)?,
            start_blk_time: parser.load_u64(64)?,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_u32(32, self.round_index)?
            .store_u32(32, self.round_num)?
            .store_u32(32, self.game_state)?
            .store_u32(32, self.seed)?
            .store_u32(32, self.crash_multiple)?
            .store_u32(32, self.player_nums)?
            .store_u32(32, self.start_unix_time)?
            .store_u64(64, self.start_tx_time)?
            .store_u64(64, self.start_blk_time)?;
        Ok(())
    }
}

/// Round dictionary with `max_rounds_parallel` idle slots keyed by round index.
pub fn init_rounds_dict(max_rounds_parallel: u32) -> Result<Dictionary, TonCellError> {
    if max_rounds_parallel > 1 << ROUND_DICT_KEY_BITS {
        return Err(TonCellError::InvalidInput(format!(
            "{max_rounds_parallel} rounds do not fit {ROUND_DICT_KEY_BITS}-bit keys"
        )));
    }
    let mut dict = Dictionary::new(ROUND_DICT_KEY_BITS);
    for index in 0..max_rounds_parallel {
        let slot = GameInfoPerRound::idle(index).to_cell()?.to_arc();
        dict.set(DictKey::from_uint(ROUND_DICT_KEY_BITS, index)?, slot)?;
    }
    if let Some(root) = dict.as_cell()? {
        log::debug!("initial round dict hash: {}", root.cell_hash_hex());
    }
    Ok(dict)
}

/// Decodes every slot of a round dictionary in ascending round index order.
pub fn parse_rounds_dict(dict: &Dictionary) -> Result<Vec<GameInfoPerRound>, TonCellError> {
    if dict.key_len_bits() != ROUND_DICT_KEY_BITS {
        return Err(TonCellError::KeyLengthMismatch {
            expected: ROUND_DICT_KEY_BITS,
            actual: dict.key_len_bits(),
        });
    }
    dict.iter()
        .map(|(_, value)| GameInfoPerRound::from_cell(value))
        .collect()
}

/// Same as [`parse_rounds_dict`] for the trie root cell.
pub fn parse_rounds_cell(root: &ArcCell) -> Result<Vec<GameInfoPerRound>, TonCellError> {
    parse_rounds_dict(&Dictionary::parse(root, ROUND_DICT_KEY_BITS)?)
}

/// Looks up the slot of `round_index`; `None` when the slot is not populated.
pub fn get_round(
    dict: &Dictionary,
    round_index: u32,
) -> Result<Option<GameInfoPerRound>, TonCellError> {
    dict.get_int_key(&BigUint::from(round_index))?
        .map(|value| GameInfoPerRound::from_cell(value))
        .transpose()
}
