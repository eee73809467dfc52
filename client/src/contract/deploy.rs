use num_bigint::BigUint;
use tonplay_core::cell::{ArcCell, TonCellError};
use tonplay_core::contract_data::{CrashGameCodes, CrashGameData, JettonMinterData};
use tonplay_core::meta::JettonMetaData;
use tonplay_core::tlb_types::block::StateInit;
use tonplay_core::tlb_types::tlb::TLB;
use tonplay_core::{TonAddress, TonHash};

/// Initial storage of a contract about to be deployed together with the address it will get.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployData {
    pub data: ArcCell,
    pub data_hash: TonHash,
    pub state_init: StateInit,
    pub address: TonAddress,
}

impl DeployData {
    /// Derives the basechain address of `code` deployed with `data`.
    pub fn new(code: &ArcCell, data: ArcCell) -> Result<DeployData, TonCellError> {
        let data_hash = data.cell_hash();
        let state_init = StateInit::new(code.clone(), data.clone());
        let address = state_init.derive_address(0)?;
        log::debug!(
            "deploy data hash: {}, contract address: {}",
            hex::encode(data_hash),
            address
        );
        Ok(DeployData {
            data,
            data_hash,
            state_init,
            address,
        })
    }

    pub fn data_hash_hex(&self) -> String {
        hex::encode(self.data_hash)
    }
}

/// Jetton minter with zero supply (unless given) and `meta` stored as jetton content.
pub fn deploy_jetton_minter_data(
    code: &ArcCell,
    total_supply: &BigUint,
    admin: &TonAddress,
    meta: &JettonMetaData,
    wallet_code: &ArcCell,
) -> Result<DeployData, TonCellError> {
    let content = meta.to_content()?;
    let data = JettonMinterData::new(total_supply, admin, &content, wallet_code)?;
    DeployData::new(code, data.to_cell()?.to_arc())
}

/// Crash game with an empty round dictionary.
pub fn deploy_crash_game_data(
    code: &ArcCell,
    jetton_minter: &TonAddress,
    admin: &TonAddress,
    max_rounds_parallel: u32,
    min_interval_time: u32,
    codes: &CrashGameCodes,
) -> Result<DeployData, TonCellError> {
    let data = CrashGameData::new(
        jetton_minter,
        admin,
        max_rounds_parallel,
        min_interval_time,
        codes,
    );
    DeployData::new(code, data.to_cell()?.to_arc())
}
