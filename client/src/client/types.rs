use tonplay_core::TonHash;

use crate::types::TvmStackEntry;

/// Full block id: shard coordinates plus the root and file hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BlockIdExt {
    pub workchain: i32,
    pub shard: i64,
    pub seqno: i32,
    pub root_hash: TonHash,
    pub file_hash: TonHash,
}

/// Result of a get-method run.
#[derive(Debug, Clone, PartialEq)]
pub struct SmcRunResult {
    pub gas_used: i64,
    pub stack: Vec<TvmStackEntry>,
    pub exit_code: i32,
}

impl SmcRunResult {
    /// TVM exit codes 0 and 1 are both successful.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0 || self.exit_code == 1
    }
}

/// Transaction that processed a sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxConfirmation {
    pub tx_hash: TonHash,
    pub block: BlockIdExt,
}

impl TxConfirmation {
    pub fn tx_hash_hex(&self) -> String {
        hex::encode(self.tx_hash)
    }
}
