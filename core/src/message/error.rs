use thiserror::Error;

use crate::cell::TonCellError;
use crate::message::PayloadKind;

#[derive(Error, Debug)]
pub enum TonMessageError {
    #[error("Opcode conflict ({first} and {second} share opcode {opcode:#010x} on {receiver})")]
    OpcodeConflict {
        receiver: String,
        first: PayloadKind,
        second: PayloadKind,
        opcode: u32,
    },

    #[error("Opcode for {0} is not configured")]
    MissingOpcode(PayloadKind),

    #[error(
        "Opcode layout mismatch ({kind} is configured as {configured:#010x}, layout uses {layout:#010x})"
    )]
    LayoutMismatch {
        kind: PayloadKind,
        configured: u32,
        layout: u32,
    },

    #[error("Invalid argument ({0})")]
    InvalidArgument(String),

    #[error("Opcode table JSON error ({0})")]
    Json(#[from] serde_json::Error),

    #[error("TonCellError ({0})")]
    TonCellError(#[from] TonCellError),
}
