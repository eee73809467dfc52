use thiserror::Error;

use crate::tlb_types::tlb::TLBPrefix;

#[derive(Error, Debug)]
pub enum TonCellError {
    #[error("Value overflow ({0})")]
    Overflow(String),

    #[error("Cell overflow (Requested: {requested} {unit}, available: {available})")]
    CellOverflow {
        unit: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("Out of range ({0})")]
    OutOfRange(String),

    #[error("Truncated payload ({0})")]
    TruncatedPayload(String),

    #[error("Opcode mismatch (Expected: {expected:#x}, actual: {actual:#x}, bit_len: {bit_len})")]
    OpcodeMismatch {
        expected: u64,
        actual: u64,
        bit_len: usize,
    },

    #[error("Malformed address ({0})")]
    MalformedAddress(String),

    #[error("Malformed envelope ({0})")]
    MalformedEnvelope(String),

    #[error("Malformed dictionary ({0})")]
    MalformedDictionary(String),

    #[error("Key length mismatch (Expected: {expected} bits, actual: {actual} bits)")]
    KeyLengthMismatch { expected: usize, actual: usize },

    #[error("Cyclic reference (Cell {cell_index} refers to cell {ref_index})")]
    CyclicReference { cell_index: usize, ref_index: usize },

    #[error("Bag of cells serialization error ({0})")]
    BagOfCellsSerializationError(String),

    #[error("Cell builder error ({0})")]
    CellBuilderError(String),

    #[error("Internal error ({0})")]
    InternalError(String),

    #[error("Invalid input error ({0})")]
    InvalidInput(String),

    #[error(
        "Non-empty reader (Remaining bits: {remaining_bits}, Remaining refs: {remaining_refs})"
    )]
    NonEmptyReader {
        remaining_bits: usize,
        remaining_refs: usize,
    },

    #[error("{0}")]
    IO(#[from] std::io::Error),
}

pub trait MapTonCellError<R, E>
where
    E: std::error::Error,
{
    fn map_boc_deserialization_error(self) -> Result<R, TonCellError>;

    fn map_boc_serialization_error(self) -> Result<R, TonCellError>;

    fn map_cell_builder_error(self) -> Result<R, TonCellError>;

    fn map_cell_parser_error(self) -> Result<R, TonCellError>;
}

impl<R, E> MapTonCellError<R, E> for Result<R, E>
where
    E: std::error::Error,
{
    fn map_boc_serialization_error(self) -> Result<R, TonCellError> {
        self.map_err(|e| TonCellError::boc_serialization_error(e))
    }

    fn map_boc_deserialization_error(self) -> Result<R, TonCellError> {
        self.map_err(|e| TonCellError::boc_deserialization_error(e))
    }

    fn map_cell_builder_error(self) -> Result<R, TonCellError> {
        self.map_err(|e| TonCellError::cell_builder_error(e))
    }

    fn map_cell_parser_error(self) -> Result<R, TonCellError> {
        self.map_err(|e| TonCellError::cell_parser_error(e))
    }
}

impl TonCellError {
    pub fn boc_serialization_error<T>(e: T) -> TonCellError
    where
        T: ToString,
    {
        TonCellError::BagOfCellsSerializationError(e.to_string())
    }

    /// Every failure while reading an envelope is reported as a malformed envelope.
    pub fn boc_deserialization_error<T>(e: T) -> TonCellError
    where
        T: ToString,
    {
        TonCellError::MalformedEnvelope(e.to_string())
    }

    pub fn cell_builder_error<T>(e: T) -> TonCellError
    where
        T: ToString,
    {
        TonCellError::CellBuilderError(e.to_string())
    }

    pub fn cell_parser_error<T>(e: T) -> TonCellError
    where
        T: ToString,
    {
        TonCellError::OutOfRange(e.to_string())
    }

    pub fn dict_error<T>(e: T) -> TonCellError
    where
        T: ToString,
    {
        TonCellError::MalformedDictionary(e.to_string())
    }

    pub fn tlb_prefix_error(expected_prefix: &TLBPrefix, actual_prefix: u64) -> TonCellError {
        TonCellError::OpcodeMismatch {
            expected: expected_prefix.value,
            actual: actual_prefix,
            bit_len: expected_prefix.bit_len,
        }
    }

    /// Running out of data while decoding a typed payload is a truncation of that payload,
    /// not a generic cursor error.
    pub fn into_truncated_payload(self, payload: &str) -> TonCellError {
        match self {
            TonCellError::OutOfRange(msg) => {
                TonCellError::TruncatedPayload(format!("{payload}: {msg}"))
            }
            other => other,
        }
    }
}
