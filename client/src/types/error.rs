use thiserror::Error;
use tonplay_core::cell::TonCellError;

use crate::types::TvmStackEntryKind;

#[derive(Error, Debug)]
pub enum StackParseError {
    #[error("Invalid stack entry type {{expected: {expected}, found: {found}}}")]
    InvalidEntryType {
        expected: TvmStackEntryKind,
        found: TvmStackEntryKind,
    },

    #[error("Stack entry {index} ({name}) type mismatch {{expected: {expected}, found: {found}}}")]
    TypeMismatch {
        index: usize,
        name: String,
        expected: TvmStackEntryKind,
        found: TvmStackEntryKind,
    },

    #[error("Stack entry {index} ({name}) is missing")]
    MissingEntry { index: usize, name: String },

    #[error("Stack entry {index} ({name}) holds addr_none where an address is required")]
    MissingAddress { index: usize, name: String },

    #[error("Stack entry {index} ({name}) value {value} is out of range")]
    ValueOverflow {
        index: usize,
        name: String,
        value: String,
    },

    #[error("Cell error({0})")]
    CellError(#[from] TonCellError),
}

impl StackParseError {
    /// Attaches the stack position to an entry-level error.
    pub fn at(self, index: usize, name: &str) -> StackParseError {
        match self {
            StackParseError::InvalidEntryType { expected, found } => {
                StackParseError::TypeMismatch {
                    index,
                    name: name.to_string(),
                    expected,
                    found,
                }
            }
            other => other,
        }
    }
}
