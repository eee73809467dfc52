use std::string::FromUtf8Error;

use thiserror::Error;

use crate::cell::TonCellError;

#[derive(Debug, Error)]
pub enum MetaDataError {
    #[error("Unsupported content encoding (format byte {format:#04x})")]
    UnsupportedContentEncoding { format: u8 },

    #[error("Attribute {attribute} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        attribute: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Serde_json Error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("{0}")]
    TonCellError(#[from] TonCellError),
}

impl MetaDataError {
    pub fn invalid_utf8(attribute: &str, source: FromUtf8Error) -> MetaDataError {
        MetaDataError::InvalidUtf8 {
            attribute: attribute.to_string(),
            source,
        }
    }
}
