use thiserror::Error;
use tonplay_core::cell::TonCellError;
use tonplay_core::TonAddress;

#[derive(Error, Debug)]
pub enum TonClientError {
    #[error("Chain error (method: {method}, message: {message})")]
    ChainError { method: String, message: String },

    #[error("Message to {destination} was not confirmed: {message}")]
    NotConfirmed {
        destination: TonAddress,
        message: String,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Illegal argument: {message}")]
    IllegalArgument { message: String },

    #[error("{0}")]
    TonCellError(#[from] TonCellError),
}

impl TonClientError {
    pub fn chain_error<M: ToString>(method: &str, message: M) -> TonClientError {
        TonClientError::ChainError {
            method: method.to_string(),
            message: message.to_string(),
        }
    }
}
