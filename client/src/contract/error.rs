use std::borrow::Cow;

use thiserror::Error;
use tonplay_core::cell::TonCellError;
use tonplay_core::message::TonMessageError;
use tonplay_core::meta::MetaDataError;
use tonplay_core::TonAddress;

use crate::client::TonClientError;
use crate::types::{StackParseError, TvmStackEntry};

#[derive(Error, Debug)]
#[allow(clippy::result_large_err)]
pub enum TonContractError {
    #[error("Cell error (Method: {method}, address: {address}, error {error})")]
    CellError {
        method: String,
        address: TonAddress,
        error: TonCellError,
    },

    #[error("Message error (Method: {method}, address: {address}, error {error})")]
    MessageError {
        method: String,
        address: TonAddress,
        error: TonMessageError,
    },

    #[error("Metadata error (Method: {method}, address: {address}, error {error})")]
    MetaDataError {
        method: String,
        address: TonAddress,
        error: MetaDataError,
    },

    #[error("Chain error (Method: {method}, address: {address}, error {error})")]
    ChainError {
        method: String,
        address: TonAddress,
        error: TonClientError,
    },

    #[error("Invalid argument ({0})")]
    InvalidArgument(String),

    #[error("Invalid method result stack size  (Method: {method}, address: {address}, actual: {actual}, expected {expected})")]
    InvalidMethodResultStackSize {
        method: String,
        address: TonAddress,
        actual: usize,
        expected: usize,
    },

    #[error(
        "Tvm stack parse  error (Method: {method}, address: {address}, stack error: {error:?})"
    )]
    #[allow(clippy::result_large_err)]
    TvmStackParseError {
        method: String,
        address: TonAddress,
        error: Box<StackParseError>,
    },

    #[error(
        "Tvm run error (Method: {method}, address: {address}, exit code: {exit_code}, gas used: {gas_used}, stack: {stack:?})"
    )]
    #[allow(clippy::result_large_err)]
    TvmRunError {
        method: String,
        address: TonAddress,
        exit_code: i32,
        gas_used: i64,
        stack: Box<Vec<TvmStackEntry>>,
    },
}

pub trait MapStackError<R> {
    #[allow(clippy::result_large_err)]
    fn map_stack_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError>;
}

pub trait MapCellError<R> {
    #[allow(clippy::result_large_err)]
    fn map_cell_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError>;
}

pub trait MapClientError<R> {
    #[allow(clippy::result_large_err)]
    fn map_client_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError>;
}

impl<R> MapStackError<R> for Result<R, StackParseError> {
    fn map_stack_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::TvmStackParseError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e.into(),
        })
    }
}

impl<R> MapCellError<R> for Result<R, TonCellError> {
    fn map_cell_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::CellError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e,
        })
    }
}

impl<R> MapCellError<R> for Result<R, TonMessageError> {
    fn map_cell_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::MessageError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e,
        })
    }
}

impl<R> MapCellError<R> for Result<R, MetaDataError> {
    fn map_cell_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::MetaDataError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e,
        })
    }
}

impl<R> MapClientError<R> for Result<R, TonClientError> {
    fn map_client_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::ChainError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e,
        })
    }
}
