//!
//! Error types used by the wallet key glue.
//!

use coinkit_addresses::AddressError;
use coinkit_bip32::{CurveType, Error as Bip32Error};
use coinkit_consensus_core::TxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("Bip32 -> {0}")]
    Bip32(#[from] Bip32Error),

    #[error("Address -> {0}")]
    Address(#[from] AddressError),

    #[error("Transaction -> {0}")]
    Transaction(#[from] TxError),

    #[error("Secp256k1 -> {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("unknown coin '{0}'")]
    UnknownCoin(String),

    #[error("{profile} addresses cannot be built from {curve} keys")]
    CurveMismatch { profile: &'static str, curve: CurveType },

    #[error("account index {0} must be below 2^31")]
    InvalidAccountIndex(u32),

    #[error("account keys sit at depth 3, got a key of depth {0}")]
    InvalidAccountDepth(u8),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Self::Custom(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Self::Custom(err.to_string())
    }
}
