use coinkit_addresses::AddressError;
use coinkit_bip32::Error as Bip32Error;
use coinkit_core::log::LogError;
use coinkit_wallet_keys::error::Error as WalletError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error(transparent)]
    WalletError(#[from] WalletError),

    #[error(transparent)]
    Bip32Error(#[from] Bip32Error),

    #[error(transparent)]
    AddressError(#[from] AddressError),

    #[error("Logger -> {0}")]
    LogError(#[from] LogError),

    #[error("invalid hex: {0}")]
    Hex(#[from] faster_hex::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }
}
