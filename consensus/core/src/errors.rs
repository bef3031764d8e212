use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("address '{0}' is not a P2PKH, P2SH or P2WPKH address of this chain")]
    UnsupportedAddress(String),

    #[error("{actual} unlocks provided for {expected} inputs")]
    UnlockCountMismatch { expected: usize, actual: usize },

    #[error("{actual} signatures provided for {expected} inputs")]
    SignatureCountMismatch { expected: usize, actual: usize },

    #[error("input {0} requires the amount of the spent output")]
    MissingAmount(usize),

    #[error("input {0} has no private key")]
    MissingPrivateKey(usize),

    #[error("invalid sighash type {0:#04x}")]
    InvalidSigHashType(u8),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("unexpected end of transaction data at offset {0}")]
    UnexpectedEnd(usize),

    #[error("{0} trailing bytes after transaction")]
    TrailingData(usize),

    #[error("non-canonical compact size at offset {0}")]
    NonCanonicalCompactSize(usize),

    #[error("unsupported witness with {0} items")]
    UnsupportedWitness(u64),

    #[error(transparent)]
    Secp256k1(#[from] secp256k1::Error),
}

impl From<faster_hex::Error> for TxError {
    fn from(err: faster_hex::Error) -> Self {
        TxError::InvalidHex(err.to_string())
    }
}

pub type TxResult<T, E = TxError> = std::result::Result<T, E>;
