use crate::{CurveType, SEED_SIZE};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid seed length {0}, expected {SEED_SIZE} bytes")]
    InvalidSeedLength(usize),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("seed produced an invalid root key")]
    InvalidRootKey,

    #[error("private derivation requires a private extended key")]
    NotPrivateExtendedKey,

    #[error("maximum derivation depth exceeded")]
    DeriveBeyondMaxDepth,

    #[error("hardened derivation requires a private extended key")]
    DeriveHardFromPublic,

    /// The derived key is unusable; callers should retry with the next index.
    #[error("derived child key is invalid")]
    InvalidChild,

    #[error("invalid derivation path '{0}'")]
    InvalidDerivedPath(String),

    #[error("invalid child number '{0}'")]
    InvalidChildNumber(String),

    #[error("invalid extended key: {0}")]
    InvalidAddress(String),

    #[error("invalid {0} key material")]
    InvalidKey(CurveType),

    #[error("unknown curve '{0}'")]
    UnknownCurve(String),
}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Self {
        Error::InvalidAddress(err.to_string())
    }
}
