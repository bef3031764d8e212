//!
//! UTXO transaction model, wire codec, signature hashing (legacy and
//! BIP-143) and ECDSA signing for bitcoin-derived chains.
//!

pub mod config;
pub mod errors;
pub mod hashing;
pub mod sign;
pub mod tx;

pub use config::params::ChainParams;
pub use errors::{TxError, TxResult};
