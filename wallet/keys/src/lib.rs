//!
//! # Coinkit Wallet Keys
//!
//! Glue between the key engine, the address codec and the transaction
//! crate: a registry of supported coins, BIP-44 style account derivation
//! and parallel batch address generation.
//!

pub mod account;
pub mod coin;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod result;

pub use coinkit_bip32::Seed;

/// Fresh 32 byte wallet seed from the operating system RNG. The seed is
/// wiped when dropped.
pub fn generate_seed() -> Seed {
    Seed::generate()
}
