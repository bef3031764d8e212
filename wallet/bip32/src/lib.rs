//! Hierarchical deterministic keys over several curve families.
//!
//! The derivation scheme generalizes BIP32: secp256k1 keys follow it exactly,
//! while ed25519 keys use the same HMAC chain with cofactor-scaled scalar
//! tweaks so that non-hardened public derivation is still possible.
//! Extended keys have their own base58-check serialization which records the
//! curve the key belongs to.

mod attrs;
mod child_number;
pub mod curve;
mod derivation_path;
mod encoding;
mod error;
mod result;
mod seed;
pub mod types;
mod xkey;

pub use attrs::ExtendedKeyAttrs;
pub use child_number::ChildNumber;
pub use curve::CurveType;
pub use derivation_path::DerivationPath;
pub use encoding::Version;
pub use error::Error;
pub use result::Result;
pub use seed::{SEED_SIZE, Seed};
pub use xkey::{ExtendedKey, derive_path, init_root};

/// Size of a private scalar and of a chain code.
pub const KEY_SIZE: usize = 32;
