//!
//! Multi-chain address encoding.
//!
//! Every supported address kind is described by an [`AddressProfile`]: how the
//! input is hashed, which bytes frame the hash and which textual encoding is
//! applied. The codec itself has no per-chain code paths, [`encode`] and
//! [`decode`] dispatch on the profile's [`EncodeType`] only.
//!

use thiserror::Error;

mod base58;
mod eip55;
mod polymod;
mod profile;
pub mod profiles;
mod segwit;

pub use profile::{Alphabet, AddressProfile, CHECKSUM_SIZE, ChecksumAlgorithm, EncodeType, HashAlgorithm};

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid hash length {actual}, expected {expected}")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("Unknown address profile '{0}'")]
    UnknownProfile(String),
}

pub type Result<T, E = AddressError> = std::result::Result<T, E>;

fn check_hash_len(hash: &[u8], profile: &AddressProfile) -> Result<()> {
    if hash.len() != profile.hash_len {
        return Err(AddressError::InvalidHashLength { expected: profile.hash_len, actual: hash.len() });
    }
    Ok(())
}

fn prefix_text(profile: &AddressProfile) -> Result<&'static str> {
    std::str::from_utf8(profile.prefix).map_err(|_| AddressError::InvalidAddress(format!("{} prefix is not text", profile.name)))
}

/// Encodes `data` as an address of `profile`.
///
/// `data` is either the final hash (when it already has `profile.hash_len`
/// bytes) or a public key / script that is hashed with the profile's hash
/// algorithm first.
pub fn encode(data: &[u8], profile: &AddressProfile) -> Result<String> {
    let hash = profile.hash(data);
    check_hash_len(&hash, profile)?;
    match profile.encode_type {
        EncodeType::Base58 => Ok(base58::encode(&hash, profile)),
        EncodeType::Bech32 => segwit::encode(profile.hrp, &hash),
        EncodeType::PolymodBase32 => Ok(polymod::encode(profile.hrp, &[profile.prefix, &hash[..]].concat())),
        EncodeType::Eip55 => Ok(eip55::encode(prefix_text(profile)?, &hash)),
    }
}

/// Decodes `address` back to the hash it commits to, validating checksum,
/// framing and length against `profile`.
pub fn decode(address: &str, profile: &AddressProfile) -> Result<Vec<u8>> {
    let hash = match profile.encode_type {
        EncodeType::Base58 => base58::decode(address, profile)?,
        EncodeType::Bech32 => segwit::decode(profile.hrp, address)?,
        EncodeType::PolymodBase32 => {
            let payload = polymod::decode(profile.hrp, address)?;
            payload
                .strip_prefix(profile.prefix)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| AddressError::InvalidAddress(format!("address is not a {} address", profile.name)))?
        }
        EncodeType::Eip55 => eip55::decode(prefix_text(profile)?, address)?,
    };
    check_hash_len(&hash, profile)?;
    Ok(hash)
}

impl AddressProfile {
    pub fn encode(&self, data: &[u8]) -> Result<String> {
        encode(data, self)
    }

    pub fn decode(&self, address: &str) -> Result<Vec<u8>> {
        decode(address, self)
    }
}
