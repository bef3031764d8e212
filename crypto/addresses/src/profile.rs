use coinkit_hashes::{blake2b_160, blake256_hash160, blake256d, hash160, keccak256, sha256d};
use serde::{Deserialize, Serialize};

/// Textual address format. Every chain is described by one of these plus data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodeType {
    /// `prefix || hash || suffix || checksum`, base58 encoded.
    Base58,
    /// Segwit version 0 program with the profile `hrp`.
    Bech32,
    /// `hrp:payload` with a 40 bit polymod checksum over `prefix || hash`.
    PolymodBase32,
    /// `prefix` followed by mixed-case checksummed hex.
    Eip55,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alphabet {
    Bitcoin,
    Ripple,
    Flickr,
}

impl Alphabet {
    pub fn bs58(self) -> &'static bs58::Alphabet {
        match self {
            Alphabet::Bitcoin => bs58::Alphabet::BITCOIN,
            Alphabet::Ripple => bs58::Alphabet::RIPPLE,
            Alphabet::Flickr => bs58::Alphabet::FLICKR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecksumAlgorithm {
    /// Plain base58 without a checksum.
    None,
    DoubleSha256,
    DoubleBlake256,
}

pub const CHECKSUM_SIZE: usize = 4;

impl ChecksumAlgorithm {
    pub fn size(self) -> usize {
        match self {
            ChecksumAlgorithm::None => 0,
            ChecksumAlgorithm::DoubleSha256 | ChecksumAlgorithm::DoubleBlake256 => CHECKSUM_SIZE,
        }
    }

    /// Leading bytes of the double digest.
    pub fn checksum(self, data: &[u8]) -> Vec<u8> {
        match self {
            ChecksumAlgorithm::None => vec![],
            ChecksumAlgorithm::DoubleSha256 => sha256d(data).as_ref()[..CHECKSUM_SIZE].to_vec(),
            ChecksumAlgorithm::DoubleBlake256 => blake256d(data).as_ref()[..CHECKSUM_SIZE].to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    Identity,
    /// RIPEMD-160 of SHA-256.
    Hash160,
    /// Blake2b truncated to its first 20 bytes.
    Blake2b160,
    /// Last 20 bytes of Keccak-256 over an uncompressed point, with or
    /// without its `0x04` tag.
    Keccak160,
    /// RIPEMD-160 of BLAKE-256.
    Blake256Hash160,
}

impl HashAlgorithm {
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Identity => data.to_vec(),
            HashAlgorithm::Hash160 => hash160(data).to_vec(),
            HashAlgorithm::Blake2b160 => blake2b_160(data).to_vec(),
            HashAlgorithm::Keccak160 => {
                let point = match data {
                    [0x04, rest @ ..] if rest.len() == 64 => rest,
                    _ => data,
                };
                keccak256(point).as_ref()[12..].to_vec()
            }
            HashAlgorithm::Blake256Hash160 => blake256_hash160(data).to_vec(),
        }
    }
}

/// Everything needed to encode and decode one kind of address of one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AddressProfile {
    pub name: &'static str,
    pub encode_type: EncodeType,
    pub alphabet: Alphabet,
    pub checksum_algorithm: ChecksumAlgorithm,
    pub hash_algorithm: HashAlgorithm,
    pub hash_len: usize,
    /// Version bytes for base58 and polymod payloads, literal text for eip55.
    pub prefix: &'static [u8],
    pub suffix: &'static [u8],
    /// Human readable part of bech32 and polymod addresses.
    pub hrp: &'static str,
}

impl AddressProfile {
    /// Base58-check profile with a double SHA-256 checksum over hash160 values.
    pub const fn base58_check(name: &'static str, prefix: &'static [u8]) -> Self {
        AddressProfile {
            name,
            encode_type: EncodeType::Base58,
            alphabet: Alphabet::Bitcoin,
            checksum_algorithm: ChecksumAlgorithm::DoubleSha256,
            hash_algorithm: HashAlgorithm::Hash160,
            hash_len: 20,
            prefix,
            suffix: &[],
            hrp: "",
        }
    }

    /// Segwit v0 key hash profile.
    pub const fn bech32(name: &'static str, hrp: &'static str) -> Self {
        AddressProfile {
            name,
            encode_type: EncodeType::Bech32,
            alphabet: Alphabet::Bitcoin,
            checksum_algorithm: ChecksumAlgorithm::None,
            hash_algorithm: HashAlgorithm::Hash160,
            hash_len: 20,
            prefix: &[],
            suffix: &[],
            hrp,
        }
    }

    /// Polymod base32 profile whose payload starts with a `version` byte.
    pub const fn polymod(name: &'static str, hrp: &'static str, version: &'static [u8], hash_algorithm: HashAlgorithm, hash_len: usize) -> Self {
        AddressProfile {
            name,
            encode_type: EncodeType::PolymodBase32,
            alphabet: Alphabet::Bitcoin,
            checksum_algorithm: ChecksumAlgorithm::None,
            hash_algorithm,
            hash_len,
            prefix: version,
            suffix: &[],
            hrp,
        }
    }

    /// Hashes `data` unless it already has the length of the profile hash.
    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        if data.len() == self.hash_len { data.to_vec() } else { self.hash_algorithm.hash(data) }
    }
}
