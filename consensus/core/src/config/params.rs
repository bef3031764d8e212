use crate::hashing::sighash_type::{SIG_HASH_ALL, SigHashType};
use coinkit_addresses::{AddressProfile, profiles};
use coinkit_hashes::{Hash, sha256, sha256d};
use serde::{Deserialize, Serialize};

/// Final digest applied to a signature hash preimage.
///
/// `Sha256` leaves one round to the signer, for signing backends that hash
/// the message themselves. The network parameters below hand a complete
/// double SHA-256 digest to ECDSA.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SigHashDigest {
    #[default]
    Sha256,
    DoubleSha256,
}

impl SigHashDigest {
    pub fn digest(self, preimage: &[u8]) -> Hash {
        match self {
            SigHashDigest::Sha256 => sha256(preimage),
            SigHashDigest::DoubleSha256 => sha256d(preimage),
        }
    }
}

/// Transaction related parameters of a bitcoin-derived chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChainParams {
    pub name: &'static str,
    pub p2pkh: AddressProfile,
    pub p2sh: AddressProfile,
    pub p2wpkh: Option<AddressProfile>,
    pub tx_version: u32,
    pub sighash_digest: SigHashDigest,
    pub default_sighash_type: SigHashType,
}

impl ChainParams {
    pub const fn new(name: &'static str, p2pkh: AddressProfile, p2sh: AddressProfile) -> Self {
        Self {
            name,
            p2pkh,
            p2sh,
            p2wpkh: None,
            tx_version: 2,
            sighash_digest: SigHashDigest::Sha256,
            default_sighash_type: SIG_HASH_ALL,
        }
    }

    pub fn by_name(name: &str) -> Option<&'static ChainParams> {
        ALL_PARAMS.iter().copied().find(|params| params.name.eq_ignore_ascii_case(name))
    }
}

pub const BITCOIN_PARAMS: ChainParams = ChainParams {
    p2wpkh: Some(profiles::BTC_P2WPKH),
    sighash_digest: SigHashDigest::DoubleSha256,
    ..ChainParams::new("bitcoin", profiles::BTC_P2PKH, profiles::BTC_P2SH)
};

pub const TESTNET_PARAMS: ChainParams = ChainParams {
    p2wpkh: Some(profiles::BTC_TESTNET_P2WPKH),
    sighash_digest: SigHashDigest::DoubleSha256,
    ..ChainParams::new("testnet", profiles::BTC_TESTNET_P2PKH, profiles::BTC_TESTNET_P2SH)
};

pub const LITECOIN_PARAMS: ChainParams = ChainParams {
    p2wpkh: Some(profiles::LTC_P2WPKH),
    sighash_digest: SigHashDigest::DoubleSha256,
    ..ChainParams::new("litecoin", profiles::LTC_P2PKH, profiles::LTC_P2SH)
};

pub const DOGECOIN_PARAMS: ChainParams = ChainParams {
    tx_version: 1,
    sighash_digest: SigHashDigest::DoubleSha256,
    ..ChainParams::new("dogecoin", profiles::DOGE_P2PKH, profiles::DOGE_P2SH)
};

pub const DASH_PARAMS: ChainParams = ChainParams {
    sighash_digest: SigHashDigest::DoubleSha256,
    ..ChainParams::new("dash", profiles::DASH_P2PKH, profiles::DASH_P2SH)
};

pub const ALL_PARAMS: &[&ChainParams] = &[&BITCOIN_PARAMS, &TESTNET_PARAMS, &LITECOIN_PARAMS, &DOGECOIN_PARAMS, &DASH_PARAMS];
