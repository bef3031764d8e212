//! Address profiles of the supported chains.

use crate::{AddressProfile, Alphabet, ChecksumAlgorithm, EncodeType, HashAlgorithm};

pub const BTC_P2PKH: AddressProfile = AddressProfile::base58_check("btc-p2pkh", &[0x00]);
pub const BTC_P2SH: AddressProfile = AddressProfile::base58_check("btc-p2sh", &[0x05]);
pub const BTC_P2WPKH: AddressProfile = AddressProfile::bech32("btc-p2wpkh", "bc");
pub const BTC_TESTNET_P2PKH: AddressProfile = AddressProfile::base58_check("btc-testnet-p2pkh", &[0x6f]);
pub const BTC_TESTNET_P2SH: AddressProfile = AddressProfile::base58_check("btc-testnet-p2sh", &[0xc4]);
pub const BTC_TESTNET_P2WPKH: AddressProfile = AddressProfile::bech32("btc-testnet-p2wpkh", "tb");

pub const LTC_P2PKH: AddressProfile = AddressProfile::base58_check("ltc-p2pkh", &[0x30]);
pub const LTC_P2SH: AddressProfile = AddressProfile::base58_check("ltc-p2sh", &[0x32]);
pub const LTC_P2WPKH: AddressProfile = AddressProfile::bech32("ltc-p2wpkh", "ltc");

pub const DOGE_P2PKH: AddressProfile = AddressProfile::base58_check("doge-p2pkh", &[0x1e]);
pub const DOGE_P2SH: AddressProfile = AddressProfile::base58_check("doge-p2sh", &[0x16]);

pub const DASH_P2PKH: AddressProfile = AddressProfile::base58_check("dash-p2pkh", &[0x4c]);
pub const DASH_P2SH: AddressProfile = AddressProfile::base58_check("dash-p2sh", &[0x10]);

pub const BCH_P2PKH: AddressProfile = AddressProfile::polymod("bch-p2pkh", "bitcoincash", &[0x00], HashAlgorithm::Hash160, 20);
pub const BCH_P2SH: AddressProfile = AddressProfile::polymod("bch-p2sh", "bitcoincash", &[0x08], HashAlgorithm::Hash160, 20);

pub const KASPA_SCHNORR: AddressProfile = AddressProfile::polymod("kaspa-schnorr", "kaspa", &[0x00], HashAlgorithm::Identity, 32);
pub const KASPA_ECDSA: AddressProfile = AddressProfile::polymod("kaspa-ecdsa", "kaspa", &[0x01], HashAlgorithm::Identity, 33);
pub const KASPA_P2SH: AddressProfile = AddressProfile::polymod("kaspa-p2sh", "kaspa", &[0x08], HashAlgorithm::Identity, 32);
pub const KASPA_TESTNET_SCHNORR: AddressProfile =
    AddressProfile::polymod("kaspatest-schnorr", "kaspatest", &[0x00], HashAlgorithm::Identity, 32);
pub const KASPA_TESTNET_ECDSA: AddressProfile = AddressProfile::polymod("kaspatest-ecdsa", "kaspatest", &[0x01], HashAlgorithm::Identity, 33);

pub const DCR_P2PKH: AddressProfile = AddressProfile {
    checksum_algorithm: ChecksumAlgorithm::DoubleBlake256,
    hash_algorithm: HashAlgorithm::Blake256Hash160,
    ..AddressProfile::base58_check("dcr-p2pkh", &[0x07, 0x3f])
};

pub const XRP: AddressProfile = AddressProfile { alphabet: Alphabet::Ripple, ..AddressProfile::base58_check("xrp", &[0x00]) };

pub const ETH: AddressProfile = AddressProfile {
    name: "eth",
    encode_type: EncodeType::Eip55,
    alphabet: Alphabet::Bitcoin,
    checksum_algorithm: ChecksumAlgorithm::None,
    hash_algorithm: HashAlgorithm::Keccak160,
    hash_len: 20,
    prefix: b"0x",
    suffix: &[],
    hrp: "",
};

pub const ALL: &[AddressProfile] = &[
    BTC_P2PKH,
    BTC_P2SH,
    BTC_P2WPKH,
    BTC_TESTNET_P2PKH,
    BTC_TESTNET_P2SH,
    BTC_TESTNET_P2WPKH,
    LTC_P2PKH,
    LTC_P2SH,
    LTC_P2WPKH,
    DOGE_P2PKH,
    DOGE_P2SH,
    DASH_P2PKH,
    DASH_P2SH,
    BCH_P2PKH,
    BCH_P2SH,
    KASPA_SCHNORR,
    KASPA_ECDSA,
    KASPA_P2SH,
    KASPA_TESTNET_SCHNORR,
    KASPA_TESTNET_ECDSA,
    DCR_P2PKH,
    XRP,
    ETH,
];

pub fn by_name(name: &str) -> Option<&'static AddressProfile> {
    ALL.iter().find(|profile| profile.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|p| p.name).collect();
        assert_eq!(names.len(), ALL.len());
        assert_eq!(by_name("BTC-P2PKH"), Some(&BTC_P2PKH));
        assert_eq!(by_name("nope"), None);
    }
}
