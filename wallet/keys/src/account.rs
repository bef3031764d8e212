//!
//! BIP-44 style account derivation.
//!
//! An [`AccountDeriver`] derives the hardened account key
//! `m/44'/coin'/account'` once. Receive and change addresses below it are
//! then derived from the account's public key only, so address generation
//! never touches private material.
//!

use crate::coin::CoinType;
use crate::error::Error;
use crate::registry::CoinEntry;
use crate::result::Result;
use coinkit_addresses::{AddressProfile, HashAlgorithm};
use coinkit_bip32::{ChildNumber, CurveType, DerivationPath, Error as Bip32Error, ExtendedKey, init_root};
use coinkit_core::{debug, trace};
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Range;
use zeroize::Zeroizing;

/// BIP-44 purpose field.
pub const PURPOSE: u32 = 44;

/// Chain index of receive addresses.
pub const RECEIVE: u32 = 0;
/// Chain index of change addresses.
pub const CHANGE: u32 = 1;

/// Depth of `m/44'/coin'/account'`.
pub const ACCOUNT_DEPTH: u8 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DerivedAddress {
    pub path: DerivationPath,
    pub index: u32,
    /// Public key in the curve's compressed encoding.
    #[serde(serialize_with = "serialize_hex")]
    pub public_key: Vec<u8>,
    pub address: String,
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&faster_hex::hex_string(bytes))
}

/// `m/44'/coin'/account'`
pub fn account_path(coin: &CoinType, account: u32) -> Result<DerivationPath> {
    if account & ChildNumber::HARDENED_FLAG != 0 {
        return Err(Error::InvalidAccountIndex(account));
    }
    let path = [PURPOSE, coin.hd_index, account].into_iter().map(|index| ChildNumber::new(index, true)).collect::<Result<Vec<_>, _>>()?;
    Ok(path.into())
}

/// Encodes the public point of `key` as an address of `profile`.
///
/// Keccak based profiles hash the uncompressed secp256k1 point. Profiles
/// that embed a raw 32 byte key take the x-only form of secp256k1 keys and
/// ed25519 keys as they are. ed25519 keys have no other address form.
pub fn address_for_key(key: &ExtendedKey, profile: &AddressProfile) -> Result<String> {
    let public_key = key.public_key()?;
    let raw_key = profile.hash_algorithm == HashAlgorithm::Identity && profile.hash_len == 32;
    let data = match key.curve() {
        CurveType::Secp256k1 if profile.hash_algorithm == HashAlgorithm::Keccak160 => {
            secp256k1::PublicKey::from_slice(&public_key)?.serialize_uncompressed().to_vec()
        }
        CurveType::Secp256k1 if raw_key => public_key[1..].to_vec(),
        CurveType::Secp256k1 => public_key,
        CurveType::Ed25519 if raw_key => public_key,
        CurveType::Ed25519 => return Err(Error::CurveMismatch { profile: profile.name, curve: CurveType::Ed25519 }),
    };
    Ok(profile.encode(&data)?)
}

/// Address generator for one account of one coin.
#[derive(Clone)]
pub struct AccountDeriver {
    coin: CoinType,
    profile: AddressProfile,
    path: DerivationPath,
    account_key: ExtendedKey,
    account_public: ExtendedKey,
}

impl AccountDeriver {
    /// Derives account `account` of `entry.coin` from a wallet seed.
    pub fn new(seed: &[u8], entry: &CoinEntry, account: u32) -> Result<Self> {
        let path = account_path(&entry.coin, account)?;
        let account_key = init_root(seed, entry.coin.curve)?.derive_path(&path)?;
        debug!("derived account {} of {}", account, entry.coin.symbol);
        Self::with_account_key(entry, path, account_key)
    }

    /// Wraps an existing account key. A public key (for example an imported
    /// xpub) is enough for address generation but cannot sign.
    pub fn from_account_key(entry: &CoinEntry, account_key: ExtendedKey) -> Result<Self> {
        if account_key.depth() != ACCOUNT_DEPTH {
            return Err(Error::InvalidAccountDepth(account_key.depth()));
        }
        let hardened = ChildNumber::new(account_key.child_number().index(), true)?;
        let path = DerivationPath::from(vec![
            ChildNumber::new(PURPOSE, true)?,
            ChildNumber::new(entry.coin.hd_index, true)?,
            hardened,
        ]);
        Self::with_account_key(entry, path, account_key)
    }

    fn with_account_key(entry: &CoinEntry, path: DerivationPath, account_key: ExtendedKey) -> Result<Self> {
        if account_key.curve() != entry.coin.curve {
            return Err(Error::CurveMismatch { profile: entry.profile.name, curve: account_key.curve() });
        }
        let account_public = account_key.to_public()?;
        Ok(Self { coin: entry.coin, profile: entry.profile, path, account_key, account_public })
    }

    pub fn coin(&self) -> &CoinType {
        &self.coin
    }

    pub fn profile(&self) -> &AddressProfile {
        &self.profile
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Serialized extended public key of the account.
    pub fn xpub(&self) -> String {
        self.account_public.encode()
    }

    pub fn account_public(&self) -> &ExtendedKey {
        &self.account_public
    }

    fn chain_key(&self, change: u32) -> Result<ExtendedKey> {
        Ok(self.account_public.derive_public_child(ChildNumber::new(change, false)?)?)
    }

    fn address_at(&self, chain_key: &ExtendedKey, change: u32, index: u32) -> Result<DerivedAddress> {
        let child_number = ChildNumber::new(index, false)?;
        let key = chain_key.derive_public_child(child_number)?;
        let path = self.path.child(ChildNumber(change)).child(child_number);
        trace!("derived {} address at {}", self.coin.symbol, path);
        Ok(DerivedAddress { address: address_for_key(&key, &self.profile)?, public_key: key.public_key()?, path, index })
    }

    /// Public key of `…/change/index`.
    pub fn derive_key(&self, change: u32, index: u32) -> Result<ExtendedKey> {
        Ok(self.chain_key(change)?.derive_public_child(ChildNumber::new(index, false)?)?)
    }

    pub fn derive_address(&self, change: u32, index: u32) -> Result<DerivedAddress> {
        self.address_at(&self.chain_key(change)?, change, index)
    }

    /// Derives the addresses of `indices` in parallel. Results are in index
    /// order; when several indices fail the lowest one's error is returned.
    pub fn derive_addresses(&self, change: u32, indices: Range<u32>) -> Result<Vec<DerivedAddress>> {
        let chain_key = self.chain_key(change)?;
        debug!("deriving {} {} addresses from index {}", indices.len(), self.coin.symbol, indices.start);
        let results = indices.into_par_iter().map(|index| self.address_at(&chain_key, change, index)).collect::<Vec<_>>();
        results.into_iter().collect()
    }

    /// Private scalar of `…/change/index`, for signing.
    pub fn signing_key(&self, change: u32, index: u32) -> Result<Zeroizing<[u8; 32]>> {
        let key = self
            .account_key
            .derive_private_child(ChildNumber::new(change, false)?)?
            .derive_private_child(ChildNumber::new(index, false)?)?;
        let private_key = key.private_key().ok_or(Bip32Error::NotPrivateExtendedKey)?;
        Ok(Zeroizing::new(*private_key))
    }
}
