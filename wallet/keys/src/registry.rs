//!
//! Explicit registry of the coins a wallet supports.
//!
//! The registry is plain data built once at startup and handed to whoever
//! needs it. There is no process wide instance.
//!

use crate::coin::{self, CoinType};
use crate::error::Error;
use crate::result::Result;
use coinkit_addresses::{AddressProfile, profiles};
use coinkit_consensus_core::config::params::{BITCOIN_PARAMS, ChainParams, DASH_PARAMS, DOGECOIN_PARAMS, LITECOIN_PARAMS, TESTNET_PARAMS};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything needed to derive addresses for a coin and, for UTXO chains,
/// to build and sign its transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CoinEntry {
    pub coin: CoinType,
    /// Profile of the coin's default receive address.
    pub profile: AddressProfile,
    /// Present for chains handled by the UTXO transaction codec.
    pub chain_params: Option<ChainParams>,
}

impl CoinEntry {
    pub const fn new(coin: CoinType, profile: AddressProfile) -> Self {
        Self { coin, profile, chain_params: None }
    }

    pub const fn utxo(coin: CoinType, params: ChainParams) -> Self {
        Self { coin, profile: params.p2pkh, chain_params: Some(params) }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CoinRegistry {
    entries: BTreeMap<String, CoinEntry>,
}

impl CoinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every coin the toolkit ships profiles for.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for entry in [
            CoinEntry::utxo(coin::BTC, BITCOIN_PARAMS),
            CoinEntry::utxo(coin::LTC, LITECOIN_PARAMS),
            CoinEntry::utxo(coin::DOGE, DOGECOIN_PARAMS),
            CoinEntry::utxo(coin::DASH, DASH_PARAMS),
            CoinEntry::utxo(coin::TEST, TESTNET_PARAMS),
            CoinEntry::new(coin::DCR, profiles::DCR_P2PKH),
            CoinEntry::new(coin::ETH, profiles::ETH),
            CoinEntry::new(coin::XRP, profiles::XRP),
            CoinEntry::new(coin::BCH, profiles::BCH_P2PKH),
            CoinEntry::new(coin::KAS, profiles::KASPA_SCHNORR),
        ] {
            registry.register(entry);
        }
        registry
    }

    /// Adds or replaces the entry of `entry.coin`, returning the replaced one.
    pub fn register(&mut self, entry: CoinEntry) -> Option<CoinEntry> {
        self.entries.insert(entry.coin.symbol.to_ascii_uppercase(), entry)
    }

    /// Looks a coin up by its ticker, ignoring case.
    pub fn get(&self, symbol: &str) -> Result<&CoinEntry> {
        self.entries.get(&symbol.to_ascii_uppercase()).ok_or_else(|| Error::UnknownCoin(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(&symbol.to_ascii_uppercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoinEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
