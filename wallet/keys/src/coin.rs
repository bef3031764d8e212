use coinkit_bip32::CurveType;
use serde::Serialize;
use std::fmt::{self, Display};

/// A coin known to the wallet: its ticker, its registered SLIP-44 index and
/// the curve its keys live on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CoinType {
    pub symbol: &'static str,
    pub hd_index: u32,
    pub curve: CurveType,
}

impl CoinType {
    pub const fn secp256k1(symbol: &'static str, hd_index: u32) -> Self {
        Self { symbol, hd_index, curve: CurveType::Secp256k1 }
    }

    pub const fn ed25519(symbol: &'static str, hd_index: u32) -> Self {
        Self { symbol, hd_index, curve: CurveType::Ed25519 }
    }

    pub fn by_symbol(symbol: &str) -> Option<&'static CoinType> {
        ALL_COINS.iter().find(|coin| coin.symbol.eq_ignore_ascii_case(symbol))
    }
}

impl Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.symbol, self.hd_index, self.curve)
    }
}

pub const BTC: CoinType = CoinType::secp256k1("BTC", 0);
pub const LTC: CoinType = CoinType::secp256k1("LTC", 2);
pub const DOGE: CoinType = CoinType::secp256k1("DOGE", 3);
pub const DASH: CoinType = CoinType::secp256k1("DASH", 5);
pub const DCR: CoinType = CoinType::secp256k1("DCR", 42);
pub const ETH: CoinType = CoinType::secp256k1("ETH", 60);
/// Reserved index of the engine's own test vectors.
pub const TEST: CoinType = CoinType::secp256k1("TEST", 88);
pub const XRP: CoinType = CoinType::secp256k1("XRP", 144);
pub const BCH: CoinType = CoinType::secp256k1("BCH", 145);
pub const SOL: CoinType = CoinType::ed25519("SOL", 501);
pub const KAS: CoinType = CoinType::secp256k1("KAS", 111111);

pub const ALL_COINS: &[CoinType] = &[BTC, LTC, DOGE, DASH, DCR, ETH, TEST, XRP, BCH, SOL, KAS];
