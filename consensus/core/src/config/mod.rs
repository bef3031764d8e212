pub mod params;

pub use params::{ALL_PARAMS, BITCOIN_PARAMS, ChainParams, DASH_PARAMS, DOGECOIN_PARAMS, LITECOIN_PARAMS, SigHashDigest, TESTNET_PARAMS};
