use clap::{Args as ClapArgs, Parser, Subcommand};
use coinkit_bip32::CurveType;
use std::path::PathBuf;

/// Coinkit key derivation and address tool
#[derive(Parser, Debug)]
#[command(name = "coinkit", version, about, long_about = None)]
pub struct Args {
    /// Logging level for all subsystems {off, error, warn, info, debug, trace}
    /// -- You may also specify `<subsystem>=<level>,<subsystem2>=<level>,...` to set the log level for individual subsystems
    #[arg(long = "loglevel", default_value = "warn", global = true)]
    pub log_level: String,

    /// Directory to log output.
    #[arg(long = "logdir", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a fresh random wallet seed
    Seed,
    /// Derive an account xpub and its addresses
    Derive(DeriveArgs),
    /// Print the extended keys at a derivation path
    Key(KeyArgs),
    /// Encode data as an address, or decode an address
    Address(AddressArgs),
}

#[derive(ClapArgs, Debug)]
pub struct DeriveArgs {
    /// Coin ticker, for example BTC or ETH
    #[arg(long)]
    pub coin: String,

    /// Wallet seed (32 bytes, hex)
    #[arg(long)]
    pub seed: String,

    #[arg(long, default_value_t = 0)]
    pub account: u32,

    /// 0 for receive addresses, 1 for change addresses
    #[arg(long, default_value_t = 0)]
    pub change: u32,

    /// First address index
    #[arg(long, default_value_t = 0)]
    pub index: u32,

    /// Number of addresses
    #[arg(long, default_value_t = 1)]
    pub count: u32,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(ClapArgs, Debug)]
pub struct KeyArgs {
    /// Wallet seed (32 bytes, hex)
    #[arg(long)]
    pub seed: String,

    /// Absolute derivation path, for example m/44'/0'/0'
    #[arg(long, default_value = "m")]
    pub path: String,

    #[arg(long, default_value = "secp256k1")]
    pub curve: CurveType,
}

#[derive(ClapArgs, Debug)]
pub struct AddressArgs {
    /// Address profile name, for example btc-p2pkh or eth
    #[arg(long)]
    pub profile: String,

    /// Hex encoded public key or hash, or the address with --decode
    pub data: String,

    /// Decode an address back to hex
    #[arg(long, default_value_t = false)]
    pub decode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_derive() {
        let args = Args::try_parse_from(["coinkit", "derive", "--coin", "btc", "--seed", "00", "--count", "5", "--loglevel", "debug"]).unwrap();
        assert_eq!(args.log_level, "debug");
        assert!(args.log_dir.is_none());
        let Command::Derive(derive) = args.command else { panic!("expected derive") };
        assert_eq!((derive.coin.as_str(), derive.account, derive.index, derive.count), ("btc", 0, 0, 5));
    }

    #[test]
    fn test_parse_key_curve() {
        let args = Args::try_parse_from(["coinkit", "key", "--seed", "00", "--curve", "ed25519"]).unwrap();
        let Command::Key(key) = args.command else { panic!("expected key") };
        assert_eq!(key.curve, CurveType::Ed25519);
        assert_eq!(key.path, "m");
        assert!(Args::try_parse_from(["coinkit", "key", "--seed", "00", "--curve", "p256"]).is_err());
    }

    #[test]
    fn test_parse_address() {
        let args = Args::try_parse_from(["coinkit", "--logdir", "/tmp/coinkit", "address", "--profile", "eth", "--decode", "0xabc"]).unwrap();
        assert_eq!(args.log_dir, Some(PathBuf::from("/tmp/coinkit")));
        let Command::Address(address) = args.command else { panic!("expected address") };
        assert!(address.decode);
        assert_eq!(address.data, "0xabc");
    }
}
