use crate::args::DeriveArgs;
use crate::error::Error;
use crate::result::Result;
use coinkit_core::info;
use coinkit_wallet_keys::{account::AccountDeriver, registry::CoinRegistry, Seed};

pub fn run(args: &DeriveArgs) -> Result<String> {
    let registry = CoinRegistry::with_defaults();
    let entry = registry.get(&args.coin)?;
    let seed = Seed::from_hex(&args.seed)?;
    let account = AccountDeriver::new(seed.as_ref(), entry, args.account)?;
    let end = args.index.checked_add(args.count).ok_or_else(|| Error::custom(format!("address range overflows at index {}", args.index)))?;
    let addresses = account.derive_addresses(args.change, args.index..end)?;
    info!("derived {} {} addresses", addresses.len(), entry.coin.symbol);

    if args.json {
        let output = serde_json::json!({
            "coin": entry.coin,
            "account": account.path(),
            "xpub": account.xpub(),
            "addresses": addresses,
        });
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let mut lines = vec![format!("coin: {}", entry.coin), format!("account: {}", account.path()), format!("xpub: {}", account.xpub())];
    lines.extend(addresses.iter().map(|derived| format!("{} {}", derived.path, derived.address)));
    Ok(lines.join("\n"))
}
