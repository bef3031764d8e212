use crate::args::KeyArgs;
use crate::result::Result;
use coinkit_bip32::{Seed, derive_path};
use coinkit_core::debug;
use zeroize::Zeroizing;

pub fn run(args: &KeyArgs) -> Result<String> {
    let seed = Seed::from_hex(&args.seed)?;
    let key = derive_path(seed.as_ref(), &args.path, args.curve)?;
    debug!("derived {} key at depth {}", key.curve(), key.depth());
    let xprv = Zeroizing::new(key.encode());
    let public = key.to_public()?;
    Ok(format!(
        "path: {}\ncurve: {}\nxprv: {}\nxpub: {}\npublic key: {}",
        args.path,
        key.curve(),
        xprv.as_str(),
        public.encode(),
        faster_hex::hex_string(&public.public_key()?)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinkit_bip32::{CurveType, ExtendedKey};

    const SEED: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn field<'a>(output: &'a str, name: &str) -> &'a str {
        output.lines().find_map(|line| line.strip_prefix(name)).unwrap().trim_start_matches(": ")
    }

    #[test]
    fn test_key_output() {
        for curve in [CurveType::Secp256k1, CurveType::Ed25519] {
            let args = KeyArgs { seed: SEED.into(), path: "m/44'/88'/0'".into(), curve };
            let output = run(&args).unwrap();
            let xprv = ExtendedKey::decode(field(&output, "xprv")).unwrap();
            let xpub = ExtendedKey::decode(field(&output, "xpub")).unwrap();
            assert!(xprv.is_private() && !xpub.is_private());
            assert_eq!(xprv.curve(), curve);
            assert_eq!(xprv.depth(), 3);
            assert_eq!(faster_hex::hex_string(&xpub.public_key().unwrap()), field(&output, "public key"));
        }
    }

    #[test]
    fn test_key_errors() {
        let bad_path = KeyArgs { seed: SEED.into(), path: "44'/0'".into(), curve: CurveType::Secp256k1 };
        assert!(run(&bad_path).is_err());
        let short_seed = KeyArgs { seed: "0001".into(), path: "m".into(), curve: CurveType::Secp256k1 };
        assert!(run(&short_seed).is_err());
    }
}
