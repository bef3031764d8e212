use crate::args::AddressArgs;
use crate::result::Result;
use coinkit_addresses::{AddressError, profiles};

pub fn run(args: &AddressArgs) -> Result<String> {
    let profile = profiles::by_name(&args.profile).ok_or_else(|| AddressError::UnknownProfile(args.profile.clone()))?;
    if args.decode {
        return Ok(faster_hex::hex_string(&profile.decode(&args.data)?));
    }
    let data = args.data.strip_prefix("0x").unwrap_or(&args.data);
    let mut bytes = vec![0u8; data.len() / 2];
    faster_hex::hex_decode(data.as_bytes(), &mut bytes)?;
    Ok(profile.encode(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn args(profile: &str, data: &str, decode: bool) -> AddressArgs {
        AddressArgs { profile: profile.into(), data: data.into(), decode }
    }

    #[test]
    fn test_encode_decode() {
        let address = run(&args("btc-p2pkh", "6231f1005e86c03d5fbd41776985d094ccb682d3", false)).unwrap();
        assert_eq!(address, "19xD3nnvEiu7Uqd8irRvF3j5ExLb4ZtSju");
        assert_eq!(run(&args("BTC-P2PKH", &address, true)).unwrap(), "6231f1005e86c03d5fbd41776985d094ccb682d3");
        assert_eq!(
            run(&args("btc-p2pkh", "0x0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798", false)).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(run(&args("nope", "00", false)), Err(Error::AddressError(AddressError::UnknownProfile(_)))));
        assert!(matches!(run(&args("btc-p2pkh", "zz", false)), Err(Error::Hex(_))));
        assert!(matches!(run(&args("btc-p2pkh", "19xD3nnvEiu7Uqd8irRvF3j5ExLb4ZtSjv", true)), Err(Error::AddressError(_))));
    }
}
