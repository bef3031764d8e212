use crate::result::Result;
use coinkit_wallet_keys::generate_seed;

pub fn run() -> Result<String> {
    Ok(faster_hex::hex_string(generate_seed().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinkit_wallet_keys::Seed;

    #[test]
    fn test_seed_is_usable() {
        let hex = run().unwrap();
        assert_eq!(hex.len(), 64);
        assert!(Seed::from_hex(&hex).is_ok());
    }
}
