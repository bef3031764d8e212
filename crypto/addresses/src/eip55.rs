//! Mixed-case checksummed hex addresses.

use crate::{AddressError, Result};
use coinkit_hashes::keccak256;

fn checksummed(lower_hex: &str) -> String {
    let hash = keccak256(lower_hex.as_bytes());
    lower_hex
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let byte = hash.as_ref()[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 { c.to_ascii_uppercase() } else { c }
        })
        .collect()
}

pub(crate) fn encode(prefix: &str, value: &[u8]) -> String {
    format!("{prefix}{}", checksummed(&faster_hex::hex_string(value)))
}

/// The checksum casing must match exactly.
pub(crate) fn decode(prefix: &str, address: &str) -> Result<Vec<u8>> {
    let hex = address.strip_prefix(prefix).ok_or_else(|| AddressError::InvalidAddress(format!("missing '{prefix}' prefix")))?;
    if hex.len() % 2 != 0 {
        return Err(AddressError::InvalidAddress("odd number of hex digits".into()));
    }
    let mut value = vec![0u8; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut value).map_err(|err| AddressError::InvalidAddress(err.to_string()))?;
    if checksummed(&hex.to_ascii_lowercase()) != hex {
        return Err(AddressError::InvalidAddress("bad checksum casing".into()));
    }
    Ok(value)
}
