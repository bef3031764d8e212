//! Cashaddr style base32 with a 40 bit polymod checksum, as used by Bitcoin Cash
//! and Kaspa addresses of the form `prefix:payload`.

use crate::{AddressError, Result};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const REV_CHARSET: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

const CHECKSUM_LEN: usize = 8;

fn polymod(values: impl Iterator<Item = u8>) -> u64 {
    const GENERATORS: [u64; 5] = [0x98f2bc8e61, 0x79b76d99e2, 0xf33e5fb3c4, 0xae2eabe2a8, 0x1e4f43e470];
    let mut c = 1u64;
    for d in values {
        let c0 = c >> 35;
        c = ((c & 0x07ffffffff) << 5) ^ d as u64;
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> bit) & 1 != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// The prefix contributes the low five bits of each character followed by a zero separator.
fn checksum(prefix: &str, payload: &[u8]) -> u64 {
    let prefix = prefix.bytes().map(|c| c & 0x1f).chain([0]);
    polymod(prefix.chain(payload.iter().copied()).chain([0u8; CHECKSUM_LEN]))
}

/// Regroups `from`-bit values into `to`-bit values. Encoding pads the last
/// group with zero bits; decoding rejects non-zero or oversized padding.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let max_value = (1u32 << to) - 1;
    let max_acc = (1u32 << (from + to - 1)) - 1;
    let mut acc = 0u32;
    let mut bits = 0u32;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        if (value as u32) >> from != 0 {
            return None;
        }
        acc = ((acc << from) | value as u32) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return None;
    }
    Some(out)
}

pub(crate) fn encode(prefix: &str, payload: &[u8]) -> String {
    let data = convert_bits(payload, 8, 5, true).unwrap_or_default();
    let checksum = checksum(prefix, &data);

    let mut address = String::with_capacity(prefix.len() + 1 + data.len() + CHECKSUM_LEN);
    address.push_str(prefix);
    address.push(':');
    address.extend(data.iter().map(|&v| CHARSET[v as usize] as char));
    address.extend((0..CHECKSUM_LEN).rev().map(|i| CHARSET[((checksum >> (5 * i)) & 0x1f) as usize] as char));
    address
}

pub(crate) fn decode(prefix: &str, address: &str) -> Result<Vec<u8>> {
    let (address_prefix, payload) =
        address.split_once(':').ok_or_else(|| AddressError::InvalidAddress(format!("missing '{prefix}:' prefix")))?;
    if address_prefix != prefix {
        return Err(AddressError::InvalidAddress(format!("unexpected prefix '{address_prefix}'")));
    }
    if payload.len() < CHECKSUM_LEN {
        return Err(AddressError::InvalidAddress("payload too short".into()));
    }

    let values = payload
        .chars()
        .map(|c| match REV_CHARSET.get(c as usize) {
            Some(&v) if v >= 0 => Ok(v as u8),
            _ => Err(AddressError::InvalidAddress(format!("invalid character '{c}'"))),
        })
        .collect::<Result<Vec<u8>>>()?;

    let (data, checksum_values) = values.split_at(values.len() - CHECKSUM_LEN);
    let embedded = checksum_values.iter().fold(0u64, |acc, &v| (acc << 5) | v as u64);
    if checksum(prefix, data) != embedded {
        return Err(AddressError::InvalidAddress("bad checksum".into()));
    }
    convert_bits(data, 5, 8, false).ok_or_else(|| AddressError::InvalidAddress("invalid padding".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned(version: u8, payload: &[u8]) -> Vec<u8> {
        [&[version][..], payload].concat()
    }

    fn cases() -> Vec<(&'static str, Vec<u8>, &'static str)> {
        // cspell:disable
        vec![
            ("a", versioned(0, b""), "a:qqeq69uvrh"),
            ("a", versioned(8, b""), "a:pq99546ray"),
            ("b", versioned(8, b" "), "b:pqsqzsjd64fv"),
            ("b", versioned(8, b"abc"), "b:ppskycc8txxxn2w"),
            ("b", versioned(8, b"1234598760"), "b:pqcnyve5x5unsdekxqeusxeyu2"),
            ("b", versioned(8, b"abcdefghijklmnopqrstuvwxyz"), "b:ppskycmyv4nxw6rfdf4kcmtwdac8zunnw36hvamc09aqtpppz8lk"),
            ("kaspatest", versioned(0, &[0u8; 32]), "kaspatest:qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqhqrxplya"),
            ("kaspatest", versioned(1, &[0u8; 33]), "kaspatest:qyqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqhe837j2d"),
            ("kaspa", versioned(0, &[0u8; 32]), "kaspa:qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkx9awp4e"),
            (
                "kaspa",
                versioned(0, b"\x5f\xff\x3c\x4d\xa1\x8f\x45\xad\xcd\xd4\x99\xe4\x46\x11\xe9\xff\xf1\x48\xba\x69\xdb\x3c\x4e\xa2\xdd\xd9\x55\xfc\x46\xa5\x95\x22"),
                "kaspa:qp0l70zd5x85ttwd6jv7g3s3a8llzj96d8dncn4zmhv4tlzx5k2jyqh70xmfj",
            ),
        ]
        // cspell:enable
    }

    #[test]
    fn test_encode() {
        for (prefix, payload, expected) in cases() {
            assert_eq!(encode(prefix, &payload), expected);
        }
    }

    #[test]
    fn test_decode() {
        for (prefix, payload, address) in cases() {
            assert_eq!(decode(prefix, address).unwrap(), payload);
        }
    }

    #[test]
    fn test_errors() {
        // cspell:disable
        let bad_char = "kaspa:qqqqqqqqqqqqq1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkx9awp4e";
        let bad_checksum = "kaspa:qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkx9awp4l";
        let truncated = "kaspa:qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkx9awp4e";
        // cspell:enable
        for address in [bad_char, bad_checksum, truncated, "kaspa:", "kaspa:qqq", "kaspa:qq\u{e9}qqqqqqqq", "kaspaqqqqqqqqqqqq"] {
            assert!(matches!(decode("kaspa", address), Err(AddressError::InvalidAddress(_))), "{address}");
        }
        assert!(decode("kaspatest", "kaspa:qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkx9awp4e").is_err());
    }

    #[test]
    fn test_convert_bits() {
        let data = b"coinkit polymod";
        let five = convert_bits(data, 8, 5, true).unwrap();
        assert!(five.iter().all(|v| *v < 32));
        assert_eq!(convert_bits(&five, 5, 8, false).unwrap(), data);
        assert_eq!(convert_bits(&[32], 5, 8, false), None);
    }
}
