//! Standard locking and unlocking scripts.

use super::ScriptVec;
use coinkit_hashes::HASH160_SIZE;
use smallvec::SmallVec;
use std::iter::once;

pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_DUP: u8 = 0x76;
    pub const OP_EQUAL: u8 = 0x87;
    pub const OP_EQUALVERIFY: u8 = 0x88;
    pub const OP_HASH160: u8 = 0xa9;
    pub const OP_CHECKSIG: u8 = 0xac;
    pub const OP_DATA_20: u8 = 0x14;
}

use opcodes::*;

/// `DUP HASH160 <hash> EQUALVERIFY CHECKSIG`
pub fn pay_to_pub_key_hash(hash: &[u8]) -> ScriptVec {
    SmallVec::from_iter([OP_DUP, OP_HASH160, OP_DATA_20].into_iter().chain(hash.iter().copied()).chain([OP_EQUALVERIFY, OP_CHECKSIG]))
}

/// `HASH160 <hash> EQUAL`
pub fn pay_to_script_hash(hash: &[u8]) -> ScriptVec {
    SmallVec::from_iter([OP_HASH160, OP_DATA_20].into_iter().chain(hash.iter().copied()).chain(once(OP_EQUAL)))
}

/// `0 <hash>`
pub fn pay_to_witness_pub_key_hash(hash: &[u8]) -> ScriptVec {
    SmallVec::from_iter([OP_0, OP_DATA_20].into_iter().chain(hash.iter().copied()))
}

pub fn is_pay_to_pub_key_hash(script: &[u8]) -> bool {
    matches!(script, [OP_DUP, OP_HASH160, OP_DATA_20, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG] if hash.len() == HASH160_SIZE)
}

pub fn is_pay_to_script_hash(script: &[u8]) -> bool {
    matches!(script, [OP_HASH160, OP_DATA_20, hash @ .., OP_EQUAL] if hash.len() == HASH160_SIZE)
}

pub fn is_pay_to_witness_pub_key_hash(script: &[u8]) -> bool {
    matches!(script, [OP_0, OP_DATA_20, hash @ ..] if hash.len() == HASH160_SIZE)
}

/// The 20 byte hash committed to by a P2PKH, P2SH or P2WPKH script.
pub fn extract_hash(script: &[u8]) -> Option<&[u8]> {
    if is_pay_to_pub_key_hash(script) {
        Some(&script[3..23])
    } else if is_pay_to_script_hash(script) || is_pay_to_witness_pub_key_hash(script) {
        Some(&script[2..22])
    } else {
        None
    }
}

/// Appends the smallest push operation for `data`.
pub fn push_data(script: &mut Vec<u8>, data: &[u8]) {
    match data.len() {
        len if len < OP_PUSHDATA1 as usize => script.push(len as u8),
        len if len <= u8::MAX as usize => script.extend([OP_PUSHDATA1, len as u8]),
        len if len <= u16::MAX as usize => {
            script.push(OP_PUSHDATA2);
            script.extend((len as u16).to_le_bytes());
        }
        len => {
            script.push(OP_PUSHDATA4);
            script.extend((len as u32).to_le_bytes());
        }
    }
    script.extend_from_slice(data);
}

/// Splits a script consisting only of push operations into the pushed items.
pub fn parse_pushes(script: &[u8]) -> Option<Vec<&[u8]>> {
    let mut items = vec![];
    let mut rest = script;
    while let Some((&op, tail)) = rest.split_first() {
        let (len, tail) = match op {
            OP_0 => (0, tail),
            0x01..OP_PUSHDATA1 => (op as usize, tail),
            OP_PUSHDATA1 => (*tail.first()? as usize, tail.get(1..)?),
            OP_PUSHDATA2 => (u16::from_le_bytes(tail.get(..2)?.try_into().ok()?) as usize, tail.get(2..)?),
            OP_PUSHDATA4 => (u32::from_le_bytes(tail.get(..4)?.try_into().ok()?) as usize, tail.get(4..)?),
            _ => return None,
        };
        items.push(tail.get(..len)?);
        rest = tail.get(len..)?;
    }
    Some(items)
}

/// `push(signature) push(public key)`
pub fn pay_to_pub_key_hash_signature_script(signature: &[u8], public_key: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(signature.len() + public_key.len() + 2);
    push_data(&mut script, signature);
    push_data(&mut script, public_key);
    script
}

/// `push(redeem script)`, the signature script of a P2SH-wrapped witness spend.
pub fn pay_to_script_hash_signature_script(redeem_script: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(redeem_script.len() + 3);
    push_data(&mut script, redeem_script);
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scripts() {
        let hash = [0x75u8; 20];
        let p2pkh = pay_to_pub_key_hash(&hash);
        assert_eq!(p2pkh.len(), 25);
        assert!(is_pay_to_pub_key_hash(&p2pkh) && !is_pay_to_script_hash(&p2pkh));
        assert_eq!(extract_hash(&p2pkh), Some(&hash[..]));

        let p2sh = pay_to_script_hash(&hash);
        assert_eq!(p2sh.len(), 23);
        assert!(is_pay_to_script_hash(&p2sh) && !is_pay_to_witness_pub_key_hash(&p2sh));
        assert_eq!(extract_hash(&p2sh), Some(&hash[..]));

        let p2wpkh = pay_to_witness_pub_key_hash(&hash);
        assert_eq!(p2wpkh.len(), 22);
        assert!(is_pay_to_witness_pub_key_hash(&p2wpkh) && !is_pay_to_pub_key_hash(&p2wpkh));
        assert_eq!(extract_hash(&p2wpkh), Some(&hash[..]));

        assert_eq!(extract_hash(&p2wpkh[..21]), None);
        assert_eq!(extract_hash(&[0x51]), None);
        assert!(!p2pkh.spilled());
    }

    #[test]
    fn test_pushes() {
        for len in [0usize, 1, 75, 76, 255, 256, 70_000] {
            let data = vec![0xabu8; len];
            let mut script = vec![];
            push_data(&mut script, &data);
            push_data(&mut script, &[1, 2, 3]);
            let header = match len {
                0..=75 => 1,
                76..=255 => 2,
                256..=65535 => 3,
                _ => 5,
            };
            assert_eq!(script.len(), header + len + 4);
            assert_eq!(parse_pushes(&script).unwrap(), vec![&data[..], &[1, 2, 3][..]]);
        }
        assert_eq!(parse_pushes(&[]).unwrap(), Vec::<&[u8]>::new());
        assert!(parse_pushes(&[0x05, 1, 2]).is_none());
        assert!(parse_pushes(&[OP_DUP]).is_none());
        assert!(parse_pushes(&[OP_PUSHDATA2, 0x01]).is_none());
    }
}
