use crate::{Blake256, Hash};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

pub type HmacSha512 = Hmac<Sha512>;

pub const HASH160_SIZE: usize = 20;

pub fn sha256(data: &[u8]) -> Hash {
    Hash::from_bytes(Sha256::digest(data).into())
}

/// SHA-256 applied twice.
pub fn sha256d(data: &[u8]) -> Hash {
    Hash::from_bytes(Sha256::digest(Sha256::digest(data)).into())
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// HMAC-SHA512 over the concatenation of `parts`.
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    // HMAC accepts keys of any length
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key).unwrap_or_else(|_| unreachable!());
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

pub fn ripemd160(data: &[u8]) -> [u8; HASH160_SIZE] {
    Ripemd160::digest(data).into()
}

/// RIPEMD-160 of SHA-256.
pub fn hash160(data: &[u8]) -> [u8; HASH160_SIZE] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// First 20 bytes of the 64 byte Blake2b digest.
pub fn blake2b_160(data: &[u8]) -> [u8; HASH160_SIZE] {
    let digest = blake2b_simd::blake2b(data);
    let mut out = [0u8; HASH160_SIZE];
    out.copy_from_slice(&digest.as_bytes()[..HASH160_SIZE]);
    out
}

pub fn blake256(data: &[u8]) -> Hash {
    Hash::from_bytes(Blake256::digest(data))
}

/// BLAKE-256 applied twice.
pub fn blake256d(data: &[u8]) -> Hash {
    Hash::from_bytes(Blake256::digest(&Blake256::digest(data)))
}

/// RIPEMD-160 of BLAKE-256.
pub fn blake256_hash160(data: &[u8]) -> [u8; HASH160_SIZE] {
    Ripemd160::digest(Blake256::digest(data)).into()
}

pub fn keccak256(data: &[u8]) -> Hash {
    Hash::from_bytes(Keccak256::digest(data).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        faster_hex::hex_string(bytes)
    }

    #[test]
    fn test_sha256_vectors() {
        assert_eq!(sha256(b"").to_string(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
        assert_eq!(sha256(b"abc").to_string(), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        assert_eq!(sha256d(b"").to_string(), "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456");
    }

    #[test]
    fn test_hash160_vectors() {
        assert_eq!(hex(&ripemd160(b"")), "9c1185a5c5e9fc54612808977ee8f548b2258d31");
        assert_eq!(hex(&hash160(b"")), "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb");
    }

    #[test]
    fn test_keccak256_vector() {
        assert_eq!(keccak256(b"").to_string(), "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
    }

    #[test]
    fn test_hmac_sha512_parts() {
        let joined = hmac_sha512(b"key", &[b"hello world"]);
        let split = hmac_sha512(b"key", &[b"hello", b" ", b"world"]);
        assert_eq!(joined, split);
        assert_ne!(joined, hmac_sha512(b"other key", &[b"hello world"]));
    }

    #[test]
    fn test_blake2b_160_vectors() {
        assert_eq!(hex(&blake2b_160(b"")), "786a02f742015903c6c6fd852552d272912f4740");
        assert_eq!(hex(&blake2b_160(b"abc")), "ba80a53f981c4d0d6a2797b69f12f6e94c212f14");
        // Truncation, not a Blake2b instance parameterized for 20 bytes.
        assert_ne!(hex(&blake2b_160(b"abc")), "384264f676f39536840523f284921cdc68b6846b");
    }

    #[test]
    fn test_double_hashes() {
        let data = b"coinkit double hashing";
        assert_eq!(sha256d(data), sha256(sha256(data).as_ref()));
        assert_eq!(blake256d(data), blake256(blake256(data).as_ref()));
        assert_eq!(blake256_hash160(data), ripemd160(blake256(data).as_ref()));
    }
}
