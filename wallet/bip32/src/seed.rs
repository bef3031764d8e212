use crate::{Error, Result};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

/// Seed length accepted by [`crate::init_root`].
pub const SEED_SIZE: usize = 32;

/// Root entropy of a derivation tree, wiped on drop.
#[derive(Clone)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    /// Fresh seed from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SEED_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Seed(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SEED_SIZE] = bytes.try_into().map_err(|_| Error::InvalidSeedLength(bytes.len()))?;
        Ok(Seed(bytes))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != SEED_SIZE * 2 {
            return Err(Error::InvalidSeedLength(hex.len() / 2));
        }
        let mut bytes = [0u8; SEED_SIZE];
        faster_hex::hex_decode(hex.as_bytes(), &mut bytes).map_err(|err| Error::InvalidSeed(err.to_string()))?;
        Ok(Seed(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(..)")
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let a = Seed::generate();
        let b = Seed::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert!(crate::init_root(a.as_ref(), crate::CurveType::Ed25519).is_ok());
    }

    #[test]
    fn test_from_hex() {
        let hex = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
        let seed = Seed::from_hex(hex).unwrap();
        assert_eq!(seed.as_bytes()[31], 0x1f);
        assert_eq!(Seed::from_hex(&hex[..32]).unwrap_err(), Error::InvalidSeedLength(16));
        assert!(matches!(Seed::from_hex(&hex.replace('0', "g")), Err(Error::InvalidSeed(_))));
        assert_eq!(Seed::from_slice(&[0u8; 20]).unwrap_err(), Error::InvalidSeedLength(20));
    }
}
