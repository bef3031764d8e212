use crate::{
    ChildNumber, CurveType, DerivationPath, Error, ExtendedKeyAttrs, Result, SEED_SIZE,
    types::{ChainCode, KeyFingerprint, PrivateKeyBytes},
};
use coinkit_core::trace;
use coinkit_hashes::{hash160, hmac_sha512};
use std::fmt::{self, Debug};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

/// Private scalar or compressed public point.
#[derive(Clone)]
pub(crate) enum KeyMaterial {
    Private(PrivateKeyBytes),
    Public(Vec<u8>),
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        if let KeyMaterial::Private(key) = self {
            key.zeroize();
        }
    }
}

/// A node of a derivation tree. Extended keys are immutable; every
/// derivation returns a new key.
#[derive(Clone)]
pub struct ExtendedKey {
    pub(crate) curve: CurveType,
    pub(crate) attrs: ExtendedKeyAttrs,
    pub(crate) key: KeyMaterial,
}

/// Creates the root key of a derivation tree.
///
/// The seed must be exactly [`SEED_SIZE`] bytes.
pub fn init_root(seed: &[u8], curve: CurveType) -> Result<ExtendedKey> {
    if seed.len() != SEED_SIZE {
        return Err(Error::InvalidSeedLength(seed.len()));
    }
    ExtendedKey::from_seed_bytes(seed, curve)
}

/// Derives the private key at an absolute `path` (for example `m/44'/0'/0'`)
/// from a seed.
pub fn derive_path(seed: &[u8], path: &str, curve: CurveType) -> Result<ExtendedKey> {
    let path = path.parse::<DerivationPath>()?;
    init_root(seed, curve)?.derive_path(&path)
}

fn split_hmac(i: &[u8; 64]) -> ([u8; 32], ChainCode) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

impl ExtendedKey {
    /// Maximum derivation depth.
    pub const MAX_DEPTH: u8 = u8::MAX;

    pub(crate) fn from_seed_bytes(seed: &[u8], curve: CurveType) -> Result<Self> {
        let i = Zeroizing::new(hmac_sha512(curve.domain_separator(), &[seed]));
        let (mut il, chain_code) = split_hmac(&i);
        let key = curve.root_key(&il);
        il.zeroize();
        let attrs = ExtendedKeyAttrs { chain_code, ..Default::default() };
        Ok(ExtendedKey { curve, attrs, key: KeyMaterial::Private(key?) })
    }

    pub fn curve(&self) -> CurveType {
        self.curve
    }

    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    pub fn depth(&self) -> u8 {
        self.attrs.depth
    }

    pub fn child_number(&self) -> ChildNumber {
        self.attrs.child_number
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.attrs.chain_code
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    /// Private scalar, big-endian; `None` for public keys.
    pub fn private_key(&self) -> Option<&PrivateKeyBytes> {
        match &self.key {
            KeyMaterial::Private(key) => Some(key),
            KeyMaterial::Public(_) => None,
        }
    }

    /// Compressed public point: 33 bytes on secp256k1, 32 bytes on ed25519.
    pub fn public_key(&self) -> Result<Vec<u8>> {
        match &self.key {
            KeyMaterial::Private(key) => self.curve.public_key(key),
            KeyMaterial::Public(point) => Ok(point.clone()),
        }
    }

    /// First four bytes of the hash160 of the public key.
    pub fn fingerprint(&self) -> Result<KeyFingerprint> {
        Ok(fingerprint(&self.public_key()?))
    }

    /// The public counterpart of this key.
    pub fn to_public(&self) -> Result<ExtendedKey> {
        Ok(ExtendedKey { curve: self.curve, attrs: self.attrs.clone(), key: KeyMaterial::Public(self.public_key()?) })
    }

    pub fn derive_private_child(&self, child_number: ChildNumber) -> Result<ExtendedKey> {
        let KeyMaterial::Private(private) = &self.key else {
            return Err(Error::NotPrivateExtendedKey);
        };
        let depth = self.attrs.depth.checked_add(1).ok_or(Error::DeriveBeyondMaxDepth)?;
        let parent_public = self.curve.public_key(private)?;

        let i = Zeroizing::new(if child_number.is_hardened() {
            hmac_sha512(&self.attrs.chain_code, &[&[0u8][..], &private[..], &child_number.to_bytes()[..]])
        } else {
            hmac_sha512(&self.attrs.chain_code, &[&parent_public[..], &child_number.to_bytes()[..]])
        });
        let (mut il, chain_code) = split_hmac(&i);
        let child = self.curve.tweak_private(private, &il);
        il.zeroize();
        let child = child?;

        trace!("derived private {} child {} at depth {}", self.curve, child_number, depth);
        Ok(ExtendedKey {
            curve: self.curve,
            attrs: ExtendedKeyAttrs { depth, parent_fingerprint: fingerprint(&parent_public), child_number, chain_code },
            key: KeyMaterial::Private(child),
        })
    }

    /// Public child key. A private parent derives the private child and
    /// neuters it; a public parent can only derive non-hardened children.
    pub fn derive_public_child(&self, child_number: ChildNumber) -> Result<ExtendedKey> {
        let point = match &self.key {
            KeyMaterial::Private(_) => return self.derive_private_child(child_number)?.to_public(),
            KeyMaterial::Public(point) => point,
        };
        if child_number.is_hardened() {
            return Err(Error::DeriveHardFromPublic);
        }
        let depth = self.attrs.depth.checked_add(1).ok_or(Error::DeriveBeyondMaxDepth)?;

        let i = hmac_sha512(&self.attrs.chain_code, &[&point[..], &child_number.to_bytes()[..]]);
        let (il, chain_code) = split_hmac(&i);
        let child = self.curve.tweak_public(point, &il)?;

        trace!("derived public {} child {} at depth {}", self.curve, child_number, depth);
        Ok(ExtendedKey {
            curve: self.curve,
            attrs: ExtendedKeyAttrs { depth, parent_fingerprint: fingerprint(point), child_number, chain_code },
            key: KeyMaterial::Public(child),
        })
    }

    /// Derives along `path` relative to this key; private keys derive private
    /// children, public keys public ones.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey> {
        path.iter().try_fold(self.clone(), |key, child_number| {
            if key.is_private() { key.derive_private_child(child_number) } else { key.derive_public_child(child_number) }
        })
    }
}

fn fingerprint(public_key: &[u8]) -> KeyFingerprint {
    let hash = hash160(public_key);
    [hash[0], hash[1], hash[2], hash[3]]
}

impl ConstantTimeEq for ExtendedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl PartialEq for ExtendedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ExtendedKey {}

impl Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("curve", &self.curve)
            .field("attrs", &self.attrs)
            .field("is_private", &self.is_private())
            .finish_non_exhaustive()
    }
}
