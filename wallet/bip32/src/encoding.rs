//! Serialization of extended keys.
//!
//! Layout before base58-check encoding:
//!
//! | bytes | field                                              |
//! |-------|----------------------------------------------------|
//! | 4     | version, distinct for private and public keys      |
//! | 1     | curve tag                                          |
//! | 1     | depth                                              |
//! | 4     | parent fingerprint                                 |
//! | 4     | child number, big-endian                           |
//! | 32    | chain code                                         |
//! | 33    | key: `0x00 || key` for private and ed25519 keys,   |
//! |       | otherwise the 33 byte compressed secp256k1 point   |

use crate::{
    ChildNumber, CurveType, Error, ExtendedKey, ExtendedKeyAttrs, KEY_SIZE, Result,
    xkey::KeyMaterial,
};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use zeroize::{Zeroize, Zeroizing};

/// Version prefix of a serialized extended key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    Private,
    Public,
}

impl Version {
    pub const PRIVATE_BYTES: [u8; 4] = [0x04, 0x88, 0xad, 0xe4];
    pub const PUBLIC_BYTES: [u8; 4] = [0x04, 0x88, 0xb2, 0x1e];

    pub fn to_bytes(self) -> [u8; 4] {
        match self {
            Version::Private => Self::PRIVATE_BYTES,
            Version::Public => Self::PUBLIC_BYTES,
        }
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Option<Self> {
        match bytes {
            Self::PRIVATE_BYTES => Some(Version::Private),
            Self::PUBLIC_BYTES => Some(Version::Public),
            _ => None,
        }
    }
}

const KEY_OFFSET: usize = 46;

impl ExtendedKey {
    /// Size of a serialized extended key without the base58 checksum.
    pub const BYTE_SIZE: usize = KEY_OFFSET + KEY_SIZE + 1;

    pub fn version(&self) -> Version {
        if self.is_private() { Version::Private } else { Version::Public }
    }

    /// Whether the key field carries the `0x00` marker byte.
    fn has_marker(is_private: bool, curve: CurveType) -> bool {
        is_private || curve == CurveType::Ed25519
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; Self::BYTE_SIZE]> {
        let mut bytes = Zeroizing::new([0u8; Self::BYTE_SIZE]);
        bytes[..4].copy_from_slice(&self.version().to_bytes());
        bytes[4] = self.curve.tag();
        bytes[5] = self.attrs.depth;
        bytes[6..10].copy_from_slice(&self.attrs.parent_fingerprint);
        bytes[10..14].copy_from_slice(&self.attrs.child_number.to_bytes());
        bytes[14..KEY_OFFSET].copy_from_slice(&self.attrs.chain_code);
        let key: &[u8] = match &self.key {
            KeyMaterial::Private(key) => key,
            KeyMaterial::Public(point) => point,
        };
        let start = if Self::has_marker(self.is_private(), self.curve) { KEY_OFFSET + 1 } else { KEY_OFFSET };
        bytes[start..].copy_from_slice(key);
        bytes
    }

    /// Base58-check encoding of [`Self::to_bytes`].
    pub fn encode(&self) -> String {
        bs58::encode(&self.to_bytes()[..]).with_check().into_string()
    }

    /// Parses a serialized key. Every failure, including key material that is
    /// not a valid scalar or point of its curve, is reported as
    /// [`Error::InvalidAddress`].
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = Zeroizing::new(bs58::decode(encoded).with_check(None).into_vec()?);
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTE_SIZE {
            return Err(Error::InvalidAddress(format!("expected {} bytes, got {}", Self::BYTE_SIZE, bytes.len())));
        }
        let version = Version::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
            .ok_or_else(|| Error::InvalidAddress(format!("unknown version {:02x?}", &bytes[..4])))?;
        let curve = CurveType::from_tag(bytes[4]).ok_or_else(|| Error::InvalidAddress(format!("unknown curve tag {}", bytes[4])))?;
        let is_private = version == Version::Private;

        let mut attrs = ExtendedKeyAttrs { depth: bytes[5], ..Default::default() };
        attrs.parent_fingerprint.copy_from_slice(&bytes[6..10]);
        attrs.child_number = ChildNumber::from_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);
        attrs.chain_code.copy_from_slice(&bytes[14..KEY_OFFSET]);

        let key = if Self::has_marker(is_private, curve) {
            if bytes[KEY_OFFSET] != 0 {
                return Err(Error::InvalidAddress("missing key marker".into()));
            }
            &bytes[KEY_OFFSET + 1..]
        } else {
            &bytes[KEY_OFFSET..]
        };

        let key = if is_private {
            let mut private = [0u8; KEY_SIZE];
            private.copy_from_slice(key);
            if let Err(err) = curve.validate_private(&private) {
                private.zeroize();
                return Err(Error::InvalidAddress(err.to_string()));
            }
            KeyMaterial::Private(private)
        } else {
            curve.validate_public(key).map_err(|err| Error::InvalidAddress(err.to_string()))?;
            KeyMaterial::Public(key.to_vec())
        };

        Ok(ExtendedKey { curve, attrs, key })
    }
}

impl Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(encoded: &str) -> Result<Self> {
        Self::decode(encoded)
    }
}
