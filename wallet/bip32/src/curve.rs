//! Curve arithmetic used by key derivation.
//!
//! Every curve family implements [`Curve`]; [`CurveType`] is the runtime tag
//! carried by extended keys and dispatches to the matching implementation.

mod ed25519;
mod secp256k1;

pub use self::ed25519::Ed25519;
pub use self::secp256k1::Secp256k1;

use crate::{Error, Result, types::PrivateKeyBytes};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// Scalar and point operations needed by the derivation engine.
///
/// Private scalars are always exchanged as 32 big-endian bytes, public points
/// in the curve's compressed encoding.
pub trait Curve {
    const TYPE: CurveType;

    /// HMAC key used to turn a seed into the root key.
    const DOMAIN_SEPARATOR: &'static [u8];

    const PUBLIC_KEY_SIZE: usize;

    /// Turns the left half of the root HMAC into a private scalar.
    fn root_key(il: &[u8; 32]) -> Result<PrivateKeyBytes>;

    fn public_key(private: &PrivateKeyBytes) -> Result<Vec<u8>>;

    /// Private child scalar from the parent scalar and the derivation tweak `il`.
    fn tweak_private(parent: &PrivateKeyBytes, il: &[u8; 32]) -> Result<PrivateKeyBytes>;

    /// Public child point from the parent point and the derivation tweak `il`.
    fn tweak_public(parent: &[u8], il: &[u8; 32]) -> Result<Vec<u8>>;

    fn validate_private(private: &PrivateKeyBytes) -> Result<()>;

    fn validate_public(public: &[u8]) -> Result<()>;
}

/// Curve family of an extended key, fixed for a whole derivation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CurveType {
    Secp256k1 = 0,
    Ed25519 = 1,
}

macro_rules! dispatch {
    ($curve:expr, $method:ident ( $($arg:expr),* )) => {
        match $curve {
            CurveType::Secp256k1 => <Secp256k1 as Curve>::$method($($arg),*),
            CurveType::Ed25519 => <Ed25519 as Curve>::$method($($arg),*),
        }
    };
}

impl CurveType {
    /// Tag written into serialized extended keys.
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(CurveType::Secp256k1),
            1 => Some(CurveType::Ed25519),
            _ => None,
        }
    }

    pub fn domain_separator(self) -> &'static [u8] {
        match self {
            CurveType::Secp256k1 => Secp256k1::DOMAIN_SEPARATOR,
            CurveType::Ed25519 => Ed25519::DOMAIN_SEPARATOR,
        }
    }

    pub fn public_key_size(self) -> usize {
        match self {
            CurveType::Secp256k1 => Secp256k1::PUBLIC_KEY_SIZE,
            CurveType::Ed25519 => Ed25519::PUBLIC_KEY_SIZE,
        }
    }

    pub fn root_key(self, il: &[u8; 32]) -> Result<PrivateKeyBytes> {
        dispatch!(self, root_key(il))
    }

    pub fn public_key(self, private: &PrivateKeyBytes) -> Result<Vec<u8>> {
        dispatch!(self, public_key(private))
    }

    pub fn tweak_private(self, parent: &PrivateKeyBytes, il: &[u8; 32]) -> Result<PrivateKeyBytes> {
        dispatch!(self, tweak_private(parent, il))
    }

    pub fn tweak_public(self, parent: &[u8], il: &[u8; 32]) -> Result<Vec<u8>> {
        dispatch!(self, tweak_public(parent, il))
    }

    pub fn validate_private(self, private: &PrivateKeyBytes) -> Result<()> {
        dispatch!(self, validate_private(private))
    }

    pub fn validate_public(self, public: &[u8]) -> Result<()> {
        dispatch!(self, validate_public(public))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CurveType::Secp256k1 => "secp256k1",
            CurveType::Ed25519 => "ed25519",
        }
    }
}

impl Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(CurveType::Secp256k1),
            "ed25519" => Ok(CurveType::Ed25519),
            _ => Err(Error::UnknownCurve(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CurveType;

    #[test]
    fn test_curve_type_tags() {
        for curve in [CurveType::Secp256k1, CurveType::Ed25519] {
            assert_eq!(CurveType::from_tag(curve.tag()), Some(curve));
            assert_eq!(curve.to_string().parse::<CurveType>().unwrap(), curve);
        }
        assert_eq!(CurveType::from_tag(2), None);
        assert!("p256".parse::<CurveType>().is_err());
        assert_eq!(serde_json::to_string(&CurveType::Ed25519).unwrap(), "\"ed25519\"");
    }
}
