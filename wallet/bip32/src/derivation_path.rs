//! Absolute derivation paths such as `m/44'/0'/0'/0/1`.

use crate::{ChildNumber, Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Prefix for all derivation paths.
const PREFIX: &str = "m";

/// Path from a root key. Only absolute paths are accepted; `""` and `"m"`
/// both denote the root itself.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DerivationPath {
    path: Vec<ChildNumber>,
}

impl DerivationPath {
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.path.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `None` if this is already the root path.
    pub fn parent(&self) -> Option<Self> {
        self.path.len().checked_sub(1).map(|n| DerivationPath { path: self.path[..n].to_vec() })
    }

    pub fn push(&mut self, child_number: ChildNumber) {
        self.path.push(child_number)
    }

    /// A copy of this path extended by one child.
    pub fn child(&self, child_number: ChildNumber) -> Self {
        let mut path = self.clone();
        path.push(child_number);
        path
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.path
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(path: Vec<ChildNumber>) -> Self {
        Self { path }
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;
        for child_number in self.iter() {
            write!(f, "/{}", child_number)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        if path.is_empty() || path == PREFIX {
            return Ok(DerivationPath::default());
        }
        let invalid = || Error::InvalidDerivedPath(path.to_string());
        let rest = path.strip_prefix(PREFIX).and_then(|rest| rest.strip_prefix('/')).ok_or_else(invalid)?;
        let path = rest.split('/').map(|segment| segment.parse::<ChildNumber>().map_err(|_| invalid())).collect::<Result<_>>()?;
        Ok(DerivationPath { path })
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> std::vec::IntoIter<ChildNumber> {
        self.path.into_iter()
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<DerivationPath, D::Error> {
        struct DerivationPathVisitor;
        impl de::Visitor<'_> for DerivationPathVisitor {
            type Value = DerivationPath;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an absolute derivation path such as m/44'/0'/0'")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
                DerivationPath::from_str(value).map_err(|err| de::Error::custom(err.to_string()))
            }
        }

        deserializer.deserialize_str(DerivationPathVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::DerivationPath;
    use crate::{ChildNumber, Error};

    #[test]
    fn round_trip() {
        for path in ["m", "m/0", "m/0/2147483647'", "m/44'/88'/0'", "m/0/2147483647'/1/2147483646'/2"] {
            assert_eq!(path.parse::<DerivationPath>().unwrap().to_string(), path);
        }
    }

    #[test]
    fn root_paths() {
        assert!("".parse::<DerivationPath>().unwrap().is_empty());
        assert!("m".parse::<DerivationPath>().unwrap().is_empty());
    }

    #[test]
    fn rejects_relative_and_malformed() {
        for path in ["44'/0'", "/44'", "m/", "m//1", "m/a", "m/1/", "n/1", "M/1", "m/1h", "m/2147483648"] {
            assert_eq!(path.parse::<DerivationPath>(), Err(Error::InvalidDerivedPath(path.to_string())), "{path}");
        }
    }

    #[test]
    fn parent() {
        let path = "m/0/2147483647'".parse::<DerivationPath>().unwrap();
        let path_m_0 = path.parent().unwrap();
        assert_eq!("m/0", path_m_0.to_string());
        let path_m = path_m_0.parent().unwrap();
        assert_eq!("m", path_m.to_string());
        assert_eq!(path_m.parent(), None);
        assert_eq!(path_m_0.child(ChildNumber(5)).to_string(), "m/0/5");
    }

    #[test]
    fn serde() {
        let path = "m/44'/501'/0'".parse::<DerivationPath>().unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"m/44'/501'/0'\"");
        assert_eq!(serde_json::from_str::<DerivationPath>(&json).unwrap(), path);
    }
}
