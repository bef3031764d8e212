use crate::{Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Index of a particular child key for a given (extended) private key.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ChildNumber(pub u32);

impl ChildNumber {
    /// Hardened child keys use indices 2^31 through 2^32-1.
    pub const HARDENED_FLAG: u32 = 1 << 31;

    /// Create new [`ChildNumber`] with the given index and hardened flag.
    ///
    /// Returns an error if the index is 2^31 or above.
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index & Self::HARDENED_FLAG != 0 {
            return Err(Error::InvalidChildNumber(index.to_string()));
        }
        Ok(Self(if hardened { index | Self::HARDENED_FLAG } else { index }))
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Serialize this child number as big endian bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Index without the hardened flag.
    pub fn index(self) -> u32 {
        self.0 & !Self::HARDENED_FLAG
    }

    pub fn is_hardened(self) -> bool {
        self.0 & Self::HARDENED_FLAG != 0
    }
}

impl From<u32> for ChildNumber {
    fn from(n: u32) -> ChildNumber {
        ChildNumber(n)
    }
}

impl From<ChildNumber> for u32 {
    fn from(n: ChildNumber) -> u32 {
        n.0
    }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())?;
        if self.is_hardened() { f.write_str("'") } else { Ok(()) }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(child: &str) -> Result<ChildNumber> {
        let (digits, hardened) = match child.strip_suffix('\'') {
            Some(digits) => (digits, true),
            None => (child, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidChildNumber(child.to_string()));
        }
        let index = digits.parse::<u32>().map_err(|_| Error::InvalidChildNumber(child.to_string()))?;
        ChildNumber::new(index, hardened).map_err(|_| Error::InvalidChildNumber(child.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::ChildNumber;

    #[test]
    fn test_parse_and_display() {
        let cases = [("0", 0, false), ("44'", 44, true), ("2147483647'", 2147483647, true), ("7", 7, false)];
        for (text, index, hardened) in cases {
            let child = text.parse::<ChildNumber>().unwrap();
            assert_eq!(child.index(), index);
            assert_eq!(child.is_hardened(), hardened);
            assert_eq!(child.to_string(), text);
        }
    }

    #[test]
    fn test_invalid() {
        for text in ["", "'", "-1", "+1", "1h", "x", "2147483648", "4294967296", "1''"] {
            assert!(text.parse::<ChildNumber>().is_err(), "{text} should be rejected");
        }
        assert!(ChildNumber::new(ChildNumber::HARDENED_FLAG, false).is_err());
    }

    #[test]
    fn test_bytes() {
        let child = ChildNumber::new(1, true).unwrap();
        assert_eq!(child.to_bytes(), [0x80, 0, 0, 1]);
        assert_eq!(ChildNumber::from_bytes(child.to_bytes()), child);
    }
}
