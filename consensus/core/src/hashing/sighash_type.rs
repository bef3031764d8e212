use crate::errors::TxError;
use serde::{Deserialize, Serialize};

pub const SIG_HASH_ALL: SigHashType = SigHashType(0x01);
pub const SIG_HASH_NONE: SigHashType = SigHashType(0x02);
pub const SIG_HASH_SINGLE: SigHashType = SigHashType(0x03);
pub const SIG_HASH_ANY_ONE_CAN_PAY: SigHashType = SigHashType(0x80);

/// SIG_HASH_MASK defines the number of bits of the hash type which are used
/// to identify which outputs are signed.
pub const SIG_HASH_MASK: u8 = 0x1f;

const ALLOWED_SIG_HASH_TYPES_VALUES: [u8; 6] = [
    SIG_HASH_ALL.0,
    SIG_HASH_NONE.0,
    SIG_HASH_SINGLE.0,
    SIG_HASH_ALL.0 | SIG_HASH_ANY_ONE_CAN_PAY.0,
    SIG_HASH_NONE.0 | SIG_HASH_ANY_ONE_CAN_PAY.0,
    SIG_HASH_SINGLE.0 | SIG_HASH_ANY_ONE_CAN_PAY.0,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SigHashType(pub(crate) u8);

impl SigHashType {
    pub fn is_sighash_all(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_ALL.0
    }

    pub fn is_sighash_none(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_NONE.0
    }

    pub fn is_sighash_single(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_SINGLE.0
    }

    pub fn is_sighash_anyone_can_pay(self) -> bool {
        self.0 & SIG_HASH_ANY_ONE_CAN_PAY.0 == SIG_HASH_ANY_ONE_CAN_PAY.0
    }

    pub fn to_u8(self) -> u8 {
        self.0
    }

    pub fn from_u8(val: u8) -> Result<Self, TxError> {
        if !ALLOWED_SIG_HASH_TYPES_VALUES.contains(&val) {
            return Err(TxError::InvalidSigHashType(val));
        }

        Ok(Self(val))
    }
}

impl Default for SigHashType {
    fn default() -> Self {
        SIG_HASH_ALL
    }
}

impl TryFrom<u8> for SigHashType {
    type Error = TxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<SigHashType> for u8 {
    fn from(value: SigHashType) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sighash_type_flags() {
        let single_acp = SigHashType::from_u8(0x83).unwrap();
        assert!(single_acp.is_sighash_single() && single_acp.is_sighash_anyone_can_pay());
        assert!(!single_acp.is_sighash_all());
        assert!(SIG_HASH_NONE.is_sighash_none());
        assert_eq!(SigHashType::default(), SIG_HASH_ALL);

        for invalid in [0x00, 0x04, 0x80, 0x41, 0xff] {
            assert_eq!(SigHashType::from_u8(invalid), Err(TxError::InvalidSigHashType(invalid)));
        }
    }

    #[test]
    fn test_sighash_type_serde() {
        assert_eq!(serde_json::to_string(&SIG_HASH_SINGLE).unwrap(), "3");
        assert_eq!(serde_json::from_str::<SigHashType>("129").unwrap().to_u8(), 0x81);
        assert!(serde_json::from_str::<SigHashType>("7").is_err());
    }
}
