use super::{ScriptVec, builder::pay_to_address_script};
use crate::{config::params::ChainParams, errors::TxResult, hashing::sighash_type::SigHashType};
use std::fmt;
use zeroize::Zeroizing;

/// Everything needed to hash, sign and verify one input.
#[derive(Clone, Default)]
pub struct TxUnlock {
    pub private_key: Option<Zeroizing<[u8; 32]>>,
    /// Locking script of the output being spent.
    pub locking_script: ScriptVec,
    pub redeem_script: Option<Vec<u8>>,
    /// Value of the output being spent, required by witness sighashes.
    pub amount: Option<u64>,
    pub address: Option<String>,
    pub sighash_type: SigHashType,
}

impl TxUnlock {
    pub fn new(locking_script: ScriptVec) -> Self {
        Self { locking_script, ..Default::default() }
    }

    /// Unlock for an output paying `address`, with the locking script derived
    /// from the address.
    pub fn from_address(address: &str, params: &ChainParams) -> TxResult<Self> {
        Ok(Self {
            locking_script: pay_to_address_script(address, params)?,
            address: Some(address.to_string()),
            sighash_type: params.default_sighash_type,
            ..Default::default()
        })
    }

    pub fn with_private_key(mut self, private_key: [u8; 32]) -> Self {
        self.private_key = Some(Zeroizing::new(private_key));
        self
    }

    pub fn with_redeem_script(mut self, redeem_script: Vec<u8>) -> Self {
        self.redeem_script = Some(redeem_script);
        self
    }

    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_sighash_type(mut self, sighash_type: SigHashType) -> Self {
        self.sighash_type = sighash_type;
        self
    }
}

impl fmt::Debug for TxUnlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxUnlock")
            .field("private_key", &self.private_key.as_ref().map(|_| ".."))
            .field("locking_script", &faster_hex::hex_string(&self.locking_script))
            .field("redeem_script", &self.redeem_script.as_deref().map(faster_hex::hex_string))
            .field("amount", &self.amount)
            .field("address", &self.address)
            .field("sighash_type", &self.sighash_type.to_u8())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::params::BITCOIN_PARAMS, hashing::sighash_type::SIG_HASH_NONE, tx::script};

    #[test]
    fn test_from_address() {
        // cspell:disable
        let unlock = TxUnlock::from_address("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", &BITCOIN_PARAMS).unwrap();
        // cspell:enable
        assert!(script::is_pay_to_pub_key_hash(&unlock.locking_script));
        assert_eq!(unlock.sighash_type, BITCOIN_PARAMS.default_sighash_type);
        assert!(TxUnlock::from_address("not an address", &BITCOIN_PARAMS).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let unlock = TxUnlock::new(ScriptVec::from_slice(&[0x51])).with_private_key([0xab; 32]).with_amount(7).with_sighash_type(SIG_HASH_NONE);
        let debug = format!("{unlock:?}");
        assert!(!debug.contains("ab, ab") && !debug.contains("171"));
        assert!(debug.contains("amount: Some(7)"));
    }
}
