mod builder;
pub(crate) mod codec;
pub mod script;
mod unlock;

pub use builder::{PaymentOutput, pay_to_address_script, SEQUENCE_FINAL, SEQUENCE_LOCKTIME_ENABLED, SEQUENCE_REPLACEABLE, build_empty, sequence_for};
pub use unlock::TxUnlock;

use coinkit_hashes::{Hash, sha256d};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Transaction ids are kept in the byte order shown by explorers and RPC
/// interfaces, i.e. reversed relative to the wire encoding.
pub type TransactionId = Hash;

/// Size of the inner array of a [`ScriptVec`], enough for every standard
/// locking script without a heap allocation.
pub const SCRIPT_VECTOR_SIZE: usize = 36;

pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

/// Segwit witness of a key hash spend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// DER signature followed by the sighash type byte.
    pub signature: Vec<u8>,
    pub public_key: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u32,
    pub witness: Option<Witness>,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, sequence: u32) -> Self {
        Self { previous_outpoint, signature_script: vec![], sequence, witness: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: ScriptVec,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: ScriptVec) -> Self {
        Self { value, script_public_key }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: u32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(|input| input.witness.is_some())
    }

    /// Double SHA-256 of the encoding without witnesses, in display order.
    pub fn id(&self) -> TransactionId {
        sha256d(&self.serialize_without_witness()).reversed()
    }

    /// The same transaction with every signature script and witness removed.
    pub fn skeleton(&self) -> Self {
        let mut tx = self.clone();
        for input in tx.inputs.iter_mut() {
            input.signature_script.clear();
            input.witness = None;
        }
        tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_id_ignores_witness() {
        let prev = TransactionId::from_str("880eb9819a31821d9d2399e2f35e2433b72637e393d71ecc9b8d0250f49153c3").unwrap();
        let mut tx = Transaction::new(
            2,
            vec![TransactionInput::new(TransactionOutpoint::new(prev, 3), SEQUENCE_FINAL)],
            vec![TransactionOutput::new(1000, ScriptVec::from_slice(&[0x51]))],
            0,
        );
        let id = tx.id();
        tx.inputs[0].witness = Some(Witness { signature: vec![1, 2, 3], public_key: vec![4, 5] });
        assert!(tx.has_witness());
        assert_eq!(tx.id(), id);
        assert!(!tx.skeleton().has_witness());

        tx.inputs[0].signature_script = vec![0x00];
        assert_ne!(tx.id(), id);
        assert_eq!(tx.skeleton().id(), id);
    }
}
