use super::{ScriptVec, Transaction, TransactionInput, TransactionOutpoint, TransactionOutput, script};
use crate::{
    config::params::ChainParams,
    errors::{TxError, TxResult},
};
use coinkit_core::debug;
use serde::{Deserialize, Serialize};

pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;
pub const SEQUENCE_LOCKTIME_ENABLED: u32 = 0xffff_fffe;
/// Opts into replace-by-fee.
pub const SEQUENCE_REPLACEABLE: u32 = 0xffff_fffd;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub address: String,
    pub amount: u64,
}

impl PaymentOutput {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self { address: address.into(), amount }
    }
}

pub fn sequence_for(lock_time: u32, replaceable: bool) -> u32 {
    if replaceable {
        SEQUENCE_REPLACEABLE
    } else if lock_time != 0 {
        SEQUENCE_LOCKTIME_ENABLED
    } else {
        SEQUENCE_FINAL
    }
}

/// Locking script paying `address`, tried as P2PKH, then P2SH, then P2WPKH.
pub fn pay_to_address_script(address: &str, params: &ChainParams) -> TxResult<ScriptVec> {
    if let Ok(hash) = params.p2pkh.decode(address) {
        return Ok(script::pay_to_pub_key_hash(&hash));
    }
    if let Ok(hash) = params.p2sh.decode(address) {
        return Ok(script::pay_to_script_hash(&hash));
    }
    if let Some(hash) = params.p2wpkh.as_ref().and_then(|profile| profile.decode(address).ok()) {
        return Ok(script::pay_to_witness_pub_key_hash(&hash));
    }
    Err(TxError::UnsupportedAddress(address.to_string()))
}

/// Builds the unsigned transaction spending `inputs` into `outputs`.
pub fn build_empty(
    inputs: &[TransactionOutpoint],
    outputs: &[PaymentOutput],
    lock_time: u32,
    replaceable: bool,
    params: &ChainParams,
) -> TxResult<Transaction> {
    let sequence = sequence_for(lock_time, replaceable);
    let outputs = outputs
        .iter()
        .map(|output| Ok(TransactionOutput::new(output.amount, pay_to_address_script(&output.address, params)?)))
        .collect::<TxResult<Vec<_>>>()?;
    let inputs = inputs.iter().map(|outpoint| TransactionInput::new(*outpoint, sequence)).collect::<Vec<_>>();
    debug!("built {} transaction with {} inputs and {} outputs", params.name, inputs.len(), outputs.len());
    Ok(Transaction::new(params.tx_version, inputs, outputs, lock_time))
}
