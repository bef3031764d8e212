use super::{WriterExtensions, sighash_type::SigHashType};
use crate::{
    config::params::{ChainParams, SigHashDigest},
    errors::{TxError, TxResult},
    tx::{
        ScriptVec, Transaction, TxUnlock,
        codec::{write_outpoint, write_output},
        script,
    },
};
use coinkit_core::trace;
use coinkit_hashes::{Hash, ZERO_HASH, sha256d};

/// Returned by the legacy algorithm for SIGHASH_SINGLE without a matching output.
const SIGHASH_SINGLE_OUT_OF_RANGE: Hash = {
    let mut bytes = [0u8; 32];
    bytes[0] = 1;
    Hash::from_bytes(bytes)
};

/// Output value written in place of the outputs preceding the signed one
/// under legacy SIGHASH_SINGLE.
const BLANK_OUTPUT_VALUE: u64 = u64::MAX;

/// BIP-143 intermediate hashes shared by every input of a transaction.
#[derive(Default)]
pub struct SigHashReusedValues {
    previous_outputs_hash: Option<Hash>,
    sequence_hash: Option<Hash>,
    outputs_hash: Option<Hash>,
}

impl SigHashReusedValues {
    pub fn new() -> Self {
        Self { previous_outputs_hash: None, sequence_hash: None, outputs_hash: None }
    }
}

fn previous_outputs_hash(tx: &Transaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return ZERO_HASH;
    }

    *reused_values.previous_outputs_hash.get_or_insert_with(|| {
        let mut buf = Vec::with_capacity(tx.inputs.len() * 36);
        for input in tx.inputs.iter() {
            write_outpoint(&mut buf, &input.previous_outpoint);
        }
        sha256d(&buf)
    })
}

fn sequence_hash(tx: &Transaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_single() || hash_type.is_sighash_anyone_can_pay() || hash_type.is_sighash_none() {
        return ZERO_HASH;
    }

    *reused_values.sequence_hash.get_or_insert_with(|| {
        let mut buf = Vec::with_capacity(tx.inputs.len() * 4);
        for input in tx.inputs.iter() {
            buf.write_u32(input.sequence);
        }
        sha256d(&buf)
    })
}

fn outputs_hash(tx: &Transaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues, input_index: usize) -> Hash {
    if hash_type.is_sighash_none() {
        return ZERO_HASH;
    }

    if hash_type.is_sighash_single() {
        // If the relevant output exists - return its hash, otherwise return zero-hash
        let Some(output) = tx.outputs.get(input_index) else {
            return ZERO_HASH;
        };
        let mut buf = vec![];
        write_output(&mut buf, output);
        return sha256d(&buf);
    }

    *reused_values.outputs_hash.get_or_insert_with(|| {
        let mut buf = vec![];
        for output in tx.outputs.iter() {
            write_output(&mut buf, output);
        }
        sha256d(&buf)
    })
}

/// Script code committed to by a witness signature: the redeem script when
/// there is one, otherwise the locking script, with key hash programs
/// expanded to the equivalent P2PKH script.
pub fn witness_script_code(unlock: &TxUnlock) -> ScriptVec {
    let script = unlock.redeem_script.as_deref().unwrap_or(&unlock.locking_script[..]);
    if script::is_pay_to_witness_pub_key_hash(script) { script::pay_to_pub_key_hash(&script[2..]) } else { ScriptVec::from_slice(script) }
}

/// Preimage of the pre-segwit signature hash of input `input_index`.
///
/// Equivalent to serializing a copy of the transaction in which every
/// signature script is cleared, the signed input carries `script_code`, and
/// the inputs and outputs are masked according to `hash_type`.
pub(crate) fn legacy_preimage(tx: &Transaction, input_index: usize, script_code: &[u8], hash_type: SigHashType) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(tx.serialize_without_witness().len() + script_code.len() + 4);
    preimage.write_u32(tx.version);

    let anyone_can_pay = hash_type.is_sighash_anyone_can_pay();
    let zero_other_sequences = hash_type.is_sighash_none() || hash_type.is_sighash_single();
    preimage.write_len(if anyone_can_pay { 1 } else { tx.inputs.len() });
    for (i, input) in tx.inputs.iter().enumerate() {
        if anyone_can_pay && i != input_index {
            continue;
        }
        write_outpoint(&mut preimage, &input.previous_outpoint);
        if i == input_index {
            preimage.write_var_bytes(script_code).write_u32(input.sequence);
        } else {
            preimage.write_var_bytes(&[]).write_u32(if zero_other_sequences { 0 } else { input.sequence });
        }
    }

    if hash_type.is_sighash_none() {
        preimage.write_len(0);
    } else if hash_type.is_sighash_single() {
        preimage.write_len(input_index + 1);
        for _ in 0..input_index {
            preimage.write_u64(BLANK_OUTPUT_VALUE).write_var_bytes(&[]);
        }
        write_output(&mut preimage, &tx.outputs[input_index]);
    } else {
        preimage.write_len(tx.outputs.len());
        for output in tx.outputs.iter() {
            write_output(&mut preimage, output);
        }
    }

    preimage.write_u32(tx.lock_time).write_u32(hash_type.to_u8() as u32);
    preimage
}

pub fn calc_legacy_signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    hash_type: SigHashType,
    digest: SigHashDigest,
) -> Hash {
    if hash_type.is_sighash_single() && input_index >= tx.outputs.len() {
        return SIGHASH_SINGLE_OUT_OF_RANGE;
    }
    digest.digest(&legacy_preimage(tx, input_index, script_code, hash_type))
}

pub(crate) fn segwit_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    amount: u64,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Vec<u8> {
    let input = &tx.inputs[input_index];
    let mut preimage = Vec::with_capacity(160 + script_code.len());
    preimage
        .write_u32(tx.version)
        .write_bytes(previous_outputs_hash(tx, hash_type, reused_values).as_ref())
        .write_bytes(sequence_hash(tx, hash_type, reused_values).as_ref());
    write_outpoint(&mut preimage, &input.previous_outpoint);
    preimage
        .write_var_bytes(script_code)
        .write_u64(amount)
        .write_u32(input.sequence)
        .write_bytes(outputs_hash(tx, hash_type, reused_values, input_index).as_ref())
        .write_u32(tx.lock_time)
        .write_u32(hash_type.to_u8() as u32);
    preimage
}

pub fn calc_segwit_signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    amount: u64,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
    digest: SigHashDigest,
) -> Hash {
    digest.digest(&segwit_preimage(tx, input_index, script_code, amount, hash_type, reused_values))
}

/// Signature hashes of every input of the unsigned `tx`.
///
/// Inputs locked by a plain P2PKH script use the legacy algorithm, every
/// other input the BIP-143 one, which needs the spent amount.
pub fn compute_sighashes(tx: &Transaction, unlocks: &[TxUnlock], params: &ChainParams) -> TxResult<Vec<Hash>> {
    if tx.inputs.len() != unlocks.len() {
        return Err(TxError::UnlockCountMismatch { expected: tx.inputs.len(), actual: unlocks.len() });
    }

    let mut reused_values = SigHashReusedValues::new();
    let sighashes = unlocks
        .iter()
        .enumerate()
        .map(|(i, unlock)| {
            if script::is_pay_to_pub_key_hash(&unlock.locking_script) {
                Ok(calc_legacy_signature_hash(tx, i, &unlock.locking_script, unlock.sighash_type, params.sighash_digest))
            } else {
                let amount = unlock.amount.ok_or(TxError::MissingAmount(i))?;
                let script_code = witness_script_code(unlock);
                Ok(calc_segwit_signature_hash(tx, i, &script_code, amount, unlock.sighash_type, &mut reused_values, params.sighash_digest))
            }
        })
        .collect::<TxResult<Vec<_>>>()?;
    trace!("computed {} signature hashes", sighashes.len());
    Ok(sighashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::params::BITCOIN_PARAMS,
        hashing::sighash_type::{SIG_HASH_ALL, SIG_HASH_ANY_ONE_CAN_PAY, SIG_HASH_NONE, SIG_HASH_SINGLE},
        tx::{TransactionInput, TransactionOutpoint, TransactionOutput},
    };
    use std::str::FromStr;

    fn hex(s: &str) -> Vec<u8> {
        let mut out = vec![0u8; s.len() / 2];
        faster_hex::hex_decode(s.as_bytes(), &mut out).unwrap();
        out
    }

    // Native P2WPKH example of BIP-143.
    const BIP143_UNSIGNED_TX: &str = concat!(
        "0100000002fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f0000000000eeffffff",
        "ef51e1b804cc89d182d279655c3aa89e815b1b309fe287d9b2b55d57b90ec68a0100000000ffffffff",
        "02202cb206000000001976a9148280b37df378db99f66f85c95a783a76ac7a6d5988ac",
        "9093510d000000001976a9143bde42dbee7e4dbe6a21b2d50ce2f0167faa815988ac11000000"
    );

    #[test]
    fn test_bip143_native_p2wpkh() {
        let tx = Transaction::from_hex(BIP143_UNSIGNED_TX).unwrap();
        assert_eq!(tx.version, 1);
        assert_eq!(tx.lock_time, 0x11);

        let mut reused_values = SigHashReusedValues::new();
        assert_eq!(
            previous_outputs_hash(&tx, SIG_HASH_ALL, &mut reused_values).to_string(),
            "96b827c8483d4e9b96712b6713a7b68d6e8003a781feba36c31143470b4efd37"
        );
        assert_eq!(
            sequence_hash(&tx, SIG_HASH_ALL, &mut reused_values).to_string(),
            "52b0a642eea2fb7ae638c36f6252b6750293dbe574a806984b8e4d8548339a3b"
        );
        assert_eq!(
            outputs_hash(&tx, SIG_HASH_ALL, &mut reused_values, 1).to_string(),
            "863ef3e1a92afbfdb97f31ad0fc7683ee943e9abcf2501590ff8f6551f47e5e5"
        );

        let unlocks = vec![
            TxUnlock::new(ScriptVec::from_vec(hex("2103c9f4836b9a4f77fc0d81f7bcb01b7f1b35916864b9476c241ce9fc198bd25432ac")))
                .with_amount(625_000_000),
            TxUnlock::new(ScriptVec::from_vec(hex("00141d0f172a0ecb48aee1be1f2687d2963ae33f71a1"))).with_amount(600_000_000),
        ];
        assert_eq!(witness_script_code(&unlocks[1]).as_slice(), hex("76a9141d0f172a0ecb48aee1be1f2687d2963ae33f71a188ac"));
        let sighashes = compute_sighashes(&tx, &unlocks, &BITCOIN_PARAMS).unwrap();
        assert_eq!(sighashes[1].to_string(), "c37af31116d1b27caf68aae9e3ac82f1477929014d5b917657d0eb49478cb670");

        // The single round variant is the SHA-256 of the preimage.
        let preimage = segwit_preimage(&tx, 1, &witness_script_code(&unlocks[1]), 600_000_000, SIG_HASH_ALL, &mut reused_values);
        assert_eq!(sha256d(&preimage), sighashes[1]);
        let single = ChainParams { sighash_digest: SigHashDigest::Sha256, ..BITCOIN_PARAMS };
        assert_eq!(compute_sighashes(&tx, &unlocks, &single).unwrap()[1], coinkit_hashes::sha256(&preimage));
    }

    #[test]
    fn test_missing_amount_and_count() {
        let tx = Transaction::from_hex(BIP143_UNSIGNED_TX).unwrap();
        let p2wpkh = TxUnlock::new(ScriptVec::from_vec(hex("00141d0f172a0ecb48aee1be1f2687d2963ae33f71a1")));
        assert_eq!(
            compute_sighashes(&tx, &[p2wpkh.clone().with_amount(1), p2wpkh.clone()], &BITCOIN_PARAMS),
            Err(TxError::MissingAmount(1))
        );
        assert_eq!(
            compute_sighashes(&tx, &[p2wpkh.clone()], &BITCOIN_PARAMS),
            Err(TxError::UnlockCountMismatch { expected: 2, actual: 1 })
        );
    }

    fn legacy_tx() -> Transaction {
        let id = |n: u8| Hash::from_bytes([n; 32]);
        let output = |value: u64, n: u8| TransactionOutput::new(value, script::pay_to_pub_key_hash(&[n; 20]));
        Transaction::new(
            2,
            vec![
                TransactionInput::new(TransactionOutpoint::new(id(1), 0), 0xffff_fffd),
                TransactionInput::new(TransactionOutpoint::new(id(2), 1), 0xffff_fffd),
                TransactionInput::new(TransactionOutpoint::new(id(3), 2), 0xffff_fffd),
            ],
            vec![output(1000, 0xaa), output(2000, 0xbb)],
            0,
        )
    }

    #[test]
    fn test_legacy_preimage_matches_masked_copy() {
        let tx = legacy_tx();
        let script_code = script::pay_to_pub_key_hash(&[0x11; 20]);

        let mut copy = tx.clone();
        copy.inputs[1].signature_script = script_code.to_vec();
        let mut expected = copy.serialize_without_witness();
        expected.extend_from_slice(&1u32.to_le_bytes());
        assert_eq!(legacy_preimage(&tx, 1, &script_code, SIG_HASH_ALL), expected);

        // NONE: no outputs, other sequences zeroed
        let mut copy = tx.clone();
        copy.inputs[1].signature_script = script_code.to_vec();
        copy.outputs.clear();
        copy.inputs[0].sequence = 0;
        copy.inputs[2].sequence = 0;
        let mut expected = copy.serialize_without_witness();
        expected.extend_from_slice(&2u32.to_le_bytes());
        assert_eq!(legacy_preimage(&tx, 1, &script_code, SIG_HASH_NONE), expected);

        // SINGLE: outputs up to the signed one, earlier ones blanked
        let mut copy = tx.clone();
        copy.inputs[1].signature_script = script_code.to_vec();
        copy.outputs[0] = TransactionOutput::new(u64::MAX, ScriptVec::new());
        copy.inputs[0].sequence = 0;
        copy.inputs[2].sequence = 0;
        let mut expected = copy.serialize_without_witness();
        expected.extend_from_slice(&3u32.to_le_bytes());
        assert_eq!(legacy_preimage(&tx, 1, &script_code, SIG_HASH_SINGLE), expected);

        // ANYONECANPAY: only the signed input
        let all_acp = SigHashType::from_u8(SIG_HASH_ALL.to_u8() | SIG_HASH_ANY_ONE_CAN_PAY.to_u8()).unwrap();
        let mut copy = tx.clone();
        copy.inputs = vec![copy.inputs[1].clone()];
        copy.inputs[0].signature_script = script_code.to_vec();
        let mut expected = copy.serialize_without_witness();
        expected.extend_from_slice(&0x81u32.to_le_bytes());
        assert_eq!(legacy_preimage(&tx, 1, &script_code, all_acp), expected);
    }

    #[test]
    fn test_legacy_single_out_of_range() {
        let tx = legacy_tx();
        let script_code = script::pay_to_pub_key_hash(&[0x11; 20]);
        assert_eq!(
            calc_legacy_signature_hash(&tx, 2, &script_code, SIG_HASH_SINGLE, SigHashDigest::DoubleSha256),
            Hash::from_str("0100000000000000000000000000000000000000000000000000000000000000").unwrap()
        );
        assert_ne!(calc_legacy_signature_hash(&tx, 1, &script_code, SIG_HASH_SINGLE, SigHashDigest::DoubleSha256), SIGHASH_SINGLE_OUT_OF_RANGE);
    }

    #[test]
    fn test_bip143_masks() {
        let tx = legacy_tx();
        let mut reused_values = SigHashReusedValues::new();
        let acp = SigHashType::from_u8(0x81).unwrap();
        assert_eq!(previous_outputs_hash(&tx, acp, &mut reused_values), ZERO_HASH);
        assert_eq!(sequence_hash(&tx, SIG_HASH_SINGLE, &mut reused_values), ZERO_HASH);
        assert_eq!(outputs_hash(&tx, SIG_HASH_NONE, &mut reused_values, 0), ZERO_HASH);
        assert_eq!(outputs_hash(&tx, SIG_HASH_SINGLE, &mut reused_values, 2), ZERO_HASH);
        assert_ne!(outputs_hash(&tx, SIG_HASH_SINGLE, &mut reused_values, 1), outputs_hash(&tx, SIG_HASH_ALL, &mut reused_values, 1));
    }
}
