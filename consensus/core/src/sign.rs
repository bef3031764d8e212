use crate::{
    config::params::ChainParams,
    errors::{TxError, TxResult},
    hashing::sighash::compute_sighashes,
    tx::{
        Transaction, TransactionInput, TxUnlock, Witness,
        script::{self, pay_to_pub_key_hash_signature_script, pay_to_script_hash_signature_script},
    },
};
use coinkit_core::{debug, trace};
use coinkit_hashes::{Hash, hash160};
use itertools::Itertools;
use secp256k1::{Message, PublicKey, SECP256K1, SecretKey, ecdsa::Signature};
use serde::{Deserialize, Serialize};

/// Signature over one input together with the key that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePubkey {
    /// DER encoded, low-S
    pub signature: Vec<u8>,
    /// Compressed secp256k1 point
    pub public_key: Vec<u8>,
}

/// Signs a single signature hash with RFC6979 nonces.
pub fn sign_input(sighash: &Hash, private_key: &[u8; 32]) -> TxResult<SignaturePubkey> {
    let secret_key = SecretKey::from_slice(private_key)?;
    let msg = Message::from_digest(sighash.as_bytes());
    let mut signature = SECP256K1.sign_ecdsa(&msg, &secret_key);
    signature.normalize_s();
    Ok(SignaturePubkey {
        signature: signature.serialize_der().to_vec(),
        public_key: PublicKey::from_secret_key_global(&secret_key).serialize().to_vec(),
    })
}

pub fn sign(sighashes: &[Hash], unlocks: &[TxUnlock]) -> TxResult<Vec<SignaturePubkey>> {
    if sighashes.len() != unlocks.len() {
        return Err(TxError::UnlockCountMismatch { expected: sighashes.len(), actual: unlocks.len() });
    }
    sighashes
        .iter()
        .zip_eq(unlocks)
        .enumerate()
        .map(|(i, (sighash, unlock))| {
            let private_key = unlock.private_key.as_ref().ok_or(TxError::MissingPrivateKey(i))?;
            trace!("signing input {i}");
            sign_input(sighash, private_key)
        })
        .collect()
}

/// Places the signatures into the unsigned transaction `tx_hex`.
///
/// P2PKH inputs get a `push(signature) push(public key)` signature script,
/// every other input a witness, plus a signature script pushing the redeem
/// script when the output is P2SH-wrapped.
pub fn insert_signatures(tx_hex: &str, signatures: &[SignaturePubkey], unlocks: &[TxUnlock]) -> TxResult<String> {
    let mut tx = Transaction::from_hex(tx_hex)?;
    if signatures.len() != tx.inputs.len() {
        return Err(TxError::SignatureCountMismatch { expected: tx.inputs.len(), actual: signatures.len() });
    }
    if unlocks.len() != tx.inputs.len() {
        return Err(TxError::UnlockCountMismatch { expected: tx.inputs.len(), actual: unlocks.len() });
    }

    for ((input, signature), unlock) in tx.inputs.iter_mut().zip_eq(signatures).zip_eq(unlocks) {
        let mut signature_with_type = signature.signature.clone();
        signature_with_type.push(unlock.sighash_type.to_u8());
        if script::is_pay_to_pub_key_hash(&unlock.locking_script) {
            input.signature_script = pay_to_pub_key_hash_signature_script(&signature_with_type, &signature.public_key);
            input.witness = None;
        } else {
            input.signature_script = unlock.redeem_script.as_deref().map(pay_to_script_hash_signature_script).unwrap_or_default();
            input.witness = Some(Witness { signature: signature_with_type, public_key: signature.public_key.clone() });
        }
    }
    debug!("inserted {} signatures", signatures.len());
    Ok(tx.to_hex())
}

/// Hash of the key allowed to spend the output described by `unlock`, for
/// P2PKH, P2WPKH and P2SH-wrapped P2WPKH outputs.
fn expected_key_hash(unlock: &TxUnlock) -> Option<&[u8]> {
    let locking_script = &unlock.locking_script[..];
    if script::is_pay_to_pub_key_hash(locking_script) || script::is_pay_to_witness_pub_key_hash(locking_script) {
        return script::extract_hash(locking_script);
    }
    let redeem_script = unlock.redeem_script.as_deref()?;
    if script::is_pay_to_script_hash(locking_script)
        && script::extract_hash(locking_script) == Some(&hash160(redeem_script)[..])
        && script::is_pay_to_witness_pub_key_hash(redeem_script)
    {
        return script::extract_hash(redeem_script);
    }
    None
}

/// Signature (with its sighash type byte) and public key carried by a signed input.
fn signature_and_key<'a>(input: &'a TransactionInput, unlock: &TxUnlock) -> Option<(&'a [u8], &'a [u8])> {
    if script::is_pay_to_pub_key_hash(&unlock.locking_script) {
        if input.witness.is_some() {
            return None;
        }
        match script::parse_pushes(&input.signature_script)?.as_slice() {
            [signature, public_key] => Some((*signature, *public_key)),
            _ => None,
        }
    } else {
        let expected_script = unlock.redeem_script.as_deref().map(pay_to_script_hash_signature_script).unwrap_or_default();
        if input.signature_script != expected_script {
            return None;
        }
        let witness = input.witness.as_ref()?;
        Some((&witness.signature[..], &witness.public_key[..]))
    }
}

fn verify_input(input: &TransactionInput, unlock: &TxUnlock, sighash: &Hash) -> bool {
    let Some((signature, public_key)) = signature_and_key(input, unlock) else {
        return false;
    };
    let Some((&sighash_type, der)) = signature.split_last() else {
        return false;
    };
    if sighash_type != unlock.sighash_type.to_u8() {
        return false;
    }
    if expected_key_hash(unlock) != Some(&hash160(public_key)[..]) {
        return false;
    }
    let (Ok(signature), Ok(public_key)) = (Signature::from_der(der), PublicKey::from_slice(public_key)) else {
        return false;
    };
    SECP256K1.verify_ecdsa(&Message::from_digest(sighash.as_bytes()), &signature, &public_key).is_ok()
}

/// Checks every signature of `signed_tx_hex` against its unlock.
///
/// Malformed transactions and count mismatches are errors; a wrong
/// signature, sighash type or public key makes the result `false`.
pub fn verify(signed_tx_hex: &str, unlocks: &[TxUnlock], params: &ChainParams) -> TxResult<bool> {
    let signed = Transaction::from_hex(signed_tx_hex)?;
    let sighashes = compute_sighashes(&signed.skeleton(), unlocks, params)?;
    for (i, ((input, unlock), sighash)) in signed.inputs.iter().zip_eq(unlocks).zip_eq(&sighashes).enumerate() {
        if !verify_input(input, unlock, sighash) {
            debug!("signature of input {i} does not verify");
            return Ok(false);
        }
    }
    Ok(true)
}
