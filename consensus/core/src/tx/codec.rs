use super::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput, Witness};
use crate::{
    errors::{TxError, TxResult},
    hashing::WriterExtensions,
};
use coinkit_hashes::HASH_SIZE;

const SEGWIT_MARKER: u8 = 0x00;
const SEGWIT_FLAG: u8 = 0x01;
const KEY_HASH_WITNESS_ITEMS: u64 = 2;

pub(crate) fn write_outpoint(buf: &mut Vec<u8>, outpoint: &TransactionOutpoint) {
    buf.write_bytes(outpoint.transaction_id.reversed().as_ref()).write_u32(outpoint.index);
}

pub(crate) fn write_output(buf: &mut Vec<u8>, output: &TransactionOutput) {
    buf.write_u64(output.value).write_var_bytes(&output.script_public_key);
}

fn write_transaction(buf: &mut Vec<u8>, tx: &Transaction, with_witness: bool) {
    let with_witness = with_witness && tx.has_witness();
    buf.write_u32(tx.version);
    if with_witness {
        buf.write_u8(SEGWIT_MARKER).write_u8(SEGWIT_FLAG);
    }

    buf.write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_outpoint(buf, &input.previous_outpoint);
        buf.write_var_bytes(&input.signature_script).write_u32(input.sequence);
    }

    buf.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(buf, output);
    }

    if with_witness {
        for input in tx.inputs.iter() {
            match &input.witness {
                Some(witness) => {
                    buf.write_var_int(KEY_HASH_WITNESS_ITEMS).write_var_bytes(&witness.signature).write_var_bytes(&witness.public_key);
                }
                None => {
                    buf.write_var_int(0);
                }
            }
        }
    }

    buf.write_u32(tx.lock_time);
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn read_bytes(&mut self, len: usize) -> TxResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(TxError::UnexpectedEnd(self.offset));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> TxResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    fn read_u8(&mut self) -> TxResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u32(&mut self) -> TxResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> TxResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_var_int(&mut self) -> TxResult<u64> {
        let offset = self.offset;
        let (value, min) = match self.read_u8()? {
            0xfd => (u16::from_le_bytes(self.read_array()?) as u64, 0xfd),
            0xfe => (self.read_u32()? as u64, 0x1_0000),
            0xff => (self.read_u64()?, 0x1_0000_0000),
            byte => return Ok(byte as u64),
        };
        if value < min {
            return Err(TxError::NonCanonicalCompactSize(offset));
        }
        Ok(value)
    }

    /// Reads a compact size that counts items or bytes still to come, so it
    /// can never exceed the remaining input.
    fn read_len(&mut self) -> TxResult<usize> {
        let offset = self.offset;
        let len = self.read_var_int()?;
        if len > self.remaining() as u64 {
            return Err(TxError::UnexpectedEnd(offset));
        }
        Ok(len as usize)
    }

    fn read_var_bytes(&mut self) -> TxResult<Vec<u8>> {
        let len = self.read_len()?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    fn finish(&self) -> TxResult<()> {
        match self.remaining() {
            0 => Ok(()),
            trailing => Err(TxError::TrailingData(trailing)),
        }
    }
}

fn read_transaction(data: &[u8], segwit: bool) -> TxResult<Transaction> {
    let mut reader = Reader::new(data);
    let version = reader.read_u32()?;
    if segwit {
        reader.read_bytes(2)?;
    }

    let input_count = reader.read_len()?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        let transaction_id = TransactionId::from_bytes(reader.read_array::<HASH_SIZE>()?).reversed();
        let index = reader.read_u32()?;
        let signature_script = reader.read_var_bytes()?;
        let sequence = reader.read_u32()?;
        inputs.push(TransactionInput {
            previous_outpoint: TransactionOutpoint { transaction_id, index },
            signature_script,
            sequence,
            witness: None,
        });
    }

    let output_count = reader.read_len()?;
    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        let value = reader.read_u64()?;
        let script_public_key = reader.read_var_bytes()?.into();
        outputs.push(TransactionOutput { value, script_public_key });
    }

    if segwit {
        for input in inputs.iter_mut() {
            input.witness = match reader.read_var_int()? {
                0 => None,
                KEY_HASH_WITNESS_ITEMS => Some(Witness { signature: reader.read_var_bytes()?, public_key: reader.read_var_bytes()? }),
                items => return Err(TxError::UnsupportedWitness(items)),
            };
        }
    }

    let lock_time = reader.read_u32()?;
    reader.finish()?;
    Ok(Transaction { version, inputs, outputs, lock_time })
}

impl Transaction {
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_transaction(&mut buf, self, true);
        buf
    }

    pub fn serialize_without_witness(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_transaction(&mut buf, self, false);
        buf
    }

    /// Decodes a transaction in either layout. Bytes carrying the segwit
    /// marker are first read as segwit; when that fails, or yields no
    /// witness at all, they are read again as a legacy transaction (a legacy
    /// transaction without inputs and with one output starts the same way).
    pub fn deserialize(data: &[u8]) -> TxResult<Self> {
        if data.get(4) == Some(&SEGWIT_MARKER) && data.get(5) == Some(&SEGWIT_FLAG) {
            if let Ok(tx) = read_transaction(data, true) {
                if tx.has_witness() {
                    return Ok(tx);
                }
            }
        }
        read_transaction(data, false)
    }

    pub fn to_hex(&self) -> String {
        faster_hex::hex_string(&self.serialize())
    }

    pub fn from_hex(hex: &str) -> TxResult<Self> {
        if hex.len() % 2 != 0 {
            return Err(TxError::InvalidHex(format!("odd length {}", hex.len())));
        }
        let mut data = vec![0u8; hex.len() / 2];
        faster_hex::hex_decode(hex.as_bytes(), &mut data)?;
        Self::deserialize(&data)
    }
}
