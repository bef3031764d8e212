use crate::{AddressError, AddressProfile, Result};

pub(crate) fn encode(hash: &[u8], profile: &AddressProfile) -> String {
    let mut bytes = Vec::with_capacity(profile.prefix.len() + hash.len() + profile.suffix.len() + profile.checksum_algorithm.size());
    bytes.extend_from_slice(profile.prefix);
    bytes.extend_from_slice(hash);
    bytes.extend_from_slice(profile.suffix);
    let checksum = profile.checksum_algorithm.checksum(&bytes);
    bytes.extend_from_slice(&checksum);
    bs58::encode(bytes).with_alphabet(profile.alphabet.bs58()).into_string()
}

pub(crate) fn decode(address: &str, profile: &AddressProfile) -> Result<Vec<u8>> {
    let bytes = bs58::decode(address)
        .with_alphabet(profile.alphabet.bs58())
        .into_vec()
        .map_err(|err| AddressError::InvalidAddress(err.to_string()))?;

    let checksum_size = profile.checksum_algorithm.size();
    let framing = profile.prefix.len() + profile.suffix.len() + checksum_size;
    if bytes.len() < framing {
        return Err(AddressError::InvalidAddress(format!("{} bytes is too short", bytes.len())));
    }

    let (body, checksum) = bytes.split_at(bytes.len() - checksum_size);
    if profile.checksum_algorithm.checksum(body) != checksum {
        return Err(AddressError::InvalidAddress("bad checksum".into()));
    }
    let Some(hash) = body.strip_prefix(profile.prefix).and_then(|rest| rest.strip_suffix(profile.suffix)) else {
        return Err(AddressError::InvalidAddress(format!("address is not a {} address", profile.name)));
    };
    Ok(hash.to_vec())
}
