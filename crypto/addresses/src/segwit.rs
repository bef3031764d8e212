use crate::{AddressError, Result};
use bech32::{Fe32, Hrp, segwit};

/// Segwit version 0 address for `program`.
pub(crate) fn encode(hrp: &str, program: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp).map_err(|err| AddressError::InvalidAddress(err.to_string()))?;
    segwit::encode_v0(hrp, program).map_err(|err| AddressError::InvalidAddress(err.to_string()))
}

/// Witness program of a version 0 address with the expected `hrp`.
pub(crate) fn decode(hrp: &str, address: &str) -> Result<Vec<u8>> {
    let (address_hrp, version, program) = segwit::decode(address).map_err(|err| AddressError::InvalidAddress(err.to_string()))?;
    if !address_hrp.to_string().eq_ignore_ascii_case(hrp) {
        return Err(AddressError::InvalidAddress(format!("unexpected human readable part '{address_hrp}'")));
    }
    if version != Fe32::Q {
        return Err(AddressError::InvalidAddress(format!("unsupported witness version {}", version.to_u8())));
    }
    Ok(program)
}
