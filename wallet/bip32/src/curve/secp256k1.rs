use super::{Curve, CurveType};
use crate::{Error, Result, types::PrivateKeyBytes};
use secp256k1::{PublicKey, SECP256K1, Scalar, SecretKey};

/// BIP32 arithmetic over secp256k1.
pub struct Secp256k1;

impl Curve for Secp256k1 {
    const TYPE: CurveType = CurveType::Secp256k1;
    const DOMAIN_SEPARATOR: &'static [u8] = b"Bitcoin seed";
    const PUBLIC_KEY_SIZE: usize = 33;

    fn root_key(il: &[u8; 32]) -> Result<PrivateKeyBytes> {
        SecretKey::from_slice(il).map(|key| key.secret_bytes()).map_err(|_| Error::InvalidRootKey)
    }

    fn public_key(private: &PrivateKeyBytes) -> Result<Vec<u8>> {
        let secret = SecretKey::from_slice(private).map_err(|_| Error::InvalidKey(Self::TYPE))?;
        Ok(PublicKey::from_secret_key_global(&secret).serialize().to_vec())
    }

    fn tweak_private(parent: &PrivateKeyBytes, il: &[u8; 32]) -> Result<PrivateKeyBytes> {
        // I_L >= n or a zero sum invalidates the child
        let tweak = Scalar::from_be_bytes(*il).map_err(|_| Error::InvalidChild)?;
        let parent = SecretKey::from_slice(parent).map_err(|_| Error::InvalidKey(Self::TYPE))?;
        parent.add_tweak(&tweak).map(|child| child.secret_bytes()).map_err(|_| Error::InvalidChild)
    }

    fn tweak_public(parent: &[u8], il: &[u8; 32]) -> Result<Vec<u8>> {
        let tweak = Scalar::from_be_bytes(*il).map_err(|_| Error::InvalidChild)?;
        let parent = PublicKey::from_slice(parent).map_err(|_| Error::InvalidKey(Self::TYPE))?;
        parent.add_exp_tweak(SECP256K1, &tweak).map(|child| child.serialize().to_vec()).map_err(|_| Error::InvalidChild)
    }

    fn validate_private(private: &PrivateKeyBytes) -> Result<()> {
        SecretKey::from_slice(private).map(drop).map_err(|_| Error::InvalidKey(Self::TYPE))
    }

    fn validate_public(public: &[u8]) -> Result<()> {
        if public.len() != Self::PUBLIC_KEY_SIZE {
            return Err(Error::InvalidKey(Self::TYPE));
        }
        PublicKey::from_slice(public).map(drop).map_err(|_| Error::InvalidKey(Self::TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf,
        0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
    ];

    #[test]
    fn test_out_of_range_tweak_is_invalid_child() {
        let parent = [1u8; 32];
        assert_eq!(Secp256k1::tweak_private(&parent, &ORDER), Err(Error::InvalidChild));
        let public = Secp256k1::public_key(&parent).unwrap();
        assert_eq!(Secp256k1::tweak_public(&public, &ORDER), Err(Error::InvalidChild));
    }

    #[test]
    fn test_zero_sum_is_invalid_child() {
        // parent = 1, tweak = n - 1
        let mut parent = [0u8; 32];
        parent[31] = 1;
        let mut tweak = ORDER;
        tweak[31] -= 1;
        assert_eq!(Secp256k1::tweak_private(&parent, &tweak), Err(Error::InvalidChild));
        let public = Secp256k1::public_key(&parent).unwrap();
        assert_eq!(Secp256k1::tweak_public(&public, &tweak), Err(Error::InvalidChild));
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(Secp256k1::root_key(&[0u8; 32]), Err(Error::InvalidRootKey));
        assert_eq!(Secp256k1::root_key(&ORDER), Err(Error::InvalidRootKey));
        assert!(Secp256k1::validate_public(&[2u8; 32]).is_err());
        assert!(Secp256k1::validate_public(&[5u8; 33]).is_err());
        assert!(Secp256k1::validate_private(&[0u8; 32]).is_err());
    }
}
