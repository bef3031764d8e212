use super::{Curve, CurveType};
use crate::{Error, Result, types::PrivateKeyBytes};
use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
    traits::IsIdentity,
};
use zeroize::Zeroize;

const COFACTOR: u8 = 8;

/// Ed25519 arithmetic with cofactor-scaled tweaks.
///
/// Scalars are stored big-endian like secp256k1 scalars and reversed into the
/// curve's little-endian encoding for arithmetic.
pub struct Ed25519;

fn scalar_from_be(bytes: &[u8; 32]) -> Scalar {
    let mut le = *bytes;
    le.reverse();
    let scalar = Scalar::from_bytes_mod_order(le);
    le.zeroize();
    scalar
}

fn canonical_scalar(bytes: &PrivateKeyBytes) -> Option<Scalar> {
    let mut le = *bytes;
    le.reverse();
    let scalar = Option::<Scalar>::from(Scalar::from_canonical_bytes(le));
    le.zeroize();
    scalar.filter(|s| *s != Scalar::ZERO)
}

fn scalar_to_be(scalar: &Scalar) -> PrivateKeyBytes {
    let mut bytes = scalar.to_bytes();
    bytes.reverse();
    bytes
}

/// `8 * I_L mod l`, zero is rejected since the child would equal its parent.
fn tweak(il: &[u8; 32]) -> Result<Scalar> {
    let tweak = Scalar::from(COFACTOR) * scalar_from_be(il);
    if tweak == Scalar::ZERO { Err(Error::InvalidChild) } else { Ok(tweak) }
}

fn decompress(public: &[u8]) -> Result<EdwardsPoint> {
    let bytes: [u8; 32] = public.try_into().map_err(|_| Error::InvalidKey(CurveType::Ed25519))?;
    CompressedEdwardsY(bytes).decompress().ok_or(Error::InvalidKey(CurveType::Ed25519))
}

impl Curve for Ed25519 {
    const TYPE: CurveType = CurveType::Ed25519;
    const DOMAIN_SEPARATOR: &'static [u8] = b"ed25519 seed";
    const PUBLIC_KEY_SIZE: usize = 32;

    fn root_key(il: &[u8; 32]) -> Result<PrivateKeyBytes> {
        // standard clamping of the little-endian secret
        let mut clamped = *il;
        clamped[0] &= 0b1111_1000;
        clamped[31] &= 0b0111_1111;
        clamped[31] |= 0b0100_0000;
        let scalar = Scalar::from_bytes_mod_order(clamped);
        clamped.zeroize();
        if scalar == Scalar::ZERO {
            return Err(Error::InvalidRootKey);
        }
        Ok(scalar_to_be(&scalar))
    }

    fn public_key(private: &PrivateKeyBytes) -> Result<Vec<u8>> {
        let scalar = canonical_scalar(private).ok_or(Error::InvalidKey(Self::TYPE))?;
        Ok(EdwardsPoint::mul_base(&scalar).compress().to_bytes().to_vec())
    }

    fn tweak_private(parent: &PrivateKeyBytes, il: &[u8; 32]) -> Result<PrivateKeyBytes> {
        let parent = canonical_scalar(parent).ok_or(Error::InvalidKey(Self::TYPE))?;
        let child = parent + tweak(il)?;
        if child == Scalar::ZERO {
            return Err(Error::InvalidChild);
        }
        Ok(scalar_to_be(&child))
    }

    fn tweak_public(parent: &[u8], il: &[u8; 32]) -> Result<Vec<u8>> {
        let child = decompress(parent)? + EdwardsPoint::mul_base(&tweak(il)?);
        if child.is_identity() {
            return Err(Error::InvalidChild);
        }
        Ok(child.compress().to_bytes().to_vec())
    }

    fn validate_private(private: &PrivateKeyBytes) -> Result<()> {
        canonical_scalar(private).map(drop).ok_or(Error::InvalidKey(Self::TYPE))
    }

    fn validate_public(public: &[u8]) -> Result<()> {
        decompress(public).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_key_is_clamped_scalar() {
        let root = Ed25519::root_key(&[0xffu8; 32]).unwrap();
        assert!(canonical_scalar(&root).is_some());
        // clamping clears the three low bits of the little-endian secret before reduction
        let mut expected = [0xffu8; 32];
        expected[0] = 0xf8;
        expected[31] = 0x7f;
        assert_eq!(root, scalar_to_be(&Scalar::from_bytes_mod_order(expected)));
    }

    #[test]
    fn test_public_tweak_matches_private_tweak() {
        let parent = Ed25519::root_key(&[7u8; 32]).unwrap();
        let il = [3u8; 32];
        let child = Ed25519::tweak_private(&parent, &il).unwrap();
        let parent_public = Ed25519::public_key(&parent).unwrap();
        assert_eq!(Ed25519::tweak_public(&parent_public, &il).unwrap(), Ed25519::public_key(&child).unwrap());
    }

    #[test]
    fn test_zero_tweak_is_invalid_child() {
        let parent = Ed25519::root_key(&[7u8; 32]).unwrap();
        assert_eq!(Ed25519::tweak_private(&parent, &[0u8; 32]), Err(Error::InvalidChild));
        let public = Ed25519::public_key(&parent).unwrap();
        assert_eq!(Ed25519::tweak_public(&public, &[0u8; 32]), Err(Error::InvalidChild));
    }

    #[test]
    fn test_zero_sum_is_invalid_child() {
        // parent = 8 and I_L = -1 mod l, so 8 + 8 * I_L = 0
        let parent = scalar_to_be(&Scalar::from(8u8));
        let minus_one = scalar_to_be(&(Scalar::ZERO - Scalar::ONE));
        assert_eq!(Ed25519::tweak_private(&parent, &minus_one), Err(Error::InvalidChild));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(Ed25519::validate_private(&[0u8; 32]).is_err());
        assert!(Ed25519::validate_private(&[0xffu8; 32]).is_err());
        assert!(Ed25519::validate_public(&[1u8; 33]).is_err());
    }
}
