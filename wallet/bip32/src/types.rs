/// Chain code: extension for both private and public keys which provides an
/// additional 256 bits of entropy.
pub type ChainCode = [u8; crate::KEY_SIZE];

/// Derivation depth.
pub type Depth = u8;

/// BIP32 key fingerprints.
pub type KeyFingerprint = [u8; 4];

/// Private scalar, big-endian.
pub type PrivateKeyBytes = [u8; crate::KEY_SIZE];
