use crate::{ChildNumber, types::*};

/// Fields shared by private and public extended keys.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy, zero for the root.
    pub depth: Depth,

    /// First four bytes of the parent public key hash160, zero for the root.
    pub parent_fingerprint: KeyFingerprint,

    /// Index this key was derived at.
    pub child_number: ChildNumber,

    pub chain_code: ChainCode,
}
