pub use crate::account::{AccountDeriver, DerivedAddress, address_for_key};
pub use crate::coin::CoinType;
pub use crate::error::Error;
pub use crate::registry::{CoinEntry, CoinRegistry};
pub use crate::result::Result;
pub use crate::{Seed, generate_seed};
pub use coinkit_bip32::{ChildNumber, CurveType, DerivationPath, ExtendedKey};
