//! Currency identifiers

use std::fmt;

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::HookError;

/// A pool asset, identified by its token address (zero address = native asset)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Currency(pub Address);

impl Currency {
    /// The chain's native asset
    pub const NATIVE: Self = Self(Address::ZERO);

    pub fn is_native(&self) -> bool {
        self.0 == Address::ZERO
    }

    /// Claim token id of this currency on the pool manager's internal ledger
    pub fn to_id(&self) -> U256 {
        U256::from_be_slice(self.0.as_slice())
    }

    /// Inverse of [`Currency::to_id`]; ids wider than an address are rejected
    pub fn from_id(id: U256) -> Result<Self, HookError> {
        if id >> 160usize != U256::ZERO {
            return Err(HookError::Conversion(format!(
                "claim id {id} does not fit an address"
            )));
        }
        Ok(Self(Address::from_word(B256::from(id))))
    }
}

impl From<Address> for Currency {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
