//! Error types for the JIT hook
//!
//! Lifecycle failures are typed as [`HookError`]. Entry points return `eyre`
//! reports so collaborator failures keep their context chain; callers recover
//! the typed error with `report.downcast_ref::<HookError>()`.

use alloy::primitives::Address;
use thiserror::Error;

use crate::lifecycle::Phase;
use crate::types::Currency;

pub use eyre::{eyre, Context, Report, Result};

/// Every way a hook lifecycle can abort
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// The deployed address does not encode the declared permission set
    #[error("hook address {hook} does not encode the declared permissions")]
    HookAddressNotValid { hook: Address },

    /// An entry point was driven by something other than the registered pool manager
    #[error("caller {caller} is not the pool manager")]
    NotPoolManager { caller: Address },

    /// A pool manager is already registered with this hook
    #[error("hook {hook} already has a registered pool manager")]
    PoolManagerAlreadyRegistered { hook: Address },

    /// Open or close was attempted out of order
    #[error("invalid lifecycle phase: expected {expected}, found {found}")]
    InvalidPhase { expected: Phase, found: Phase },

    /// Funds supplied for the position cannot be reconciled with what it consumed
    #[error("funding error: {0}")]
    Funding(String),

    /// Closing the position returned less than it consumed
    #[error("negative settlement of {amount} in {currency}")]
    NegativeSettlement { currency: Currency, amount: i128 },

    /// A value could not be represented in the target type
    #[error("conversion error: {0}")]
    Conversion(String),

    /// The host engine refused an operation
    #[error("host engine error: {0}")]
    Host(String),
}
