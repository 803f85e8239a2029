//! Just-in-time liquidity hook
//!
//! A Uniswap v4-style hook that provisions liquidity around a single swap:
//! it opens a temporary position in `beforeSwap`, lets the swap trade against
//! it, then closes the position in `afterSwap` and credits the proceeds to a
//! recipient on the pool manager's internal ledger. Unused funding is refunded
//! as soon as the position is open.
//!
//! # Features
//!
//! - Construction-time check that the hook address encodes its permissions
//! - Transaction-scoped handoff of the position handle between callbacks
//! - Explicit `Idle -> Opened -> Closed` lifecycle, rejecting out-of-order calls
//! - Callbacks restricted to the registered pool manager
//! - In-memory pool manager for tests and simulations
//!
//! # Example
//!
//! ```rust,ignore
//! use jit_hook::{FixedRecipient, HookConfig, JitHook, MockPoolManager, SwapCall};
//!
//! fn main() -> eyre::Result<()> {
//!     let config = HookConfig::from_env()?;
//!     let recipient = FixedRecipient(treasury);
//!     let mut hook = JitHook::new(config.clone(), funding, positions, recipient)?;
//!     let mut manager = MockPoolManager::new(config.pool_manager);
//!     manager.register(&mut hook)?;
//!
//!     let swap = SwapCall { key, params, ..Default::default() };
//!     manager.execute(&mut hook, tx, &swap, |_| Ok(BalanceDelta::ZERO))?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod hook;
pub mod host;
pub mod lifecycle;
pub mod mock;
pub mod transient;
pub mod types;

// Re-export main types for convenience
pub use config::HookConfig;
pub use contracts::{PoolKey, SwapParams};
pub use error::{eyre, Context, HookError, Report, Result};
pub use hook::{HookTransaction, JitHook, JIT_PERMISSIONS};
pub use host::{
    ClosedPosition, FixedRecipient, Funding, FundingSource, OpenedPosition, PoolManager,
    PoolManagerCap, PositionManager, RecipientPolicy,
};
pub use lifecycle::Phase;
pub use mock::{MockPoolManager, SwapCall};
pub use transient::TransientStorage;
pub use types::{BalanceDelta, BeforeSwapDelta, Currency, Permissions};
