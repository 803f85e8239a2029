//! Collaborators the hook drives
//!
//! The hook owns the lifecycle; everything that touches real funds sits behind
//! one of these traits:
//! - [`PoolManager`]: the host engine tracking per-caller deltas and the internal ledger
//! - [`FundingSource`]: supplies capital before the position opens
//! - [`PositionManager`]: opens and closes the liquidity position
//! - [`RecipientPolicy`]: decides who receives the close proceeds

use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::{Address, Bytes, B256, I256, U256};
use eyre::Result;

use crate::contracts::{currency_delta_slot, PoolKey, SwapParams};
use crate::types::{BalanceDelta, Currency};

static NEXT_CAPABILITY: AtomicU64 = AtomicU64::new(1);

/// Proof that a pool manager was registered with a hook
///
/// Issued once per hook by [`crate::JitHook::register_pool_manager`]. It can
/// be neither cloned nor built outside this crate, so only the manager that
/// registered can present it to the hook's entry points.
#[derive(Debug)]
pub struct PoolManagerCap {
    hook: Address,
    id: u64,
}

impl PoolManagerCap {
    pub(crate) fn issue(hook: Address) -> Self {
        Self {
            hook,
            id: NEXT_CAPABILITY.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Hook this capability was issued by
    pub fn hook(&self) -> Address {
        self.hook
    }
}

/// Host engine surface used during a hook transaction
///
/// Deltas follow the pool manager's sign convention: a positive delta is owed
/// to `target`, a negative delta is owed by it. Every delta must be back to
/// zero when the transaction ends.
pub trait PoolManager {
    /// Address the pool manager calls hooks from
    fn address(&self) -> Address;

    /// Capability received when this manager registered with the hook
    fn capability(&self) -> Option<&PoolManagerCap>;

    /// Read one of the pool manager's transient slots
    fn exttload(&self, slot: B256) -> B256;

    /// Outstanding delta of `target` in `currency`
    fn currency_delta(&self, target: Address, currency: Currency) -> I256 {
        let word = self.exttload(currency_delta_slot(target, currency));
        I256::from_raw(U256::from_be_bytes(word.0))
    }

    /// Add `delta` to `target`'s outstanding balance. Pool operations such as
    /// liquidity changes and swaps settle through this.
    fn account_delta(&mut self, target: Address, currency: Currency, delta: I256) -> Result<()>;

    /// Pay `amount` of `currency` into the pool manager on behalf of `target`
    fn settle(&mut self, target: Address, currency: Currency, amount: U256) -> Result<()>;

    /// Withdraw `amount` owed to `target` directly to `to`
    fn take(&mut self, target: Address, currency: Currency, to: Address, amount: U256)
        -> Result<()>;

    /// Credit `amount` of claim token `id` to `to`, charged to `target`
    fn mint(&mut self, target: Address, to: Address, id: U256, amount: U256) -> Result<()>;
}

/// Capital supplied for one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funding {
    /// Who receives whatever the position does not consume
    pub excess_recipient: Address,
    pub amount0: U256,
    pub amount1: U256,
}

/// Supplies capital before the position opens
pub trait FundingSource {
    /// Deliver funds into `manager`, credited to `hook`, for the trade about to run
    fn pull(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        params: &SwapParams,
    ) -> Result<Funding>;
}

/// Result of opening a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedPosition {
    pub used0: U256,
    pub used1: U256,
    /// Position handle: the liquidity added
    pub liquidity: U256,
}

/// Result of closing a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPosition {
    /// Principal plus fees, net of anything still owed
    pub delta: BalanceDelta,
    pub fees_accrued: BalanceDelta,
}

/// Opens and closes the temporary liquidity position
pub trait PositionManager {
    /// Open a position with up to `amount0`/`amount1`; the position decides how
    /// much of each it actually consumes
    fn open(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        amount0: U256,
        amount1: U256,
        hook_data: &Bytes,
    ) -> Result<OpenedPosition>;

    /// Remove all `liquidity` opened earlier in the transaction
    fn close(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        liquidity: U256,
        hook_data: &Bytes,
    ) -> Result<ClosedPosition>;
}

/// Decides who receives the proceeds of a closed position
pub trait RecipientPolicy {
    fn recipient(&self) -> Address;
}

/// Always routes proceeds to the same address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRecipient(pub Address);

impl RecipientPolicy for FixedRecipient {
    fn recipient(&self) -> Address {
        self.0
    }
}
