//! Just-in-time liquidity hook
//!
//! Around a single swap the hook opens a temporary position, lets the swap
//! trade against it, then closes the position and routes the proceeds:
//!
//! 1. `before_swap`: pull funds, open the position, stash its liquidity in a
//!    transient slot, refund whatever the position did not consume.
//! 2. `after_swap`: read the liquidity back, close the position, credit the
//!    proceeds to the recipient on the pool manager's internal ledger.
//!
//! The two callbacks only share state through [`HookTransaction`], a scope
//! guard that wipes the transaction's transient cells when dropped.

use alloy::primitives::{Address, Bytes, Selector, TxHash, U256};
use alloy::sol_types::SolCall;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::HookConfig;
use crate::constants::phase_slot;
use crate::contracts::{IHooks, PoolKey, SwapParams};
use crate::error::HookError;
use crate::host::{FundingSource, PoolManager, PoolManagerCap, PositionManager, RecipientPolicy};
use crate::lifecycle::Phase;
use crate::transient::TransientStorage;
use crate::types::{validate_hook_permissions, BalanceDelta, BeforeSwapDelta, Currency, Permissions};

/// Permissions of the JIT hook: swap callbacks only
pub const JIT_PERMISSIONS: Permissions = Permissions {
    before_swap: true,
    after_swap: true,
    ..Permissions::NONE
};

/// A JIT liquidity hook bound to its collaborators
pub struct JitHook<F, P, R> {
    config: HookConfig,
    funding: F,
    positions: P,
    recipient: R,
    transient: TransientStorage,
    registered: Option<u64>,
}

impl<F, P, R> JitHook<F, P, R>
where
    F: FundingSource,
    P: PositionManager,
    R: RecipientPolicy,
{
    /// Create a hook, refusing any config whose address does not encode
    /// exactly [`JIT_PERMISSIONS`]
    pub fn new(config: HookConfig, funding: F, positions: P, recipient: R) -> Result<Self> {
        validate_hook_permissions(config.hook_address, &Self::permissions())?;

        debug!(
            hook = %config.hook_address,
            pool_manager = %config.pool_manager,
            "JIT hook created"
        );

        Ok(Self {
            config,
            funding,
            positions,
            recipient,
            transient: TransientStorage::new(),
            registered: None,
        })
    }

    /// Lifecycle callbacks this hook implements
    pub const fn permissions() -> Permissions {
        JIT_PERMISSIONS
    }

    /// Register the pool manager at `manager` and hand it the capability
    /// every entry point requires
    ///
    /// Only the configured pool manager address is accepted, and only once.
    pub fn register_pool_manager(
        &mut self,
        manager: Address,
    ) -> Result<PoolManagerCap, HookError> {
        let hook = self.config.hook_address;
        if manager != self.config.pool_manager {
            warn!(%hook, %manager, "Refused to register unknown pool manager");
            return Err(HookError::NotPoolManager { caller: manager });
        }
        if self.registered.is_some() {
            warn!(%hook, %manager, "Pool manager registered twice");
            return Err(HookError::PoolManagerAlreadyRegistered { hook });
        }

        let cap = PoolManagerCap::issue(hook);
        self.registered = Some(cap.id());
        info!(%hook, %manager, "Registered pool manager");
        Ok(cap)
    }

    /// Start transaction `tx`
    ///
    /// Cells left behind by any other transaction are purged first, and the
    /// returned scope clears `tx`'s cells when dropped, however it ends.
    pub fn transaction(&mut self, tx: TxHash) -> HookTransaction<'_, F, P, R> {
        let stale = self.transient.retain_only(tx);
        if stale > 0 {
            warn!(%tx, stale, "Purged transient cells from an unfinished transaction");
        }
        HookTransaction { hook: self, tx }
    }
}

impl<F, P, R> JitHook<F, P, R> {
    pub fn address(&self) -> Address {
        self.config.hook_address
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    pub fn funding(&self) -> &F {
        &self.funding
    }

    pub fn positions(&self) -> &P {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut P {
        &mut self.positions
    }

    /// Transient cells currently alive
    pub fn transient(&self) -> &TransientStorage {
        &self.transient
    }
}

/// One transaction's view of the hook
pub struct HookTransaction<'a, F, P, R> {
    hook: &'a mut JitHook<F, P, R>,
    tx: TxHash,
}

impl<F, P, R> HookTransaction<'_, F, P, R>
where
    F: FundingSource,
    P: PositionManager,
    R: RecipientPolicy,
{
    pub fn tx(&self) -> TxHash {
        self.tx
    }

    /// Current lifecycle phase of this transaction
    pub fn phase(&self) -> Result<Phase, HookError> {
        Phase::from_word(self.hook.transient.tload(self.tx, phase_slot()))
    }

    /// Liquidity of the position opened in this transaction, zero if none
    pub fn position_liquidity(&self) -> U256 {
        self.hook
            .transient
            .tload(self.tx, self.hook.config.position_slot)
    }

    /// Pull funds, open the position and refund the excess
    ///
    /// Returns the `beforeSwap` selector with a zero delta and no fee
    /// override: the hook never changes swap pricing.
    pub fn before_swap(
        &mut self,
        manager: &mut dyn PoolManager,
        sender: Address,
        key: &PoolKey,
        params: &SwapParams,
        hook_data: &Bytes,
    ) -> Result<(Selector, BeforeSwapDelta, u32)> {
        self.only_pool_manager(manager)?;
        let next = self.phase()?.open()?;
        let hook = self.hook.config.hook_address;

        let funding = self
            .hook
            .funding
            .pull(manager, hook, key, params)
            .context("Funding source failed to supply the position")?;

        debug!(
            tx = %self.tx,
            %sender,
            excess_recipient = %funding.excess_recipient,
            amount0 = %funding.amount0,
            amount1 = %funding.amount1,
            "Pulled funds"
        );

        let opened = self
            .hook
            .positions
            .open(manager, hook, key, funding.amount0, funding.amount1, hook_data)
            .context("Failed to open position")?;

        let excess0 = unused(key.currency0(), funding.amount0, opened.used0)?;
        let excess1 = unused(key.currency1(), funding.amount1, opened.used1)?;

        debug!(
            tx = %self.tx,
            liquidity = %opened.liquidity,
            used0 = %opened.used0,
            used1 = %opened.used1,
            "Opened position"
        );

        self.hook
            .transient
            .tstore(self.tx, self.hook.config.position_slot, opened.liquidity);
        self.hook.transient.tstore(self.tx, phase_slot(), next.to_word());

        for (currency, expected) in [(key.currency0(), excess0), (key.currency1(), excess1)] {
            refund_excess(manager, hook, currency, funding.excess_recipient, expected)?;
        }

        Ok((
            IHooks::beforeSwapCall::SELECTOR.into(),
            BeforeSwapDelta::ZERO,
            0,
        ))
    }

    /// Close the position and credit the proceeds to the recipient
    ///
    /// `params` and `swap_delta` are informational only; the position handle
    /// comes from this transaction's transient slot.
    pub fn after_swap(
        &mut self,
        manager: &mut dyn PoolManager,
        sender: Address,
        key: &PoolKey,
        params: &SwapParams,
        swap_delta: BalanceDelta,
        hook_data: &Bytes,
    ) -> Result<(Selector, i128)> {
        self.only_pool_manager(manager)?;
        let next = self.phase()?.close()?;
        let hook = self.hook.config.hook_address;
        let liquidity = self.position_liquidity();

        debug!(
            tx = %self.tx,
            %sender,
            zero_for_one = params.zeroForOne,
            swap0 = swap_delta.amount0,
            swap1 = swap_delta.amount1,
            %liquidity,
            "Closing position"
        );

        let closed = self
            .hook
            .positions
            .close(manager, hook, key, liquidity, hook_data)
            .context("Failed to close position")?;
        self.hook.transient.tstore(self.tx, phase_slot(), next.to_word());

        let recipient = self.hook.recipient.recipient();

        // Reject any shortfall before the first credit goes out
        let credits = [
            (key.currency0(), settlement(key.currency0(), closed.delta.amount0)?),
            (key.currency1(), settlement(key.currency1(), closed.delta.amount1)?),
        ];

        for (currency, amount) in credits {
            if amount.is_zero() {
                continue;
            }
            manager
                .mint(hook, recipient, currency.to_id(), amount)
                .with_context(|| format!("Failed to credit {amount} of {currency}"))?;
            info!(tx = %self.tx, %recipient, %currency, %amount, "Credited proceeds");
        }

        debug!(
            tx = %self.tx,
            fees0 = closed.fees_accrued.amount0,
            fees1 = closed.fees_accrued.amount1,
            "Closed position"
        );

        Ok((IHooks::afterSwapCall::SELECTOR.into(), 0))
    }

    /// Accept only the manager holding this hook's registration capability
    fn only_pool_manager(&self, manager: &dyn PoolManager) -> Result<(), HookError> {
        let caller = manager.address();
        let registered = self.hook.registered;
        let authorized = caller == self.hook.config.pool_manager
            && manager.capability().is_some_and(|cap| {
                cap.hook() == self.hook.config.hook_address && Some(cap.id()) == registered
            });

        if !authorized {
            warn!(tx = %self.tx, %caller, "Rejected call from unauthorized pool manager");
            return Err(HookError::NotPoolManager { caller });
        }
        Ok(())
    }
}

impl<F, P, R> Drop for HookTransaction<'_, F, P, R> {
    fn drop(&mut self) {
        self.hook.transient.clear(self.tx);
    }
}

/// Funds pulled but not consumed by the position
fn unused(currency: Currency, pulled: U256, used: U256) -> Result<U256, HookError> {
    pulled.checked_sub(used).ok_or_else(|| {
        HookError::Funding(format!(
            "position consumed {used} of {currency} but only {pulled} was supplied"
        ))
    })
}

/// Withdraw the hook's positive delta in `currency` to `to`
fn refund_excess(
    manager: &mut dyn PoolManager,
    hook: Address,
    currency: Currency,
    to: Address,
    expected: U256,
) -> Result<()> {
    let delta = manager.currency_delta(hook, currency);
    if !delta.is_positive() {
        return Ok(());
    }

    let amount = delta.into_raw();
    if amount != expected {
        warn!(%currency, %amount, %expected, "Outstanding delta differs from unused funding");
    }

    manager
        .take(hook, currency, to, amount)
        .with_context(|| format!("Failed to refund {amount} of {currency}"))?;
    info!(%to, %currency, %amount, "Refunded excess");
    Ok(())
}

/// Amount to credit for one component of the close delta
fn settlement(currency: Currency, amount: i128) -> Result<U256, HookError> {
    if amount < 0 {
        return Err(HookError::NegativeSettlement { currency, amount });
    }
    Ok(U256::from(amount.unsigned_abs()))
}
