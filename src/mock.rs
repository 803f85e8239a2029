//! In-memory pool manager for tests and simulations
//!
//! Tracks per-target currency deltas the way the real pool manager does, keeps
//! a log of every `take` and `mint` it served, and runs whole swap
//! transactions atomically: if anything fails, every ledger change made during
//! the transaction is rolled back.

use std::collections::HashMap;

use alloy::primitives::{Address, Bytes, Selector, TxHash, B256, I256, U256};
use alloy::sol_types::SolCall;
use eyre::Result;
use tracing::{debug, warn};

use crate::constants::{AFTER_SWAP_RETURNS_DELTA_FLAG, BEFORE_SWAP_RETURNS_DELTA_FLAG};
use crate::contracts::{currency_delta_slot, IHooks, IPoolManager, PoolKey, SwapParams};
use crate::error::HookError;
use crate::hook::JitHook;
use crate::host::{FundingSource, PoolManager, PoolManagerCap, PositionManager, RecipientPolicy};
use crate::types::{has_permission, is_valid_hook_address, BalanceDelta, Currency};

/// A swap as submitted to the pool manager
#[derive(Debug, Clone, Default)]
pub struct SwapCall {
    /// Router or account initiating the swap
    pub sender: Address,
    pub key: PoolKey,
    pub params: SwapParams,
    pub hook_data: Bytes,
}

#[derive(Debug, Clone, Default)]
struct Ledger {
    deltas: HashMap<B256, I256>,
    claims: HashMap<(Address, U256), U256>,
    takes: Vec<IPoolManager::takeCall>,
    mints: Vec<IPoolManager::mintCall>,
}

/// Pool manager double
#[derive(Debug)]
pub struct MockPoolManager {
    address: Address,
    capability: Option<PoolManagerCap>,
    ledger: Ledger,
}

impl MockPoolManager {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            capability: None,
            ledger: Ledger::default(),
        }
    }

    /// Register with `hook`, keeping the capability its callbacks require
    pub fn register<F, P, R>(&mut self, hook: &mut JitHook<F, P, R>) -> Result<()>
    where
        F: FundingSource,
        P: PositionManager,
        R: RecipientPolicy,
    {
        self.capability = Some(hook.register_pool_manager(self.address)?);
        Ok(())
    }

    /// Direct withdrawals served so far
    pub fn takes(&self) -> &[IPoolManager::takeCall] {
        &self.ledger.takes
    }

    /// Internal ledger credits issued so far
    pub fn mints(&self) -> &[IPoolManager::mintCall] {
        &self.ledger.mints
    }

    /// Claim balance of `owner` in `currency` on the internal ledger
    pub fn claim_balance(&self, owner: Address, currency: Currency) -> U256 {
        self.ledger
            .claims
            .get(&(owner, currency.to_id()))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Number of (target, currency) pairs with an outstanding delta
    pub fn nonzero_delta_count(&self) -> usize {
        self.ledger.deltas.values().filter(|d| !d.is_zero()).count()
    }

    /// Run one swap transaction through `hook`
    ///
    /// `before_swap`, then `swap` (which books the trader's side of the trade
    /// and returns the swap delta), then `after_swap`. Every delta must be
    /// settled at the end. On any error the ledger is restored to its state
    /// before the call.
    pub fn execute<F, P, R, S>(
        &mut self,
        hook: &mut JitHook<F, P, R>,
        tx: TxHash,
        call: &SwapCall,
        swap: S,
    ) -> Result<BalanceDelta>
    where
        F: FundingSource,
        P: PositionManager,
        R: RecipientPolicy,
        S: FnOnce(&mut Self) -> Result<BalanceDelta>,
    {
        let snapshot = self.ledger.clone();
        let outcome = self.run(hook, tx, call, swap);

        if let Err(err) = &outcome {
            warn!(%tx, error = %err, "Transaction reverted");
            self.ledger = snapshot;
        }
        outcome
    }

    fn run<F, P, R, S>(
        &mut self,
        hook: &mut JitHook<F, P, R>,
        tx: TxHash,
        call: &SwapCall,
        swap: S,
    ) -> Result<BalanceDelta>
    where
        F: FundingSource,
        P: PositionManager,
        R: RecipientPolicy,
        S: FnOnce(&mut Self) -> Result<BalanceDelta>,
    {
        let key = &call.key;
        if key.hooks != hook.address() || !is_valid_hook_address(key.hooks, key.fee.to::<u32>()) {
            return Err(HookError::HookAddressNotValid { hook: key.hooks }.into());
        }

        let mut scope = hook.transaction(tx);
        let (selector, before_delta, _fee) =
            scope.before_swap(self, call.sender, key, &call.params, &call.hook_data)?;
        check_response(
            key.hooks,
            selector == Selector::from(IHooks::beforeSwapCall::SELECTOR),
            before_delta.to_i256().is_zero(),
            BEFORE_SWAP_RETURNS_DELTA_FLAG,
        )?;

        // Handed to the hook as the packed int256 word of the callback ABI
        let swap_word = swap(&mut *self)?.to_i256();
        let swap_delta = BalanceDelta::from_i256(swap_word);

        let (selector, after_delta) = scope.after_swap(
            self,
            call.sender,
            key,
            &call.params,
            swap_delta,
            &call.hook_data,
        )?;
        check_response(
            key.hooks,
            selector == Selector::from(IHooks::afterSwapCall::SELECTOR),
            after_delta == 0,
            AFTER_SWAP_RETURNS_DELTA_FLAG,
        )?;

        let unsettled = self.nonzero_delta_count();
        if unsettled > 0 {
            return Err(HookError::Host(format!(
                "{unsettled} currency deltas left unsettled"
            ))
            .into());
        }

        debug!(%tx, pool = %key.to_id(), swap_delta = %swap_word, "Transaction settled");
        Ok(swap_delta)
    }

    fn signed(amount: U256) -> Result<I256, HookError> {
        let value = I256::from_raw(amount);
        if value.is_negative() {
            return Err(HookError::Conversion(format!(
                "{amount} does not fit a signed delta"
            )));
        }
        Ok(value)
    }
}

/// A hook must acknowledge with its callback's selector, and may only return
/// a delta if its address carries the matching return-delta flag
fn check_response(
    hook: Address,
    selector_ok: bool,
    delta_is_zero: bool,
    delta_flag: u16,
) -> Result<(), HookError> {
    if !selector_ok {
        return Err(HookError::Host(format!("hook {hook} returned the wrong selector")));
    }
    if !delta_is_zero && !has_permission(hook, delta_flag) {
        return Err(HookError::Host(format!(
            "hook {hook} returned a delta without permission"
        )));
    }
    Ok(())
}

impl PoolManager for MockPoolManager {
    fn address(&self) -> Address {
        self.address
    }

    fn capability(&self) -> Option<&PoolManagerCap> {
        self.capability.as_ref()
    }

    fn exttload(&self, slot: B256) -> B256 {
        self.ledger
            .deltas
            .get(&slot)
            .map(|delta| B256::from(delta.into_raw()))
            .unwrap_or(B256::ZERO)
    }

    fn account_delta(&mut self, target: Address, currency: Currency, delta: I256) -> Result<()> {
        let slot = currency_delta_slot(target, currency);
        let current = self.ledger.deltas.get(&slot).copied().unwrap_or(I256::ZERO);
        let next = current.checked_add(delta).ok_or_else(|| {
            HookError::Host(format!("delta overflow for {target} in {currency}"))
        })?;

        if next.is_zero() {
            self.ledger.deltas.remove(&slot);
        } else {
            self.ledger.deltas.insert(slot, next);
        }
        Ok(())
    }

    fn settle(&mut self, target: Address, currency: Currency, amount: U256) -> Result<()> {
        self.account_delta(target, currency, Self::signed(amount)?)
    }

    fn take(
        &mut self,
        target: Address,
        currency: Currency,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        self.account_delta(target, currency, -Self::signed(amount)?)?;
        self.ledger.takes.push(IPoolManager::takeCall {
            currency: currency.0,
            to,
            amount,
        });
        Ok(())
    }

    fn mint(&mut self, target: Address, to: Address, id: U256, amount: U256) -> Result<()> {
        let currency = Currency::from_id(id)?;
        self.account_delta(target, currency, -Self::signed(amount)?)?;

        let balance = self.ledger.claims.entry((to, id)).or_insert(U256::ZERO);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| HookError::Host(format!("claim balance overflow for {to}")))?;

        self.ledger.mints.push(IPoolManager::mintCall { to, id, amount });
        Ok(())
    }
}
