//! Hook permission descriptor
//!
//! A hook declares which lifecycle callbacks it implements. The pool manager
//! never reads that declaration: it decides whether to call a hook from the
//! flag bits in the lowest 14 bits of the hook's address, so the two must agree.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::HookError;

/// Which lifecycle callbacks a hook participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Permissions {
    pub before_initialize: bool,
    pub after_initialize: bool,
    pub before_add_liquidity: bool,
    pub after_add_liquidity: bool,
    pub before_remove_liquidity: bool,
    pub after_remove_liquidity: bool,
    pub before_swap: bool,
    pub after_swap: bool,
    pub before_donate: bool,
    pub after_donate: bool,
    pub before_swap_return_delta: bool,
    pub after_swap_return_delta: bool,
    pub after_add_liquidity_return_delta: bool,
    pub after_remove_liquidity_return_delta: bool,
}

impl Permissions {
    /// No callbacks at all
    pub const NONE: Self = Self {
        before_initialize: false,
        after_initialize: false,
        before_add_liquidity: false,
        after_add_liquidity: false,
        before_remove_liquidity: false,
        after_remove_liquidity: false,
        before_swap: false,
        after_swap: false,
        before_donate: false,
        after_donate: false,
        before_swap_return_delta: false,
        after_swap_return_delta: false,
        after_add_liquidity_return_delta: false,
        after_remove_liquidity_return_delta: false,
    };

    fn table(&self) -> [(bool, u16); 14] {
        [
            (self.before_initialize, BEFORE_INITIALIZE_FLAG),
            (self.after_initialize, AFTER_INITIALIZE_FLAG),
            (self.before_add_liquidity, BEFORE_ADD_LIQUIDITY_FLAG),
            (self.after_add_liquidity, AFTER_ADD_LIQUIDITY_FLAG),
            (self.before_remove_liquidity, BEFORE_REMOVE_LIQUIDITY_FLAG),
            (self.after_remove_liquidity, AFTER_REMOVE_LIQUIDITY_FLAG),
            (self.before_swap, BEFORE_SWAP_FLAG),
            (self.after_swap, AFTER_SWAP_FLAG),
            (self.before_donate, BEFORE_DONATE_FLAG),
            (self.after_donate, AFTER_DONATE_FLAG),
            (self.before_swap_return_delta, BEFORE_SWAP_RETURNS_DELTA_FLAG),
            (self.after_swap_return_delta, AFTER_SWAP_RETURNS_DELTA_FLAG),
            (
                self.after_add_liquidity_return_delta,
                AFTER_ADD_LIQUIDITY_RETURNS_DELTA_FLAG,
            ),
            (
                self.after_remove_liquidity_return_delta,
                AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA_FLAG,
            ),
        ]
    }

    /// Flag bits an address must carry to encode these permissions
    pub fn flags(&self) -> u16 {
        self.table()
            .iter()
            .filter(|(enabled, _)| *enabled)
            .fold(0, |acc, (_, flag)| acc | flag)
    }

    /// Permissions encoded by a set of flag bits
    pub fn from_flags(flags: u16) -> Self {
        Self {
            before_initialize: flags & BEFORE_INITIALIZE_FLAG != 0,
            after_initialize: flags & AFTER_INITIALIZE_FLAG != 0,
            before_add_liquidity: flags & BEFORE_ADD_LIQUIDITY_FLAG != 0,
            after_add_liquidity: flags & AFTER_ADD_LIQUIDITY_FLAG != 0,
            before_remove_liquidity: flags & BEFORE_REMOVE_LIQUIDITY_FLAG != 0,
            after_remove_liquidity: flags & AFTER_REMOVE_LIQUIDITY_FLAG != 0,
            before_swap: flags & BEFORE_SWAP_FLAG != 0,
            after_swap: flags & AFTER_SWAP_FLAG != 0,
            before_donate: flags & BEFORE_DONATE_FLAG != 0,
            after_donate: flags & AFTER_DONATE_FLAG != 0,
            before_swap_return_delta: flags & BEFORE_SWAP_RETURNS_DELTA_FLAG != 0,
            after_swap_return_delta: flags & AFTER_SWAP_RETURNS_DELTA_FLAG != 0,
            after_add_liquidity_return_delta: flags & AFTER_ADD_LIQUIDITY_RETURNS_DELTA_FLAG
                != 0,
            after_remove_liquidity_return_delta: flags
                & AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA_FLAG
                != 0,
        }
    }

    /// Permissions the pool manager will honour for `hook`
    pub fn from_address(hook: Address) -> Self {
        Self::from_flags(hook_flags(hook))
    }
}

/// Permission bits encoded in an address
pub fn hook_flags(hook: Address) -> u16 {
    let bytes = hook.as_slice();
    u16::from_be_bytes([bytes[18], bytes[19]]) & ALL_HOOK_MASK
}

pub fn has_permission(hook: Address, flag: u16) -> bool {
    hook_flags(hook) & flag != 0
}

/// Fails unless `hook` encodes exactly `permissions`
pub fn validate_hook_permissions(
    hook: Address,
    permissions: &Permissions,
) -> Result<(), HookError> {
    let mismatch = permissions
        .table()
        .iter()
        .any(|(enabled, flag)| *enabled != has_permission(hook, *flag));

    if mismatch {
        return Err(HookError::HookAddressNotValid { hook });
    }
    Ok(())
}

/// Whether a pool may be created with `hook` and `fee`
///
/// Return-delta flags require their base callback, a hook must carry at
/// least one flag or use a dynamic fee, and a hookless pool cannot use a
/// dynamic fee.
pub fn is_valid_hook_address(hook: Address, fee: u32) -> bool {
    let dependent = [
        (BEFORE_SWAP_FLAG, BEFORE_SWAP_RETURNS_DELTA_FLAG),
        (AFTER_SWAP_FLAG, AFTER_SWAP_RETURNS_DELTA_FLAG),
        (AFTER_ADD_LIQUIDITY_FLAG, AFTER_ADD_LIQUIDITY_RETURNS_DELTA_FLAG),
        (
            AFTER_REMOVE_LIQUIDITY_FLAG,
            AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA_FLAG,
        ),
    ];
    if dependent
        .iter()
        .any(|(base, delta)| !has_permission(hook, *base) && has_permission(hook, *delta))
    {
        return false;
    }

    let dynamic_fee = fee == DYNAMIC_FEE_FLAG;
    if hook == Address::ZERO {
        !dynamic_fee
    } else {
        hook_flags(hook) != 0 || dynamic_fee
    }
}
