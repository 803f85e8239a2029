//! Hook permission flags and transient slot keys

use alloy::primitives::{keccak256, B256};

/// Permission flags live in the lowest 14 bits of the hook address
pub const BEFORE_INITIALIZE_FLAG: u16 = 1 << 13;
pub const AFTER_INITIALIZE_FLAG: u16 = 1 << 12;
pub const BEFORE_ADD_LIQUIDITY_FLAG: u16 = 1 << 11;
pub const AFTER_ADD_LIQUIDITY_FLAG: u16 = 1 << 10;
pub const BEFORE_REMOVE_LIQUIDITY_FLAG: u16 = 1 << 9;
pub const AFTER_REMOVE_LIQUIDITY_FLAG: u16 = 1 << 8;
pub const BEFORE_SWAP_FLAG: u16 = 1 << 7;
pub const AFTER_SWAP_FLAG: u16 = 1 << 6;
pub const BEFORE_DONATE_FLAG: u16 = 1 << 5;
pub const AFTER_DONATE_FLAG: u16 = 1 << 4;
pub const BEFORE_SWAP_RETURNS_DELTA_FLAG: u16 = 1 << 3;
pub const AFTER_SWAP_RETURNS_DELTA_FLAG: u16 = 1 << 2;
pub const AFTER_ADD_LIQUIDITY_RETURNS_DELTA_FLAG: u16 = 1 << 1;
pub const AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA_FLAG: u16 = 1;

/// Mask covering every permission flag
pub const ALL_HOOK_MASK: u16 = (1 << 14) - 1;

/// Fee value marking a pool whose fee is set dynamically by its hook
pub const DYNAMIC_FEE_FLAG: u32 = 0x80_0000;

/// Seed of the transient slot holding the open position's liquidity
pub const POSITION_SLOT_SEED: &[u8] = b"jit-hook.position.liquidity";

/// Seed of the transient slot holding the lifecycle phase
pub const PHASE_SLOT_SEED: &[u8] = b"jit-hook.lifecycle.phase";

/// Default transient slot for the position handle
pub fn default_position_slot() -> B256 {
    keccak256(POSITION_SLOT_SEED)
}

/// Transient slot for the lifecycle phase
pub fn phase_slot() -> B256 {
    keccak256(PHASE_SLOT_SEED)
}
