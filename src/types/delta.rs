//! Signed two-asset deltas exchanged with the pool manager
//!
//! Both types pack two `int128` values into one `int256` word: the first
//! amount in the upper 128 bits, the second in the lower 128 bits.

use alloy::primitives::{I256, U256};

fn pack(high: i128, low: i128) -> I256 {
    let high = high as u128;
    let low = low as u128;
    I256::from_raw(U256::from_limbs([
        low as u64,
        (low >> 64) as u64,
        high as u64,
        (high >> 64) as u64,
    ]))
}

fn unpack(packed: I256) -> (i128, i128) {
    let limbs = packed.into_raw().into_limbs();
    let low = (limbs[0] as u128) | ((limbs[1] as u128) << 64);
    let high = (limbs[2] as u128) | ((limbs[3] as u128) << 64);
    (high as i128, low as i128)
}

/// Net balance change per pool currency. Positive amounts are owed to the
/// holder of the delta, negative amounts are owed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BalanceDelta {
    pub amount0: i128,
    pub amount1: i128,
}

impl BalanceDelta {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(amount0: i128, amount1: i128) -> Self {
        Self { amount0, amount1 }
    }

    pub fn from_i256(packed: I256) -> Self {
        let (amount0, amount1) = unpack(packed);
        Self { amount0, amount1 }
    }

    pub fn to_i256(self) -> I256 {
        pack(self.amount0, self.amount1)
    }
}

/// Delta a `beforeSwap` callback returns, in specified/unspecified currency terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BeforeSwapDelta {
    pub specified: i128,
    pub unspecified: i128,
}

impl BeforeSwapDelta {
    /// Leaves the swap's pricing untouched
    pub const ZERO: Self = Self {
        specified: 0,
        unspecified: 0,
    };

    pub fn to_i256(self) -> I256 {
        pack(self.specified, self.unspecified)
    }
}
