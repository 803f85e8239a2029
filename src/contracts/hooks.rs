//! Hook callback bindings

use alloy::primitives::{keccak256, B256};
use alloy::sol;
use alloy::sol_types::SolValue;

use crate::types::Currency;

sol! {
    /// Identifies a pool: its two currencies, fee tier, tick spacing and hook
    #[derive(Debug, Default, PartialEq, Eq)]
    struct PoolKey {
        address currency0;     // Lower-sorted currency
        address currency1;     // Higher-sorted currency
        uint24 fee;            // Fee in hundredths of a bip, or the dynamic fee flag
        int24 tickSpacing;
        address hooks;
    }

    /// Trade parameters handed to swap callbacks
    #[derive(Debug, Default, PartialEq, Eq)]
    struct SwapParams {
        bool zeroForOne;
        int256 amountSpecified;     // Negative = exact input, positive = exact output
        uint160 sqrtPriceLimitX96;
    }

    /// Callbacks the pool manager invokes around a swap
    interface IHooks {
        /// Called before the swap executes
        function beforeSwap(
            address sender,
            PoolKey calldata key,
            SwapParams calldata params,
            bytes calldata hookData
        ) external returns (bytes4, int256, uint24);

        /// Called after the swap executes
        function afterSwap(
            address sender,
            PoolKey calldata key,
            SwapParams calldata params,
            int256 delta,
            bytes calldata hookData
        ) external returns (bytes4, int128);
    }
}

impl PoolKey {
    /// First currency of the pair
    pub fn currency0(&self) -> Currency {
        Currency(self.currency0)
    }

    /// Second currency of the pair
    pub fn currency1(&self) -> Currency {
        Currency(self.currency1)
    }

    /// Pool id: keccak256 of the ABI-encoded key
    pub fn to_id(&self) -> B256 {
        keccak256(self.abi_encode())
    }
}
