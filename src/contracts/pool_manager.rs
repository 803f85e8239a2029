//! Pool manager bindings for the settlement calls the hook makes

use alloy::primitives::{keccak256, Address, B256};
use alloy::sol;
use alloy::sol_types::SolValue;

use crate::types::Currency;

sol! {
    /// The subset of the pool manager the hook settles through
    #[sol(all_derives)]
    interface IPoolManager {
        /// Withdraw `amount` of `currency` owed to the caller, sending it to `to`
        function take(address currency, address to, uint256 amount) external;

        /// Credit `amount` of claim token `id` to `to` on the internal ledger
        function mint(address to, uint256 id, uint256 amount) external;
    }
}

/// Transient slot holding `target`'s outstanding delta in `currency`
pub fn currency_delta_slot(target: Address, currency: Currency) -> B256 {
    keccak256((target, currency.0).abi_encode())
}
