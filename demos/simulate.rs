//! Run one JIT liquidity lifecycle against the in-memory pool manager
//!
//! Run with: cargo run --example simulate
//!
//! Reads JIT_HOOK_ADDRESS / JIT_POOL_MANAGER from the environment (or `.env`),
//! falling back to built-in addresses.

use alloy::primitives::aliases::{I24, U160, U24};
use alloy::primitives::{address, Address, Bytes, TxHash, I256, U256};
use jit_hook::{
    BalanceDelta, ClosedPosition, FixedRecipient, Funding, FundingSource, HookConfig, JitHook,
    MockPoolManager, OpenedPosition, PoolKey, PoolManager, PositionManager, SwapCall, SwapParams,
};

const USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
const WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
const TREASURY: Address = address!("00000000000000000000000000000000000007ea");

/// Pays a fixed budget into the pool manager on every pull
struct Budget {
    amount0: U256,
    amount1: U256,
}

impl FundingSource for Budget {
    fn pull(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        _params: &SwapParams,
    ) -> eyre::Result<Funding> {
        manager.settle(hook, key.currency0(), self.amount0)?;
        manager.settle(hook, key.currency1(), self.amount1)?;
        Ok(Funding {
            excess_recipient: TREASURY,
            amount0: self.amount0,
            amount1: self.amount1,
        })
    }
}

/// Toy position: deploys 90% of currency0 and all of currency1, returns a
/// flat fee on top of principal
#[derive(Default)]
struct ToyPosition {
    principal: (U256, U256),
}

impl PositionManager for ToyPosition {
    fn open(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        amount0: U256,
        amount1: U256,
        _hook_data: &Bytes,
    ) -> eyre::Result<OpenedPosition> {
        let used0 = amount0 * U256::from(9u8) / U256::from(10u8);
        manager.account_delta(hook, key.currency0(), -I256::from_raw(used0))?;
        manager.account_delta(hook, key.currency1(), -I256::from_raw(amount1))?;
        self.principal = (used0, amount1);
        Ok(OpenedPosition {
            used0,
            used1: amount1,
            liquidity: used0 + amount1,
        })
    }

    fn close(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        _liquidity: U256,
        _hook_data: &Bytes,
    ) -> eyre::Result<ClosedPosition> {
        let fee = U256::from(3u8);
        let out0 = self.principal.0 + fee;
        let out1 = self.principal.1 + fee;
        manager.account_delta(hook, key.currency0(), I256::from_raw(out0))?;
        manager.account_delta(hook, key.currency1(), I256::from_raw(out1))?;
        Ok(ClosedPosition {
            delta: BalanceDelta::new(to_i128(out0)?, to_i128(out1)?),
            fees_accrued: BalanceDelta::new(3, 3),
        })
    }
}

fn to_i128(value: U256) -> eyre::Result<i128> {
    i128::try_from(value).map_err(|_| eyre::eyre!("{value} does not fit a delta"))
}

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = HookConfig::from_env().unwrap_or_else(|_| {
        HookConfig::new(
            address!("5e4b7f0a1c3d2e9f8a7b6c5d4e3f2a1b0c0040c0"),
            address!("000000000004444c5dc75cb358380d2e3de08a90"),
        )
    });

    let mut hook = JitHook::new(
        config.clone(),
        Budget {
            amount0: U256::from(1_000_000u64),
            amount1: U256::from(500u64),
        },
        ToyPosition::default(),
        FixedRecipient(TREASURY),
    )?;
    let mut manager = MockPoolManager::new(config.pool_manager);
    manager.register(&mut hook)?;

    let call = SwapCall {
        sender: address!("66a9893cc07d91d95644aedd05d03f95e1dba8af"),
        key: PoolKey {
            currency0: USDC,
            currency1: WETH,
            fee: U24::from(3000u32),
            tickSpacing: I24::try_from(60).map_err(|_| eyre::eyre!("tick spacing out of range"))?,
            hooks: config.hook_address,
        },
        params: SwapParams {
            zeroForOne: true,
            amountSpecified: -I256::from_raw(U256::from(10_000u64)),
            sqrtPriceLimitX96: U160::from(4_295_128_740u64),
        },
        hook_data: Bytes::new(),
    };

    manager.execute(&mut hook, TxHash::with_last_byte(1), &call, |_| {
        Ok(BalanceDelta::ZERO)
    })?;

    println!("\n========================================");
    println!("       JIT lifecycle settled");
    println!("========================================");
    for take in manager.takes() {
        println!("Refund:  {} of {} -> {}", take.amount, take.currency, take.to);
    }
    for mint in manager.mints() {
        println!("Credit:  {} of id {} -> {}", mint.amount, mint.id, mint.to);
    }
    println!(
        "Treasury claims: {} USDC, {} WETH",
        manager.claim_balance(TREASURY, USDC.into()),
        manager.claim_balance(TREASURY, WETH.into())
    );

    Ok(())
}
