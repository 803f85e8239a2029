#![allow(dead_code)]

use alloy::primitives::aliases::{I24, U160, U24};
use alloy::primitives::{address, Address, Bytes, TxHash, I256, U256};
use jit_hook::{
    BalanceDelta, ClosedPosition, FixedRecipient, Funding, FundingSource, HookConfig, JitHook,
    MockPoolManager, OpenedPosition, PoolKey, PoolManager, PositionManager, SwapCall, SwapParams,
};

/// Hook address carrying exactly the before/after swap flags (0x00c0)
pub const HOOK: Address = address!("5e4b7f0a1c3d2e9f8a7b6c5d4e3f2a1b0c0040c0");
pub const MANAGER: Address = address!("000000000004444c5dc75cb358380d2e3de08a90");
pub const TOKEN0: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
pub const TOKEN1: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
pub const EXCESS: Address = Address::with_last_byte(0xaa);
pub const TREASURY: Address = Address::with_last_byte(0xbb);
pub const ROUTER: Address = Address::with_last_byte(0xcc);

pub type TestHook = JitHook<ScriptedFunding, ScriptedPositions, FixedRecipient>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn u(value: u64) -> U256 {
    U256::from(value)
}

pub fn i256(value: i128) -> I256 {
    let abs = I256::from_raw(U256::from(value.unsigned_abs()));
    if value < 0 {
        -abs
    } else {
        abs
    }
}

pub fn tx(n: u8) -> TxHash {
    TxHash::with_last_byte(n)
}

pub fn pool_key() -> PoolKey {
    PoolKey {
        currency0: TOKEN0,
        currency1: TOKEN1,
        fee: U24::from(3000u32),
        tickSpacing: I24::try_from(60).unwrap(),
        hooks: HOOK,
    }
}

pub fn swap_params() -> SwapParams {
    SwapParams {
        zeroForOne: true,
        amountSpecified: -i256(1_000),
        sqrtPriceLimitX96: U160::from(4_295_128_740u64),
    }
}

pub fn swap_call() -> SwapCall {
    SwapCall {
        sender: ROUTER,
        key: pool_key(),
        params: swap_params(),
        hook_data: Bytes::from_static(b"route:1"),
    }
}

/// Settles the configured amounts for the hook, or fails
#[derive(Debug, Clone)]
pub struct ScriptedFunding {
    pub excess_recipient: Address,
    pub amount0: U256,
    pub amount1: U256,
    /// What actually reaches the pool manager in currency0
    pub delivered0: U256,
    pub fail: bool,
    pub calls: usize,
}

impl ScriptedFunding {
    pub fn new(amount0: u64, amount1: u64) -> Self {
        Self {
            excess_recipient: EXCESS,
            amount0: u(amount0),
            amount1: u(amount1),
            delivered0: u(amount0),
            fail: false,
            calls: 0,
        }
    }

    /// Reports its configured amounts but settles only `delivered0` of currency0
    pub fn short_delivery(mut self, delivered0: u64) -> Self {
        self.delivered0 = u(delivered0);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0, 0)
        }
    }
}

impl FundingSource for ScriptedFunding {
    fn pull(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        _params: &SwapParams,
    ) -> eyre::Result<Funding> {
        self.calls += 1;
        if self.fail {
            eyre::bail!("funding vault is empty");
        }
        manager.settle(hook, key.currency0(), self.delivered0)?;
        manager.settle(hook, key.currency1(), self.amount1)?;
        Ok(Funding {
            excess_recipient: self.excess_recipient,
            amount0: self.amount0,
            amount1: self.amount1,
        })
    }
}

/// Consumes fixed amounts on open and returns a fixed delta on close
#[derive(Debug, Clone)]
pub struct ScriptedPositions {
    pub used0: U256,
    pub used1: U256,
    pub liquidity: U256,
    pub close_delta: BalanceDelta,
    pub opened: Vec<U256>,
    pub closed: Vec<U256>,
    pub hook_data: Vec<Bytes>,
}

impl ScriptedPositions {
    pub fn new(used0: u64, used1: u64, liquidity: u64, close_delta: BalanceDelta) -> Self {
        Self {
            used0: u(used0),
            used1: u(used1),
            liquidity: u(liquidity),
            close_delta,
            opened: Vec::new(),
            closed: Vec::new(),
            hook_data: Vec::new(),
        }
    }
}

impl PositionManager for ScriptedPositions {
    fn open(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        _amount0: U256,
        _amount1: U256,
        hook_data: &Bytes,
    ) -> eyre::Result<OpenedPosition> {
        manager.account_delta(hook, key.currency0(), -I256::from_raw(self.used0))?;
        manager.account_delta(hook, key.currency1(), -I256::from_raw(self.used1))?;
        self.opened.push(self.liquidity);
        self.hook_data.push(hook_data.clone());
        Ok(OpenedPosition {
            used0: self.used0,
            used1: self.used1,
            liquidity: self.liquidity,
        })
    }

    fn close(
        &mut self,
        manager: &mut dyn PoolManager,
        hook: Address,
        key: &PoolKey,
        liquidity: U256,
        hook_data: &Bytes,
    ) -> eyre::Result<ClosedPosition> {
        manager.account_delta(hook, key.currency0(), i256(self.close_delta.amount0))?;
        manager.account_delta(hook, key.currency1(), i256(self.close_delta.amount1))?;
        self.closed.push(liquidity);
        self.hook_data.push(hook_data.clone());
        Ok(ClosedPosition {
            delta: self.close_delta,
            fees_accrued: BalanceDelta::ZERO,
        })
    }
}

pub fn hook(funding: ScriptedFunding, positions: ScriptedPositions) -> TestHook {
    init_tracing();
    JitHook::new(
        HookConfig::new(HOOK, MANAGER),
        funding,
        positions,
        FixedRecipient(TREASURY),
    )
    .unwrap()
}

/// Pool manager registered with `hook`
pub fn manager(hook: &mut TestHook) -> MockPoolManager {
    let mut manager = MockPoolManager::new(MANAGER);
    manager.register(hook).unwrap();
    manager
}

/// Swap leg that books nothing for the trader
pub fn no_trade(_: &mut MockPoolManager) -> eyre::Result<BalanceDelta> {
    Ok(BalanceDelta::ZERO)
}

/// Router pays 10 of currency0 and receives 9 of currency1, fully settled
pub fn settled_trade(manager: &mut MockPoolManager) -> eyre::Result<BalanceDelta> {
    let key = pool_key();
    manager.account_delta(ROUTER, key.currency0(), i256(-10))?;
    manager.settle(ROUTER, key.currency0(), u(10))?;
    manager.account_delta(ROUTER, key.currency1(), i256(9))?;
    manager.take(ROUTER, key.currency1(), ROUTER, u(9))?;
    Ok(BalanceDelta::new(-10, 9))
}
