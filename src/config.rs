//! Hook configuration

use std::collections::HashMap;

use alloy::primitives::{Address, B256};
use eyre::{eyre, Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::default_position_slot;

/// Where the hook lives and who may drive it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookConfig {
    /// Deployed hook address; its low bits must encode the hook's permissions
    pub hook_address: Address,
    /// The only pool manager allowed to invoke the hook callbacks
    pub pool_manager: Address,
    /// Transient slot holding the open position's liquidity
    #[serde(default = "default_position_slot")]
    pub position_slot: B256,
}

impl HookConfig {
    pub fn new(hook_address: Address, pool_manager: Address) -> Self {
        Self {
            hook_address,
            pool_manager,
            position_slot: default_position_slot(),
        }
    }

    /// Load from the process environment (and `.env`, if present)
    ///
    /// - `JIT_HOOK_ADDRESS` (required)
    /// - `JIT_POOL_MANAGER` (required)
    /// - `JIT_POSITION_SLOT` (optional, 32-byte hex)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env: HashMap<String, String>) -> Result<Self> {
        let require = |name: &str| -> Result<Address> {
            env.get(name)
                .ok_or_else(|| eyre!("{name} environment variable must be set"))?
                .parse()
                .with_context(|| format!("Invalid address in {name}"))
        };

        let mut config = Self::new(require("JIT_HOOK_ADDRESS")?, require("JIT_POOL_MANAGER")?);

        if let Some(slot) = env.get("JIT_POSITION_SLOT") {
            config.position_slot = slot
                .parse()
                .context("Invalid 32-byte hex in JIT_POSITION_SLOT")?;
        }

        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse hook config")
    }

    /// Set the pool manager address
    pub fn with_pool_manager(mut self, pool_manager: Address) -> Self {
        self.pool_manager = pool_manager;
        self
    }

    /// Set the transient slot for the position handle
    pub fn with_position_slot(mut self, slot: B256) -> Self {
        self.position_slot = slot;
        self
    }
}
