//! Lifecycle phase of one hook transaction
//!
//! `Idle -> Opened` on `before_swap`, `Opened -> Closed` on `after_swap`.
//! Any other transition is rejected.

use std::fmt;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::HookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No position opened in this transaction
    #[default]
    Idle,
    /// Position open, waiting for the swap to finish
    Opened,
    /// Position closed and proceeds routed
    Closed,
}

impl Phase {
    /// Encoding stored in the phase's transient slot
    pub fn to_word(self) -> U256 {
        U256::from(self as u8)
    }

    pub fn from_word(word: U256) -> Result<Self, HookError> {
        match u8::try_from(word) {
            Ok(0) => Ok(Self::Idle),
            Ok(1) => Ok(Self::Opened),
            Ok(2) => Ok(Self::Closed),
            _ => Err(HookError::Conversion(format!(
                "{word} is not a lifecycle phase"
            ))),
        }
    }

    /// Transition taken by `before_swap`
    pub fn open(self) -> Result<Self, HookError> {
        match self {
            Self::Idle => Ok(Self::Opened),
            found => Err(HookError::InvalidPhase {
                expected: Self::Idle,
                found,
            }),
        }
    }

    /// Transition taken by `after_swap`
    pub fn close(self) -> Result<Self, HookError> {
        match self {
            Self::Opened => Ok(Self::Closed),
            found => Err(HookError::InvalidPhase {
                expected: Self::Opened,
                found,
            }),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Opened => "opened",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}
