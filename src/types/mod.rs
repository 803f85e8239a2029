//! Value types shared by the hook, its collaborators and the host engine

pub mod currency;
pub mod delta;
pub mod permissions;

pub use currency::Currency;
pub use delta::{BalanceDelta, BeforeSwapDelta};
pub use permissions::{
    has_permission, hook_flags, is_valid_hook_address, validate_hook_permissions, Permissions,
};
