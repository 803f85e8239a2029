//! Contract bindings for the hook callback surface and the pool manager

pub mod hooks;
pub mod pool_manager;

pub use hooks::*;
pub use pool_manager::*;
