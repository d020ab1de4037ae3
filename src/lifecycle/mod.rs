//! Startup, shutdown and observability of the kitchen.

pub mod kitchen_system;
pub mod tracing;

pub use kitchen_system::*;
pub use self::tracing::setup_tracing;
