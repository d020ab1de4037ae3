//! Typed async facade over the kitchen's request channel.

pub mod kitchen_client;
pub mod mock;

pub use kitchen_client::*;
