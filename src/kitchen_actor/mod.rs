//! The kitchen: registry, actor and the messages between them.

pub mod actor;
pub mod error;
pub mod kitchen;
pub mod message;
pub mod report;

pub use actor::*;
pub use error::*;
pub use kitchen::*;
pub use message::*;
pub use report::*;

use crate::clients::KitchenClient;
use crate::dispatch::StrategyKind;

/// Creates a new Kitchen actor running `strategy`, and its client.
pub fn new(strategy: StrategyKind) -> (KitchenActor, KitchenClient) {
    KitchenActor::new(64, strategy.build())
}
