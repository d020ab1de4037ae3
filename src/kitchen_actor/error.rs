//! Error types for the Kitchen actor.
//!
//! Only communication failures and requests naming an order the kitchen never saw are
//! errors. A courier that cannot be matched yet is reported through
//! [`MatchOutcome`](crate::dispatch::MatchOutcome), not here.

use crate::model::OrderId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitchenError {
    /// The actor's request channel is closed.
    #[error("Kitchen actor closed")]
    ActorClosed,

    /// The actor dropped the response channel before replying.
    #[error("Kitchen actor dropped response channel")]
    ActorDropped,

    /// Preparation was requested for an order that was never received or is already gone.
    #[error("Unknown order: {0}")]
    UnknownOrder(OrderId),

    /// The actor task panicked or was cancelled.
    #[error("Kitchen task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
