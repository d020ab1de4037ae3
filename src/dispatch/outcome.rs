//! Results of a single match attempt.
//!
//! None of these are errors: a courier that has to keep waiting is ordinary control flow.

use crate::model::{CourierId, OrderId};
use serde::Serialize;
use tokio::time::Instant;

/// A completed pickup, with the wait-time samples it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pickup {
    pub order_id: OrderId,
    pub courier_id: CourierId,
    pub food_wait_ms: f64,
    pub courier_wait_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Order and courier were matched and removed from the registry.
    PickedUp(Pickup),
    /// No eligible order right now; the courier stays in the waiting collection.
    Waiting,
    /// Pickup validation failed on an order whose `ready_time` is still ahead of us.
    /// Both entities stay registered; the courier should retry at `at`.
    Retry { courier_id: CourierId, at: Instant },
    /// The courier is unknown or has already picked up an order. Nothing to do.
    Unavailable,
}

impl MatchOutcome {
    pub fn pickup(&self) -> Option<&Pickup> {
        match self {
            MatchOutcome::PickedUp(pickup) => Some(pickup),
            _ => None,
        }
    }

    pub fn is_picked_up(&self) -> bool {
        matches!(self, MatchOutcome::PickedUp(_))
    }
}
