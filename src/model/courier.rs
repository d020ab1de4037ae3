use crate::model::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::time::Instant;

/// Type-safe identifier for Couriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourierId(pub u64);

impl From<u64> for CourierId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CourierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "courier_{}", self.0)
    }
}

/// A courier dispatched to the kitchen.
///
/// `order_id` is only set under matched dispatch, at creation time, and never changes.
#[derive(Debug, Clone)]
pub struct Courier {
    pub id: CourierId,
    /// Unset until the courier physically arrives.
    pub arrival_time: Option<Instant>,
    pub order_id: Option<OrderId>,
}

impl Courier {
    /// Creates a courier that may take any order.
    pub fn new(id: impl Into<CourierId>) -> Self {
        Self {
            id: id.into(),
            arrival_time: None,
            order_id: None,
        }
    }

    /// Creates a courier pre-bound to one specific order.
    pub fn bound_to(id: impl Into<CourierId>, order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            ..Self::new(id)
        }
    }

    pub fn has_arrived(&self) -> bool {
        self.arrival_time.is_some()
    }

    /// Stamps `arrival_time`. Only the first call has an effect; returns whether it did.
    pub fn mark_arrived(&mut self, at: Instant) -> bool {
        if self.arrival_time.is_some() {
            return false;
        }
        self.arrival_time = Some(at);
        true
    }
}
