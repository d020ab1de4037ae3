//! Represents a food order moving through the kitchen.
//!
//! # Lifecycle
//! An order is built by the collaborator (usually from an [`OrderCreate`] descriptor),
//! handed to the kitchen, becomes *ready* when preparation finishes and is dropped
//! from every index when a courier picks it up.

use crate::model::CourierId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tokio::time::Instant;

/// Type-safe identifier for Orders. Assigned externally, expected to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub prep_time: Duration,
    /// Unset until preparation completes.
    pub ready_time: Option<Instant>,
    /// Courier bound to this order (matched dispatch only).
    pub courier_id: Option<CourierId>,
}

impl Order {
    /// Creates a new, not yet prepared Order.
    ///
    /// # Arguments
    /// * `id` - Unique identifier assigned by the caller
    /// * `name` - Display name of the dish
    /// * `prep_time` - How long the kitchen needs to cook it
    pub fn new(id: impl Into<OrderId>, name: impl Into<String>, prep_time: Duration) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prep_time,
            ready_time: None,
            courier_id: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready_time.is_some()
    }

    /// Stamps `ready_time`. Only the first call has an effect; returns whether it did.
    pub fn mark_ready(&mut self, at: Instant) -> bool {
        if self.ready_time.is_some() {
            return false;
        }
        self.ready_time = Some(at);
        true
    }
}

/// Order descriptor as it appears in the input file: `{"id": 1, "name": "Pizza", "prepTime": 5}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub id: OrderId,
    pub name: String,
    /// Preparation time, given in (possibly fractional) seconds.
    #[serde(rename = "prepTime", deserialize_with = "deserialize_seconds")]
    pub prep_time: Duration,
}

impl From<OrderCreate> for Order {
    fn from(params: OrderCreate) -> Self {
        Order::new(params.id, params.name, params.prep_time)
    }
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_initialization() {
        let order = Order::new(1, "Pizza", Duration::from_secs(5));
        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.name, "Pizza");
        assert_eq!(order.prep_time, Duration::from_secs(5));
        assert!(order.ready_time.is_none());
        assert!(order.courier_id.is_none());
        assert_eq!(order.id.to_string(), "order_1");
    }

    #[test]
    fn test_ready_time_is_stamped_once() {
        let mut order = Order::new(7, "Soup", Duration::ZERO);
        let first = Instant::now();
        assert!(order.mark_ready(first));
        assert!(!order.mark_ready(first + Duration::from_secs(3)));
        assert_eq!(order.ready_time, Some(first));
    }

    #[test]
    fn test_descriptor_parses_prep_time_in_seconds() {
        let raw = r#"[{"id": 1, "name": "Pizza", "prepTime": 5}, {"id": 2, "name": "Tea", "prepTime": 0.25}]"#;
        let descriptors: Vec<OrderCreate> = serde_json::from_str(raw).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].prep_time, Duration::from_secs(5));
        assert_eq!(descriptors[1].prep_time, Duration::from_millis(250));

        let order = Order::from(descriptors[1].clone());
        assert_eq!(order.id, OrderId(2));
        assert_eq!(order.name, "Tea");
    }

    #[test]
    fn test_descriptor_rejects_negative_prep_time() {
        let raw = r#"{"id": 3, "name": "Time Travel Taco", "prepTime": -1}"#;
        assert!(serde_json::from_str::<OrderCreate>(raw).is_err());
    }

    #[test]
    fn test_descriptor_rejects_missing_fields() {
        let raw = r#"{"id": 4, "name": "Burger"}"#;
        assert!(serde_json::from_str::<OrderCreate>(raw).is_err());
    }
}
