//! Read-side views of the kitchen handed back to callers.

use crate::model::{CourierId, OrderId};
use serde::Serialize;

/// Wait-time samples in milliseconds, one entry per completed pickup.
///
/// Sample order follows the order pickups happened in, which callers should not rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitchenStats {
    pub food_wait_times: Vec<f64>,
    pub courier_wait_times: Vec<f64>,
}

impl KitchenStats {
    pub fn pickups(&self) -> usize {
        self.food_wait_times.len()
    }

    pub fn average_food_wait_ms(&self) -> Option<f64> {
        mean(&self.food_wait_times)
    }

    pub fn average_courier_wait_ms(&self) -> Option<f64> {
        mean(&self.courier_wait_times)
    }
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Point-in-time copy of the registry collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitchenSnapshot {
    pub pending_orders: Vec<OrderId>,
    pub waiting_couriers: Vec<CourierId>,
    pub cooking: Vec<OrderId>,
    pub pickups: usize,
}

/// Outcome of the terminal reconciliation sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepReport {
    /// Pickups completed by the sweep itself.
    pub picked_up: usize,
    pub unpicked_orders: Vec<OrderId>,
    pub idle_couriers: Vec<CourierId>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.unpicked_orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages() {
        let stats = KitchenStats {
            food_wait_times: vec![0.0, 1000.0],
            courier_wait_times: vec![500.0, 0.0, 1000.0],
        };
        assert_eq!(stats.pickups(), 2);
        assert_eq!(stats.average_food_wait_ms(), Some(500.0));
        assert_eq!(stats.average_courier_wait_ms(), Some(500.0));
    }

    #[test]
    fn test_no_samples_means_no_average() {
        let stats = KitchenStats::default();
        assert_eq!(stats.average_food_wait_ms(), None);
        assert_eq!(stats.average_courier_wait_ms(), None);
    }
}
