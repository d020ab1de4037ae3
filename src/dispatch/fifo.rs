use super::{DispatchStrategy, MatchOutcome, StrategyKind};
use crate::kitchen_actor::Kitchen;
use crate::model::{Courier, CourierId, OrderId};
use tokio::time::Instant;
use tracing::{debug, info};

/// First ready order goes to the first available courier.
///
/// Orders are eligible once they have a `ready_time`; among those the earliest
/// `ready_time` wins, ties going to the order received first. Orders still cooking
/// are never popped, so they cannot be lost from the pending collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoStrategy;

impl DispatchStrategy for FifoStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fifo
    }

    fn dispatch(&self, kitchen: &mut Kitchen, courier: Courier) {
        info!(courier_id = %courier.id, "Courier dispatched for any order");
        kitchen.enqueue_courier(courier);
    }

    fn try_match(&self, kitchen: &mut Kitchen, courier_id: CourierId, now: Instant) -> MatchOutcome {
        match kitchen.courier(courier_id) {
            None => return MatchOutcome::Unavailable,
            Some(courier) if !courier.has_arrived() => return MatchOutcome::Waiting,
            Some(_) => {}
        }

        match kitchen.oldest_ready_order() {
            Some(order_id) => kitchen.claim(order_id, courier_id, now),
            None => {
                debug!(%courier_id, "Courier waiting for any order");
                MatchOutcome::Waiting
            }
        }
    }

    fn order_ready(&self, kitchen: &mut Kitchen, _order_id: OrderId, now: Instant) -> Option<MatchOutcome> {
        let courier_id = kitchen.first_arrived_courier(|_| true)?;
        Some(self.try_match(kitchen, courier_id, now))
    }
}
