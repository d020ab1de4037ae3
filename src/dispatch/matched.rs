use super::{DispatchStrategy, MatchOutcome, StrategyKind};
use crate::kitchen_actor::Kitchen;
use crate::model::{Courier, CourierId, OrderId};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Each courier is bound to exactly one order id and only ever picks up that order.
///
/// Lookups go through the kitchen's order index instead of scanning the pending collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchedStrategy;

impl DispatchStrategy for MatchedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Matched
    }

    fn dispatch(&self, kitchen: &mut Kitchen, courier: Courier) {
        match courier.order_id {
            Some(order_id) => {
                info!(courier_id = %courier.id, %order_id, "Courier dispatched for order");
                if let Some(order) = kitchen.order_mut(order_id) {
                    order.courier_id = Some(courier.id);
                }
            }
            None => warn!(courier_id = %courier.id, "Courier dispatched without a bound order"),
        }
        kitchen.enqueue_courier(courier);
    }

    fn try_match(&self, kitchen: &mut Kitchen, courier_id: CourierId, now: Instant) -> MatchOutcome {
        let order_id = match kitchen.courier(courier_id) {
            None => return MatchOutcome::Unavailable,
            Some(courier) if !courier.has_arrived() => return MatchOutcome::Waiting,
            Some(courier) => match courier.order_id {
                Some(order_id) => order_id,
                None => return MatchOutcome::Waiting,
            },
        };

        let ready = kitchen.order(order_id).is_some_and(|order| order.is_ready());
        if ready {
            kitchen.claim(order_id, courier_id, now)
        } else {
            debug!(%courier_id, %order_id, "Courier waiting for order");
            MatchOutcome::Waiting
        }
    }

    fn order_ready(&self, kitchen: &mut Kitchen, order_id: OrderId, now: Instant) -> Option<MatchOutcome> {
        let courier_id = kitchen.first_arrived_courier(|courier| courier.order_id == Some(order_id))?;
        Some(self.try_match(kitchen, courier_id, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;
    use std::time::Duration;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_dispatch_binds_order_to_courier() {
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(5)));
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(10, 1));

        assert_eq!(kitchen.waiting_couriers(), vec![CourierId(10)]);
        assert_eq!(kitchen.order(OrderId(1)).unwrap().courier_id, Some(CourierId(10)));
    }

    #[test]
    fn test_order_received_after_dispatch_is_bound() {
        let mut kitchen = Kitchen::new();
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(10, 1));
        kitchen.receive_order(Order::new(1, "Pizza", secs(5)));

        assert_eq!(kitchen.order(OrderId(1)).unwrap().courier_id, Some(CourierId(10)));
    }

    #[test]
    fn test_courier_arrival_picks_up_bound_order() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(1)));
        kitchen.order_prepared(OrderId(1), t0 + secs(1));
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(1, 1));

        let outcome = MatchedStrategy.courier_arrival(&mut kitchen, CourierId(1), t0 + secs(2));

        let pickup = outcome.pickup().unwrap();
        assert_eq!(pickup.order_id, OrderId(1));
        assert!((pickup.food_wait_ms - 1000.0).abs() < 1e-6);
        assert!(kitchen.pending_orders().is_empty());
        assert!(kitchen.waiting_couriers().is_empty());
    }

    #[test]
    fn test_courier_never_takes_another_order() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(5)));
        kitchen.receive_order(Order::new(2, "Burger", secs(1)));
        kitchen.order_prepared(OrderId(2), t0 + secs(1));
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(1, 1));

        let outcome = MatchedStrategy.courier_arrival(&mut kitchen, CourierId(1), t0 + secs(2));

        assert_eq!(outcome, MatchOutcome::Waiting);
        assert_eq!(kitchen.pending_orders(), vec![OrderId(1), OrderId(2)]);
        assert_eq!(kitchen.waiting_couriers(), vec![CourierId(1)]);

        // Readiness of an unrelated order does not wake the bound courier.
        assert!(MatchedStrategy.order_ready(&mut kitchen, OrderId(2), t0 + secs(2)).is_none());
    }

    #[test]
    fn test_order_ready_wakes_only_the_bound_courier() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(3)));
        kitchen.receive_order(Order::new(2, "Burger", secs(3)));
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(1, 1));
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(2, 2));
        MatchedStrategy.courier_arrival(&mut kitchen, CourierId(1), t0);
        MatchedStrategy.courier_arrival(&mut kitchen, CourierId(2), t0);

        kitchen.order_prepared(OrderId(2), t0 + secs(3));
        let outcome = MatchedStrategy.order_ready(&mut kitchen, OrderId(2), t0 + secs(3)).unwrap();

        let pickup = outcome.pickup().unwrap();
        assert_eq!((pickup.order_id, pickup.courier_id), (OrderId(2), CourierId(2)));
        assert!((pickup.courier_wait_ms - 3000.0).abs() < 1e-6);
        assert_eq!(kitchen.pending_orders(), vec![OrderId(1)]);
        assert_eq!(kitchen.waiting_couriers(), vec![CourierId(1)]);
    }

    #[test]
    fn test_courier_for_unknown_order_keeps_waiting() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        MatchedStrategy.dispatch(&mut kitchen, Courier::bound_to(1, 42));

        let outcome = MatchedStrategy.courier_arrival(&mut kitchen, CourierId(1), t0);
        assert_eq!(outcome, MatchOutcome::Waiting);
        assert_eq!(kitchen.waiting_couriers(), vec![CourierId(1)]);
    }
}
