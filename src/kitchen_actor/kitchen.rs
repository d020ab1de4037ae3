//! # Kitchen Registry
//!
//! [`Kitchen`] is the shared state every match decision works against: pending orders in
//! receive order, waiting couriers in dispatch order, id indices for both, the set of
//! orders currently cooking and the two wait-time sample collections.
//!
//! The struct itself has no locking. It is owned by the [`KitchenActor`](super::KitchenActor),
//! which hands out `&mut Kitchen` to exactly one message handler at a time; that
//! borrow *is* the exclusive section.
//!
//! ## Invariants
//! - An order is in `orders`/`order_map` iff it has not been picked up.
//! - A courier is in `couriers`/`courier_map` iff it has not picked up an order.
//! - Each successful pickup appends exactly one sample to each collection.

use super::report::{KitchenSnapshot, KitchenStats};
use crate::dispatch::{MatchOutcome, Pickup};
use crate::model::{Courier, CourierId, Order, OrderId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct Kitchen {
    orders: VecDeque<OrderId>,
    couriers: VecDeque<CourierId>,
    order_map: HashMap<OrderId, Order>,
    courier_map: HashMap<CourierId, Courier>,
    cooking: HashSet<OrderId>,
    departed: HashSet<CourierId>,
    food_wait_times: Vec<f64>,
    courier_wait_times: Vec<f64>,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Order lifecycle ---

    /// Adds an order to the pending collection and the id index.
    ///
    /// Ids are expected to be unique. A duplicate overwrites the index entry and keeps
    /// the original position in the pending collection.
    ///
    /// A courier dispatched for this id before the order arrived is recorded on the order.
    pub fn receive_order(&mut self, mut order: Order) {
        let order_id = order.id;
        if order.courier_id.is_none() {
            order.courier_id = self
                .couriers
                .iter()
                .filter_map(|id| self.courier_map.get(id))
                .find(|courier| courier.order_id == Some(order_id))
                .map(|courier| courier.id);
        }
        info!(%order_id, name = %order.name, prep_secs = order.prep_time.as_secs_f64(), "Order received");
        if self.order_map.insert(order_id, order).is_some() {
            warn!(%order_id, "Duplicate order id, index entry overwritten");
        } else {
            self.orders.push_back(order_id);
        }
    }

    /// Marks a pending order as cooking and returns how long it takes.
    pub fn start_preparing(&mut self, order_id: OrderId) -> Option<Duration> {
        let prep_time = self.order_map.get(&order_id)?.prep_time;
        self.cooking.insert(order_id);
        debug!(%order_id, prep_secs = prep_time.as_secs_f64(), "Order cooking");
        Some(prep_time)
    }

    /// Stamps the order's `ready_time` with `now` (first call only) and returns it.
    pub fn order_prepared(&mut self, order_id: OrderId, now: Instant) -> Option<Instant> {
        self.cooking.remove(&order_id);
        let order = self.order_map.get_mut(&order_id)?;
        if order.mark_ready(now) {
            info!(%order_id, name = %order.name, "Order prepared");
        }
        order.ready_time
    }

    /// Drops `order_id` from the cooking set without stamping it ready.
    ///
    /// Used when a preparation is abandoned; the order stays pending but can no longer
    /// become ready on its own. Returns whether the order was cooking.
    pub fn cancel_preparation(&mut self, order_id: OrderId) -> bool {
        let was_cooking = self.cooking.remove(&order_id);
        if was_cooking {
            warn!(%order_id, "Preparation abandoned before the order was ready");
        }
        was_cooking
    }

    // --- Courier lifecycle ---

    /// Appends a courier to the waiting collection and indexes it.
    pub fn enqueue_courier(&mut self, courier: Courier) {
        let courier_id = courier.id;
        if self.courier_map.insert(courier_id, courier).is_some() {
            warn!(%courier_id, "Duplicate courier id, index entry overwritten");
        } else {
            self.couriers.push_back(courier_id);
        }
    }

    // --- Lookups ---

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.order_map.get(&order_id)
    }

    pub fn order_mut(&mut self, order_id: OrderId) -> Option<&mut Order> {
        self.order_map.get_mut(&order_id)
    }

    pub fn courier(&self, courier_id: CourierId) -> Option<&Courier> {
        self.courier_map.get(&courier_id)
    }

    pub fn courier_mut(&mut self, courier_id: CourierId) -> Option<&mut Courier> {
        self.courier_map.get_mut(&courier_id)
    }

    pub fn pending_orders(&self) -> Vec<OrderId> {
        self.orders.iter().copied().collect()
    }

    pub fn waiting_couriers(&self) -> Vec<CourierId> {
        self.couriers.iter().copied().collect()
    }

    /// Waiting couriers that have already arrived, in dispatch order.
    pub fn arrived_couriers(&self) -> Vec<CourierId> {
        self.couriers
            .iter()
            .filter(|id| self.courier_map.get(*id).is_some_and(Courier::has_arrived))
            .copied()
            .collect()
    }

    /// Whether the courier already left with an order.
    pub fn has_departed(&self, courier_id: CourierId) -> bool {
        self.departed.contains(&courier_id)
    }

    pub fn has_pending_orders(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn is_cooking(&self) -> bool {
        !self.cooking.is_empty()
    }

    /// The pending order with the earliest `ready_time`; ties go to the order received first.
    pub fn oldest_ready_order(&self) -> Option<OrderId> {
        self.orders
            .iter()
            .filter_map(|id| Some((self.order_map.get(id)?.ready_time?, *id)))
            .min_by_key(|(ready_time, _)| *ready_time)
            .map(|(_, id)| id)
    }

    /// The eligible waiting courier that arrived first.
    pub fn first_arrived_courier(&self, eligible: impl Fn(&Courier) -> bool) -> Option<CourierId> {
        self.couriers
            .iter()
            .filter_map(|id| self.courier_map.get(id))
            .filter(|courier| eligible(courier))
            .filter_map(|courier| Some((courier.arrival_time?, courier.id)))
            .min_by_key(|(arrival_time, _)| *arrival_time)
            .map(|(_, id)| id)
    }

    // --- Pickup protocol ---

    /// Takes `order_id` and `courier_id` out of the registry, validates the pickup and
    /// either completes it or puts both back untouched.
    ///
    /// Removal, validation, sample recording and re-insertion all happen within this one
    /// call, so no other match attempt can observe a half-claimed pair.
    pub fn claim(&mut self, order_id: OrderId, courier_id: CourierId, now: Instant) -> MatchOutcome {
        let Some(order) = self.order_map.remove(&order_id) else {
            return MatchOutcome::Waiting;
        };
        let Some(courier) = self.courier_map.remove(&courier_id) else {
            self.order_map.insert(order_id, order);
            return MatchOutcome::Unavailable;
        };

        match self.record_pickup(&order, &courier, now) {
            Some(pickup) => {
                self.orders.retain(|id| *id != order_id);
                self.couriers.retain(|id| *id != courier_id);
                self.departed.insert(courier_id);
                MatchOutcome::PickedUp(pickup)
            }
            None => {
                let retry_at = order.ready_time.filter(|ready_time| *ready_time > now);
                self.order_map.insert(order_id, order);
                self.courier_map.insert(courier_id, courier);
                match retry_at {
                    Some(at) => MatchOutcome::Retry { courier_id, at },
                    None => MatchOutcome::Waiting,
                }
            }
        }
    }

    /// Validates a pickup and, on success, records both wait-time samples.
    ///
    /// Returns `false` without recording anything when the order has no `ready_time`,
    /// the courier has no `arrival_time`, or `ready_time` lies after `now`.
    /// Does not touch the pending/waiting collections.
    pub fn pickup_order(&mut self, order: &Order, courier: &Courier, now: Instant) -> bool {
        self.record_pickup(order, courier, now).is_some()
    }

    fn record_pickup(&mut self, order: &Order, courier: &Courier, now: Instant) -> Option<Pickup> {
        let Some(ready_time) = order.ready_time else {
            debug!(order_id = %order.id, "Pickup rejected, order not prepared");
            return None;
        };
        let Some(arrival_time) = courier.arrival_time else {
            debug!(courier_id = %courier.id, "Pickup rejected, courier not arrived");
            return None;
        };
        if ready_time > now {
            debug!(order_id = %order.id, "Pickup rejected, ready time is in the future");
            return None;
        }

        let food_wait_ms = elapsed_ms(now, ready_time);
        let courier_wait_ms = elapsed_ms(now, arrival_time);
        self.food_wait_times.push(food_wait_ms);
        self.courier_wait_times.push(courier_wait_ms);

        info!(order_id = %order.id, courier_id = %courier.id, food_wait_ms, courier_wait_ms, "Order picked up");
        Some(Pickup {
            order_id: order.id,
            courier_id: courier.id,
            food_wait_ms,
            courier_wait_ms,
        })
    }

    // --- Read views ---

    pub fn stats(&self) -> KitchenStats {
        KitchenStats {
            food_wait_times: self.food_wait_times.clone(),
            courier_wait_times: self.courier_wait_times.clone(),
        }
    }

    pub fn snapshot(&self) -> KitchenSnapshot {
        let mut cooking: Vec<OrderId> = self.cooking.iter().copied().collect();
        cooking.sort();
        KitchenSnapshot {
            pending_orders: self.pending_orders(),
            waiting_couriers: self.waiting_couriers(),
            cooking,
            pickups: self.food_wait_times.len(),
        }
    }
}

/// Absolute distance between two instants, in milliseconds.
fn elapsed_ms(a: Instant, b: Instant) -> f64 {
    let distance = a.saturating_duration_since(b).max(b.saturating_duration_since(a));
    distance.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn ready_order(id: u64, at: Instant) -> Order {
        let mut order = Order::new(id, "Pizza", secs(1));
        order.mark_ready(at);
        order
    }

    fn arrived_courier(id: u64, at: Instant) -> Courier {
        let mut courier = Courier::new(id);
        courier.mark_arrived(at);
        courier
    }

    #[test]
    fn test_receive_order_keeps_arrival_order() {
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(3, "Soup", secs(1)));
        kitchen.receive_order(Order::new(1, "Pizza", secs(1)));
        kitchen.receive_order(Order::new(2, "Burger", secs(1)));

        assert_eq!(kitchen.pending_orders(), vec![OrderId(3), OrderId(1), OrderId(2)]);
        assert!(kitchen.order(OrderId(1)).is_some());
    }

    #[test]
    fn test_duplicate_order_overwrites_index_only() {
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(1)));
        kitchen.receive_order(Order::new(1, "Calzone", secs(2)));

        assert_eq!(kitchen.pending_orders(), vec![OrderId(1)]);
        assert_eq!(kitchen.order(OrderId(1)).unwrap().name, "Calzone");
    }

    #[test]
    fn test_preparation_tracks_cooking_orders() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(2)));

        assert_eq!(kitchen.start_preparing(OrderId(1)), Some(secs(2)));
        assert!(kitchen.is_cooking());
        assert_eq!(kitchen.start_preparing(OrderId(9)), None);

        assert_eq!(kitchen.order_prepared(OrderId(1), t0 + secs(2)), Some(t0 + secs(2)));
        assert!(!kitchen.is_cooking());
        // A second completion leaves the first stamp in place.
        assert_eq!(kitchen.order_prepared(OrderId(1), t0 + secs(5)), Some(t0 + secs(2)));
    }

    #[test]
    fn test_cancelled_preparation_leaves_order_pending() {
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(5)));
        kitchen.start_preparing(OrderId(1));

        assert!(kitchen.cancel_preparation(OrderId(1)));
        assert!(!kitchen.is_cooking());
        assert!(!kitchen.cancel_preparation(OrderId(1)));
        assert_eq!(kitchen.pending_orders(), vec![OrderId(1)]);
        assert!(kitchen.order(OrderId(1)).unwrap().ready_time.is_none());
    }

    #[test]
    fn test_claimed_courier_is_remembered_as_departed() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(ready_order(1, t0));
        kitchen.enqueue_courier(arrived_courier(1, t0));
        assert!(!kitchen.has_departed(CourierId(1)));

        assert!(kitchen.claim(OrderId(1), CourierId(1), t0 + secs(1)).is_picked_up());
        assert!(kitchen.has_departed(CourierId(1)));
        assert!(!kitchen.has_departed(CourierId(2)));
    }

    #[test]
    fn test_late_order_records_its_bound_courier() {
        let mut kitchen = Kitchen::new();
        kitchen.enqueue_courier(Courier::bound_to(4, 2));
        kitchen.receive_order(Order::new(2, "Burger", secs(1)));
        kitchen.receive_order(Order::new(3, "Salad", secs(1)));

        assert_eq!(kitchen.order(OrderId(2)).unwrap().courier_id, Some(CourierId(4)));
        assert_eq!(kitchen.order(OrderId(3)).unwrap().courier_id, None);
    }

    #[test]
    fn test_pickup_rejects_unprepared_order() {
        let now = Instant::now();
        let mut kitchen = Kitchen::new();
        let order = Order::new(1, "Pizza", secs(1));
        let courier = arrived_courier(1, now);

        assert!(!kitchen.pickup_order(&order, &courier, now));
        assert!(kitchen.stats().food_wait_times.is_empty());
    }

    #[test]
    fn test_pickup_rejects_courier_not_arrived() {
        let now = Instant::now();
        let mut kitchen = Kitchen::new();
        let order = ready_order(1, now);
        let courier = Courier::new(1);

        assert!(!kitchen.pickup_order(&order, &courier, now));
        assert!(kitchen.stats().courier_wait_times.is_empty());
    }

    #[test]
    fn test_pickup_rejects_future_ready_time() {
        let now = Instant::now();
        let mut kitchen = Kitchen::new();
        let order = ready_order(1, now + secs(1));
        let courier = arrived_courier(1, now);

        assert!(!kitchen.pickup_order(&order, &courier, now));
        assert_eq!(kitchen.stats(), KitchenStats::default());
    }

    #[test]
    fn test_pickup_records_wait_times_in_ms() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        let order = ready_order(1, t0 + Duration::from_millis(1500));
        let courier = arrived_courier(1, t0);

        assert!(kitchen.pickup_order(&order, &courier, t0 + secs(2)));

        let stats = kitchen.stats();
        assert_eq!(stats.food_wait_times, vec![500.0]);
        assert_eq!(stats.courier_wait_times, vec![2000.0]);
    }

    #[test]
    fn test_failed_claim_puts_both_back_in_place() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(1)));
        kitchen.receive_order(ready_order(2, t0 + secs(3)));
        kitchen.receive_order(Order::new(3, "Soup", secs(1)));
        kitchen.enqueue_courier(arrived_courier(1, t0));
        kitchen.enqueue_courier(arrived_courier(2, t0));

        let outcome = kitchen.claim(OrderId(2), CourierId(1), t0);

        assert_eq!(
            outcome,
            MatchOutcome::Retry {
                courier_id: CourierId(1),
                at: t0 + secs(3)
            }
        );
        assert_eq!(kitchen.pending_orders(), vec![OrderId(1), OrderId(2), OrderId(3)]);
        assert_eq!(kitchen.waiting_couriers(), vec![CourierId(1), CourierId(2)]);
        assert!(kitchen.order(OrderId(2)).is_some());
        assert!(kitchen.courier(CourierId(1)).is_some());
    }

    #[test]
    fn test_claim_of_unprepared_order_waits() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(1)));
        kitchen.enqueue_courier(arrived_courier(1, t0));

        assert_eq!(kitchen.claim(OrderId(1), CourierId(1), t0), MatchOutcome::Waiting);
        assert_eq!(kitchen.claim(OrderId(9), CourierId(1), t0), MatchOutcome::Waiting);
        assert_eq!(kitchen.claim(OrderId(1), CourierId(9), t0), MatchOutcome::Unavailable);
        assert_eq!(kitchen.pending_orders(), vec![OrderId(1)]);
        assert!(kitchen.order(OrderId(1)).is_some());
    }

    #[test]
    fn test_successful_claim_drops_both_from_every_index() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(ready_order(1, t0));
        kitchen.enqueue_courier(arrived_courier(7, t0));

        let outcome = kitchen.claim(OrderId(1), CourierId(7), t0 + secs(1));

        assert!(outcome.is_picked_up());
        assert!(kitchen.order(OrderId(1)).is_none());
        assert!(kitchen.courier(CourierId(7)).is_none());
        let snapshot = kitchen.snapshot();
        assert!(snapshot.pending_orders.is_empty());
        assert!(snapshot.waiting_couriers.is_empty());
        assert_eq!(snapshot.pickups, 1);
    }

    #[test]
    fn test_oldest_ready_order_ties_go_to_first_received() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.receive_order(Order::new(1, "Pizza", secs(1)));
        kitchen.receive_order(ready_order(2, t0 + secs(1)));
        kitchen.receive_order(ready_order(3, t0 + secs(1)));

        assert_eq!(kitchen.oldest_ready_order(), Some(OrderId(2)));
    }

    #[test]
    fn test_arrived_couriers_skips_those_still_on_the_road() {
        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        kitchen.enqueue_courier(Courier::new(1));
        kitchen.enqueue_courier(arrived_courier(2, t0 + secs(2)));
        kitchen.enqueue_courier(arrived_courier(3, t0 + secs(1)));

        assert_eq!(kitchen.arrived_couriers(), vec![CourierId(2), CourierId(3)]);
        assert_eq!(kitchen.first_arrived_courier(|_| true), Some(CourierId(3)));
    }
}
