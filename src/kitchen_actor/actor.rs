//! # Kitchen Actor
//!
//! The actor owns the [`Kitchen`] registry and the chosen [`DispatchStrategy`]. Requests
//! are handled one at a time off a bounded channel, so every match attempt sees the
//! registry without interference from any other.
//!
//! Two things happen here that the registry cannot do on its own:
//!
//! - **Retries.** When a pickup fails on an order whose `ready_time` is still ahead,
//!   a timer task is spawned that sends [`KitchenRequest::RetryArrival`] back to the
//!   actor at that instant. It holds only a weak sender, so pending retries never keep
//!   the actor alive after every client is gone.
//! - **The terminal sweep.** [`KitchenRequest::ProcessUnpicked`] runs repeated match
//!   passes over every arrived courier. When a pass makes no progress while something
//!   that could still unblock it (an order cooking or a retry in flight) is outstanding,
//!   the caller is parked and the sweep resumes on the next relevant event instead of
//!   polling.

use super::error::KitchenError;
use super::kitchen::Kitchen;
use super::message::{KitchenRequest, Response};
use super::report::SweepReport;
use crate::clients::KitchenClient;
use crate::dispatch::{DispatchStrategy, MatchOutcome};
use crate::model::CourierId;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A sweep that could not settle yet, together with everyone waiting on its report.
#[derive(Debug, Default)]
struct ParkedSweep {
    picked_up: usize,
    waiters: Vec<Response<SweepReport>>,
}

pub struct KitchenActor {
    receiver: mpsc::Receiver<KitchenRequest>,
    retry_sender: mpsc::WeakSender<KitchenRequest>,
    kitchen: Kitchen,
    strategy: Box<dyn DispatchStrategy>,
    retries_in_flight: usize,
    sweep: Option<ParkedSweep>,
}

impl KitchenActor {
    pub fn new(buffer_size: usize, strategy: Box<dyn DispatchStrategy>) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            retry_sender: sender.downgrade(),
            kitchen: Kitchen::new(),
            strategy,
            retries_in_flight: 0,
            sweep: None,
        };
        (actor, KitchenClient::new(sender))
    }

    pub async fn run(mut self) {
        let strategy = self.strategy.kind();
        info!(%strategy, "Kitchen started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }

        let snapshot = self.kitchen.snapshot();
        info!(
            %strategy,
            pickups = snapshot.pickups,
            pending = snapshot.pending_orders.len(),
            waiting = snapshot.waiting_couriers.len(),
            "Kitchen shutdown"
        );
    }

    fn handle(&mut self, msg: KitchenRequest) {
        let now = Instant::now();
        match msg {
            KitchenRequest::ReceiveOrder { order, respond_to } => {
                self.kitchen.receive_order(order);
                let _ = respond_to.send(Ok(()));
            }
            KitchenRequest::StartPreparation { order_id, respond_to } => {
                let result = self
                    .kitchen
                    .start_preparing(order_id)
                    .ok_or(KitchenError::UnknownOrder(order_id));
                if result.is_err() {
                    warn!(%order_id, "Preparation requested for unknown order");
                }
                let _ = respond_to.send(result);
            }
            KitchenRequest::OrderReady { order_id, respond_to } => {
                let result = self
                    .kitchen
                    .order_prepared(order_id, now)
                    .ok_or(KitchenError::UnknownOrder(order_id));
                match result {
                    Ok(_) => {
                        if let Some(outcome) = self.strategy.order_ready(&mut self.kitchen, order_id, now) {
                            self.follow_up(&outcome);
                        }
                    }
                    Err(_) => warn!(%order_id, "Ready signal for unknown order"),
                }
                let _ = respond_to.send(result);
                self.resume_sweep(now);
            }
            KitchenRequest::CancelPreparation { order_id } => {
                if self.kitchen.cancel_preparation(order_id) {
                    self.resume_sweep(now);
                }
            }
            KitchenRequest::DispatchCourier { courier, respond_to } => {
                self.strategy.dispatch(&mut self.kitchen, courier);
                let _ = respond_to.send(Ok(()));
            }
            KitchenRequest::CourierArrival { courier_id, respond_to } => {
                let outcome = self.strategy.courier_arrival(&mut self.kitchen, courier_id, now);
                self.follow_up(&outcome);
                let _ = respond_to.send(Ok(outcome));
                self.resume_sweep(now);
            }
            KitchenRequest::RetryArrival { courier_id } => {
                self.retries_in_flight = self.retries_in_flight.saturating_sub(1);
                let outcome = self.strategy.try_match(&mut self.kitchen, courier_id, now);
                debug!(%courier_id, ?outcome, "Retry");
                self.follow_up(&outcome);
                self.resume_sweep(now);
            }
            KitchenRequest::ProcessUnpicked { respond_to } => {
                info!(
                    pending = self.kitchen.pending_orders().len(),
                    waiting = self.kitchen.waiting_couriers().len(),
                    "Processing unpicked orders"
                );
                self.sweep.get_or_insert_with(ParkedSweep::default).waiters.push(respond_to);
                self.resume_sweep(now);
            }
            KitchenRequest::Stats { respond_to } => {
                let _ = respond_to.send(Ok(self.kitchen.stats()));
            }
            KitchenRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.kitchen.snapshot()));
            }
        }
    }

    fn follow_up(&mut self, outcome: &MatchOutcome) {
        if let MatchOutcome::Retry { courier_id, at } = *outcome {
            self.schedule_retry(courier_id, at);
        }
    }

    fn schedule_retry(&mut self, courier_id: CourierId, at: Instant) {
        let sender = self.retry_sender.clone();
        self.retries_in_flight += 1;
        debug!(%courier_id, "Retry scheduled");
        tokio::spawn(async move {
            tokio::time::sleep_until(at).await;
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(KitchenRequest::RetryArrival { courier_id }).await;
            }
        });
    }

    /// Runs match passes until one makes no progress. Returns the number of pickups.
    fn sweep_pass(&mut self, now: Instant) -> usize {
        let mut picked_up = 0;
        while self.kitchen.has_pending_orders() {
            let mut progress = 0;
            for courier_id in self.kitchen.arrived_couriers() {
                let outcome = self.strategy.try_match(&mut self.kitchen, courier_id, now);
                if outcome.is_picked_up() {
                    progress += 1;
                }
                self.follow_up(&outcome);
            }
            if progress == 0 {
                break;
            }
            picked_up += progress;
        }
        picked_up
    }

    /// The sweep is done when nothing is pending, or when no future event could
    /// produce another pickup.
    fn sweep_settled(&self) -> bool {
        if !self.kitchen.has_pending_orders() {
            return true;
        }
        let event_expected = self.kitchen.is_cooking() || self.retries_in_flight > 0;
        !(event_expected && !self.kitchen.arrived_couriers().is_empty())
    }

    fn resume_sweep(&mut self, now: Instant) {
        let Some(mut sweep) = self.sweep.take() else {
            return;
        };
        sweep.picked_up += self.sweep_pass(now);

        if !self.sweep_settled() {
            debug!(picked_up = sweep.picked_up, "Sweep parked until the next kitchen event");
            self.sweep = Some(sweep);
            return;
        }

        let report = SweepReport {
            picked_up: sweep.picked_up,
            unpicked_orders: self.kitchen.pending_orders(),
            idle_couriers: self.kitchen.waiting_couriers(),
        };
        if report.is_clean() {
            info!(picked_up = report.picked_up, "Sweep complete");
        } else {
            warn!(
                picked_up = report.picked_up,
                unpicked = report.unpicked_orders.len(),
                idle_couriers = report.idle_couriers.len(),
                "Sweep complete with unpicked orders"
            );
        }
        for waiter in sweep.waiters {
            let _ = waiter.send(Ok(report.clone()));
        }
    }
}
