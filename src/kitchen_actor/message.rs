//! # Kitchen Messages
//!
//! Requests sent from [`KitchenClient`](crate::clients::KitchenClient) to the
//! [`KitchenActor`](super::KitchenActor). Each variant that expects an answer carries a
//! oneshot [`Response`] sender.

use super::error::KitchenError;
use super::report::{KitchenSnapshot, KitchenStats, SweepReport};
use crate::dispatch::MatchOutcome;
use crate::model::{Courier, CourierId, Order, OrderId};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, KitchenError>>;

#[derive(Debug)]
pub enum KitchenRequest {
    ReceiveOrder {
        order: Order,
        respond_to: Response<()>,
    },
    /// Marks the order as cooking; answers with its preparation time.
    StartPreparation {
        order_id: OrderId,
        respond_to: Response<Duration>,
    },
    /// Cooking finished; answers with the stamped `ready_time`.
    OrderReady {
        order_id: OrderId,
        respond_to: Response<Instant>,
    },
    /// The caller stopped waiting on a preparation before it finished. Fire-and-forget.
    CancelPreparation { order_id: OrderId },
    DispatchCourier {
        courier: Courier,
        respond_to: Response<()>,
    },
    CourierArrival {
        courier_id: CourierId,
        respond_to: Response<MatchOutcome>,
    },
    /// Scheduled by the actor itself after a failed pickup. Fire-and-forget.
    RetryArrival { courier_id: CourierId },
    ProcessUnpicked {
        respond_to: Response<SweepReport>,
    },
    Stats {
        respond_to: Response<KitchenStats>,
    },
    Snapshot {
        respond_to: Response<KitchenSnapshot>,
    },
}
