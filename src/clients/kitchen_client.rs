use crate::dispatch::MatchOutcome;
use crate::kitchen_actor::{KitchenError, KitchenRequest, KitchenSnapshot, KitchenStats, Response, SweepReport};
use crate::model::{Courier, CourierId, Order, OrderId};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Kitchen actor.
///
/// Cheap to clone; every clone feeds the same actor. The kitchen shuts down once the
/// last clone is dropped.
#[derive(Clone, Debug)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(&self, build: impl FnOnce(Response<T>) -> KitchenRequest) -> Result<T, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| KitchenError::ActorClosed)?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn receive_order(&self, order: Order) -> Result<(), KitchenError> {
        debug!(?order, "receive_order called");
        self.request(|respond_to| KitchenRequest::ReceiveOrder { order, respond_to })
            .await
    }

    /// Cooks the order and marks it ready. Returns the stamped `ready_time`.
    ///
    /// The wait happens in the caller's task; the kitchen keeps serving other
    /// requests while the order is cooking. Dropping the future before it resolves
    /// tells the kitchen the order is no longer cooking.
    #[instrument(skip(self))]
    pub async fn prepare_order(&self, order_id: OrderId) -> Result<Instant, KitchenError> {
        let mut guard = PreparationGuard {
            sender: &self.sender,
            order_id,
            armed: true,
        };
        let result = self.cook(order_id).await;
        guard.armed = false;
        result
    }

    async fn cook(&self, order_id: OrderId) -> Result<Instant, KitchenError> {
        let prep_time = self
            .request(|respond_to| KitchenRequest::StartPreparation { order_id, respond_to })
            .await?;
        debug!(prep_secs = prep_time.as_secs_f64(), "Cooking");
        tokio::time::sleep(prep_time).await;
        self.request(|respond_to| KitchenRequest::OrderReady { order_id, respond_to })
            .await
    }

    #[instrument(skip(self, courier), fields(courier_id = %courier.id))]
    pub async fn dispatch_courier(&self, courier: Courier) -> Result<(), KitchenError> {
        debug!(?courier, "dispatch_courier called");
        self.request(|respond_to| KitchenRequest::DispatchCourier { courier, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn courier_arrival(&self, courier_id: CourierId) -> Result<MatchOutcome, KitchenError> {
        self.request(|respond_to| KitchenRequest::CourierArrival { courier_id, respond_to })
            .await
    }

    /// Matches whatever can still be matched and reports what is left over.
    ///
    /// Resolves once no pending order can be picked up anymore, which may mean waiting
    /// for orders that are still cooking.
    #[instrument(skip(self))]
    pub async fn process_unpicked_orders(&self) -> Result<SweepReport, KitchenError> {
        info!("Sending process_unpicked_orders to kitchen");
        self.request(|respond_to| KitchenRequest::ProcessUnpicked { respond_to })
            .await
    }

    pub async fn stats(&self) -> Result<KitchenStats, KitchenError> {
        self.request(|respond_to| KitchenRequest::Stats { respond_to }).await
    }

    pub async fn snapshot(&self) -> Result<KitchenSnapshot, KitchenError> {
        self.request(|respond_to| KitchenRequest::Snapshot { respond_to }).await
    }
}

/// Sends `CancelPreparation` if a `prepare_order` future is dropped midway.
struct PreparationGuard<'a> {
    sender: &'a mpsc::Sender<KitchenRequest>,
    order_id: OrderId,
    armed: bool,
}

impl Drop for PreparationGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let order_id = self.order_id;
        debug!(%order_id, "prepare_order dropped before the order was ready");
        match self.sender.try_send(KitchenRequest::CancelPreparation { order_id }) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(msg)) => {
                // Queue is full; hand the message to a task when a runtime is around.
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let sender = self.sender.clone();
                    handle.spawn(async move {
                        let _ = sender.send(msg).await;
                    });
                } else {
                    warn!(%order_id, "Could not report abandoned preparation");
                }
            }
        }
    }
}
