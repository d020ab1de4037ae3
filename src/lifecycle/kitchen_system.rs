use crate::clients::KitchenClient;
use crate::dispatch::StrategyKind;
use crate::kitchen_actor::KitchenError;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runtime orchestrator for the kitchen.
///
/// `KitchenSystem` spawns the [`KitchenActor`](crate::kitchen_actor::KitchenActor) with the
/// configured dispatch strategy, hands out its client and keeps the task handle so the
/// kitchen can be shut down gracefully.
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(StrategyKind::Fifo);
///
/// system.kitchen_client.receive_order(order).await?;
/// system.kitchen_client.prepare_order(order_id).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Client for interacting with the Kitchen actor
    pub kitchen_client: KitchenClient,

    strategy: StrategyKind,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl KitchenSystem {
    /// Spawns the kitchen actor running `strategy`. Must be called inside a Tokio runtime.
    pub fn new(strategy: StrategyKind) -> Self {
        let (actor, kitchen_client) = crate::kitchen_actor::new(strategy);
        let handle = tokio::spawn(actor.run());

        Self {
            kitchen_client,
            strategy,
            handle,
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Gracefully shuts the kitchen down.
    ///
    /// Drops this system's client, which closes the channel once every other clone is gone
    /// too, then waits for the actor to drain its queue and exit.
    pub async fn shutdown(self) -> Result<(), KitchenError> {
        info!(strategy = %self.strategy, "Shutting down kitchen");
        drop(self.kitchen_client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Kitchen task failed");
            return Err(e.into());
        }

        info!("Kitchen shutdown complete.");
        Ok(())
    }
}
