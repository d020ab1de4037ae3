use super::config::SimulationConfig;
use crate::clients::KitchenClient;
use crate::dispatch::StrategyKind;
use crate::kitchen_actor::{KitchenError, KitchenStats, SweepReport};
use crate::lifecycle::KitchenSystem;
use crate::model::{Courier, Order, OrderCreate, OrderId};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

type KitchenTask = JoinHandle<Result<(), KitchenError>>;

/// What a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub strategy: StrategyKind,
    pub orders: usize,
    pub pickups: usize,
    pub average_food_wait_ms: Option<f64>,
    pub average_courier_wait_ms: Option<f64>,
    pub sweep: SweepReport,
    pub stats: KitchenStats,
}

/// Feeds `orders` to the kitchen and dispatches one courier per order, concurrently.
///
/// Waits for every preparation and every courier arrival, runs the final
/// reconciliation sweep and returns the collected statistics.
pub async fn run(
    system: &KitchenSystem,
    config: &SimulationConfig,
    orders: Vec<OrderCreate>,
) -> anyhow::Result<SimulationReport> {
    config.validate()?;
    let strategy = system.strategy();
    let client = system.kitchen_client.clone();
    let order_ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
    let total = orders.len();
    info!(%strategy, orders = total, "Starting simulation");

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let producer = tokio::spawn(
        generate_orders(client.clone(), orders, config.order_interval)
            .instrument(tracing::info_span!("order_generation")),
    );
    let dispatcher = tokio::spawn(
        dispatch_couriers(client.clone(), strategy, order_ids, config.clone(), rng)
            .instrument(tracing::info_span!("courier_dispatch")),
    );

    let mut tasks = producer.await?.context("order generation failed")?;
    tasks.extend(dispatcher.await?.context("courier dispatch failed")?);
    for task in tasks {
        task.await?.context("kitchen task failed")?;
    }

    let sweep = client
        .process_unpicked_orders()
        .await
        .context("process unpicked orders")?;
    let stats = client.stats().await.context("collect statistics")?;
    log_statistics(&stats);

    Ok(SimulationReport {
        strategy,
        orders: total,
        pickups: stats.pickups(),
        average_food_wait_ms: stats.average_food_wait_ms(),
        average_courier_wait_ms: stats.average_courier_wait_ms(),
        sweep,
        stats,
    })
}

async fn generate_orders(
    client: KitchenClient,
    orders: Vec<OrderCreate>,
    interval: Duration,
) -> Result<Vec<KitchenTask>, KitchenError> {
    let mut tasks = Vec::with_capacity(orders.len());
    for descriptor in orders {
        let order = Order::from(descriptor);
        let order_id = order.id;
        client.receive_order(order).await?;

        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.prepare_order(order_id).await.map(|_| ())
        }));
        tokio::time::sleep(interval).await;
    }
    Ok(tasks)
}

async fn dispatch_couriers(
    client: KitchenClient,
    strategy: StrategyKind,
    order_ids: Vec<OrderId>,
    config: SimulationConfig,
    mut rng: StdRng,
) -> Result<Vec<KitchenTask>, KitchenError> {
    let min = config.min_arrival_delay.as_secs_f64();
    let max = config.max_arrival_delay.as_secs_f64();

    let mut tasks = Vec::with_capacity(order_ids.len());
    for (i, order_id) in order_ids.into_iter().enumerate() {
        let courier = match strategy {
            StrategyKind::Fifo => Courier::new(i as u64),
            StrategyKind::Matched => Courier::bound_to(i as u64, order_id),
        };
        let courier_id = courier.id;
        client.dispatch_courier(courier).await?;

        let delay = Duration::from_secs_f64(rng.gen_range(min..=max));
        debug!(%courier_id, delay_secs = delay.as_secs_f64(), "Courier on the way");
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = client.courier_arrival(courier_id).await?;
            debug!(%courier_id, picked_up = outcome.is_picked_up(), "Arrival handled");
            Ok::<_, KitchenError>(())
        }));
        tokio::time::sleep(config.courier_interval).await;
    }
    Ok(tasks)
}

fn log_statistics(stats: &KitchenStats) {
    info!("--- Final Statistics ---");
    match stats.average_food_wait_ms() {
        Some(avg) => info!(avg_ms = avg, samples = stats.food_wait_times.len(), "Average Food Wait Time"),
        None => warn!("No Food Wait Time data available."),
    }
    match stats.average_courier_wait_ms() {
        Some(avg) => info!(avg_ms = avg, samples = stats.courier_wait_times.len(), "Average Courier Wait Time"),
        None => warn!("No Courier Wait Time data available."),
    }
}
