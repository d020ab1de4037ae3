//! # Kitchen Dispatch
//!
//! Runs a kitchen simulation with the chosen dispatch strategy:
//!
//! ```bash
//! RUST_LOG=info cargo run -- fifo
//! RUST_LOG=info cargo run -- matched --orders dispatch_orders.json --seed 7
//! ```

use anyhow::Context;
use clap::Parser;
use kitchen_dispatch::dispatch::StrategyKind;
use kitchen_dispatch::lifecycle::{setup_tracing, KitchenSystem};
use kitchen_dispatch::simulation::{self, load_orders, SimulationConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "kitchen-dispatch")]
#[command(about = "Simulate a kitchen order dispatch system", long_about = None)]
struct Cli {
    /// Dispatch strategy
    #[arg(value_enum)]
    strategy: StrategyKind,

    /// JSON array of {id, name, prepTime} order descriptors
    #[arg(long, default_value = "dispatch_orders.json")]
    orders: PathBuf,

    /// Milliseconds between two received orders
    #[arg(long, default_value_t = 500)]
    order_interval_ms: u64,

    /// Milliseconds between two dispatched couriers
    #[arg(long, default_value_t = 500)]
    courier_interval_ms: u64,

    /// Shortest courier travel time, in seconds
    #[arg(long, default_value_t = 3.0)]
    min_arrival_secs: f64,

    /// Longest courier travel time, in seconds
    #[arg(long, default_value_t = 15.0)]
    max_arrival_secs: f64,

    /// Seed for courier travel times
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final report as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn config(&self) -> anyhow::Result<SimulationConfig> {
        let min = Duration::try_from_secs_f64(self.min_arrival_secs).context("invalid --min-arrival-secs")?;
        let max = Duration::try_from_secs_f64(self.max_arrival_secs).context("invalid --max-arrival-secs")?;
        let config = SimulationConfig {
            orders_path: self.orders.clone(),
            order_interval: Duration::from_millis(self.order_interval_ms),
            courier_interval: Duration::from_millis(self.courier_interval_ms),
            min_arrival_delay: min,
            max_arrival_delay: max,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing();

    // Bad input is fatal before the kitchen exists.
    let config = cli.config()?;
    let orders = load_orders(&config.orders_path)?;
    info!(strategy = %cli.strategy, orders = orders.len(), "Starting kitchen dispatch");

    let system = KitchenSystem::new(cli.strategy);
    let report = simulation::run(&system, &config, orders).await?;
    system.shutdown().await.context("kitchen shutdown")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    info!(pickups = report.pickups, unpicked = report.sweep.unpicked_orders.len(), "Simulation finished");
    Ok(())
}
