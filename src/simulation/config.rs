use crate::model::OrderCreate;
use anyhow::{ensure, Context};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Knobs of the collaborator driver. The kitchen itself only needs a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// JSON array of `{id, name, prepTime}` descriptors.
    pub orders_path: PathBuf,
    /// Pause between two received orders.
    pub order_interval: Duration,
    /// Pause between two dispatched couriers.
    pub courier_interval: Duration,
    /// Couriers arrive after a uniformly random delay in `min_arrival_delay..=max_arrival_delay`.
    pub min_arrival_delay: Duration,
    pub max_arrival_delay: Duration,
    /// Fixes the arrival delays for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            orders_path: PathBuf::from("dispatch_orders.json"),
            order_interval: Duration::from_millis(500),
            courier_interval: Duration::from_millis(500),
            min_arrival_delay: Duration::from_secs(3),
            max_arrival_delay: Duration::from_secs(15),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.min_arrival_delay <= self.max_arrival_delay,
            "arrival delay range is empty: min {:?} > max {:?}",
            self.min_arrival_delay,
            self.max_arrival_delay
        );
        Ok(())
    }
}

/// Reads the order descriptors from a JSON file.
pub fn load_orders(path: impl AsRef<Path>) -> anyhow::Result<Vec<OrderCreate>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).with_context(|| format!("read orders file: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse orders file: {}", path.display()))
}
