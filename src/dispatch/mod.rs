//! # Dispatch Strategies
//!
//! A [`DispatchStrategy`] decides *which* order a given courier may take and how it
//! finds that order. The kitchen keeps everything else (registry, pickup validation,
//! wait-time recording), so the two policies only differ in their matching rules:
//!
//! - [`FifoStrategy`] - couriers are fungible; any arrived courier takes the oldest ready order.
//! - [`MatchedStrategy`] - each courier is bound to one order id and only ever takes that order.
//!
//! Every method receives `&mut Kitchen`. The kitchen actor is the only holder of that
//! borrow, so a strategy call always runs inside the kitchen's exclusive section.
//!
//! The active policy is selected once at startup through [`StrategyKind`]:
//!
//! ```rust
//! use kitchen_dispatch::dispatch::StrategyKind;
//!
//! let kind: StrategyKind = "matched".parse().unwrap();
//! let strategy = kind.build();
//! assert_eq!(strategy.kind(), StrategyKind::Matched);
//! ```

pub mod fifo;
pub mod matched;
pub mod outcome;

pub use fifo::FifoStrategy;
pub use matched::MatchedStrategy;
pub use outcome::*;

use crate::kitchen_actor::Kitchen;
use crate::model::{Courier, CourierId, OrderId};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Matching policy plugged into the kitchen at construction time.
pub trait DispatchStrategy: Send + Sync + Debug {
    /// Which configuration value produced this strategy.
    fn kind(&self) -> StrategyKind;

    /// Registers a freshly dispatched courier as waiting.
    fn dispatch(&self, kitchen: &mut Kitchen, courier: Courier);

    /// Attempts a match for an already registered courier.
    ///
    /// Used for live arrivals, scheduled retries and the reconciliation sweep alike.
    fn try_match(&self, kitchen: &mut Kitchen, courier_id: CourierId, now: Instant) -> MatchOutcome;

    /// Called when `order_id` has just become ready. Wakes a waiting courier that is
    /// eligible for it, if any, and returns the outcome of that attempt.
    fn order_ready(&self, kitchen: &mut Kitchen, order_id: OrderId, now: Instant) -> Option<MatchOutcome>;

    /// Stamps the courier's arrival (first arrival only) and attempts a match.
    fn courier_arrival(&self, kitchen: &mut Kitchen, courier_id: CourierId, now: Instant) -> MatchOutcome {
        let Some(courier) = kitchen.courier_mut(courier_id) else {
            if kitchen.has_departed(courier_id) {
                debug!(%courier_id, "Arrival for a courier that already left");
            } else {
                warn!(%courier_id, "Arrival for a courier that was never dispatched");
            }
            return MatchOutcome::Unavailable;
        };
        if courier.mark_arrived(now) {
            info!(%courier_id, order_id = ?courier.order_id, strategy = %self.kind(), "Courier arrived");
        }
        self.try_match(kitchen, courier_id, now)
    }
}

/// Startup selection of the dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Fifo,
    Matched,
}

impl StrategyKind {
    /// Builds the strategy this value names.
    pub fn build(self) -> Box<dyn DispatchStrategy> {
        match self {
            StrategyKind::Fifo => Box::new(FifoStrategy),
            StrategyKind::Matched => Box::new(MatchedStrategy),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Fifo => "fifo",
            StrategyKind::Matched => "matched",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for a strategy name other than `fifo` or `matched`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dispatch strategy: {0} (expected `fifo` or `matched`)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(StrategyKind::Fifo),
            "matched" => Ok(StrategyKind::Matched),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!("fifo".parse::<StrategyKind>(), Ok(StrategyKind::Fifo));
        assert_eq!(" Matched ".parse::<StrategyKind>(), Ok(StrategyKind::Matched));

        let err = "lifo".parse::<StrategyKind>().unwrap_err();
        assert_eq!(err, UnknownStrategy("lifo".to_string()));
    }

    #[test]
    fn test_strategy_kind_serde_names() {
        assert_eq!(serde_json::to_string(&StrategyKind::Fifo).unwrap(), "\"fifo\"");
        let kind: StrategyKind = serde_json::from_str("\"matched\"").unwrap();
        assert_eq!(kind, StrategyKind::Matched);
    }

    #[test]
    fn test_build_produces_matching_kind() {
        for kind in [StrategyKind::Fifo, StrategyKind::Matched] {
            assert_eq!(kind.build().kind(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_arrival_of_unregistered_or_departed_courier_is_unavailable() {
        use crate::model::Order;
        use std::time::Duration;

        let t0 = Instant::now();
        let mut kitchen = Kitchen::new();
        let strategy = StrategyKind::Fifo.build();

        assert_eq!(strategy.courier_arrival(&mut kitchen, CourierId(7), t0), MatchOutcome::Unavailable);
        assert!(!kitchen.has_departed(CourierId(7)));

        kitchen.receive_order(Order::new(1, "Pizza", Duration::from_secs(1)));
        kitchen.order_prepared(OrderId(1), t0);
        strategy.dispatch(&mut kitchen, Courier::new(1));
        assert!(strategy.courier_arrival(&mut kitchen, CourierId(1), t0).is_picked_up());

        assert!(kitchen.has_departed(CourierId(1)));
        assert_eq!(strategy.courier_arrival(&mut kitchen, CourierId(1), t0), MatchOutcome::Unavailable);
    }
}
