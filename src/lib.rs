//! # Kitchen Dispatch
//!
//! > **Orders cook, couriers arrive, and the kitchen pairs them up.**
//!
//! A food-delivery kitchen receives orders and prepares each one for a fixed time.
//! Couriers are dispatched independently and arrive after a travel delay. Each
//! completed pickup records two samples: how long the food waited for a courier and
//! how long the courier waited for food.
//!
//! ## Dispatch Strategies
//!
//! - **FIFO**: couriers are interchangeable. An arrived courier takes the pending order
//!   that became ready first.
//! - **Matched**: every courier is bound to one order at dispatch time and only ever
//!   takes that order.
//!
//! ## Concurrency Model
//!
//! The registry of pending orders and waiting couriers lives inside a single
//! [`KitchenActor`](kitchen_actor::KitchenActor). It processes one request at a time,
//! so removal, pickup validation and wait-time recording never interleave with another
//! match attempt. Cooking happens in the caller's task through
//! [`KitchenClient::prepare_order`](clients::KitchenClient::prepare_order), never inside the actor.
//!
//! An order becoming ready wakes an eligible courier that is already waiting, and a
//! pickup attempted too early is retried at the order's `ready_time` by the actor itself.
//!
//! ## Module Tour
//!
//! - [`model`]: [`Order`](model::Order), [`Courier`](model::Courier) and their ids.
//! - [`dispatch`]: the [`DispatchStrategy`](dispatch::DispatchStrategy) trait and its two policies.
//! - [`kitchen_actor`]: the registry, the actor loop and its messages.
//! - [`clients`]: [`KitchenClient`](clients::KitchenClient), the typed facade over the channel.
//! - [`lifecycle`]: [`KitchenSystem`](lifecycle::KitchenSystem) startup and shutdown, tracing setup.
//! - [`simulation`]: the driver that feeds orders and couriers and reports statistics.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- fifo
//! cargo test
//! ```

pub mod clients;
pub mod dispatch;
pub mod kitchen_actor;
pub mod lifecycle;
pub mod model;
pub mod simulation;
