//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber used by the binary.
//! Library code only emits events; it never installs a subscriber itself.
//!
//! ## Configuration
//!
//! Log levels come from the `RUST_LOG` environment variable. The output uses the compact
//! format without the crate/module prefix (`with_target(false)`), which keeps lines short
//! while the structured fields (`order_id`, `courier_id`, wait times) carry the detail.
//!
//! ```bash
//! # Kitchen events: orders received/prepared, couriers dispatched/arrived, pickups
//! RUST_LOG=info cargo run -- fifo
//!
//! # Also show match attempts, retries and sweep progress
//! RUST_LOG=debug cargo run -- matched
//! ```
//!
//! ## What Gets Traced
//!
//! - **Kitchen lifecycle**: actor start and shutdown with the final registry sizes
//! - **Orders**: received, cooking, prepared
//! - **Couriers**: dispatched, arrived, waiting
//! - **Pickups**: order and courier ids with both wait times in milliseconds
//! - **Contract violations**: duplicate ids, unknown orders, never-dispatched couriers and
//!   abandoned preparations, at `warn`
//!
//! With `RUST_LOG=info` a single pickup looks like:
//!
//! ```text
//! INFO Order received order_id=order_2 name=Burger prep_secs=1.0
//! INFO Courier dispatched for any order courier_id=courier_1
//! INFO Courier arrived courier_id=courier_1 order_id=None strategy=fifo
//! INFO Order prepared order_id=order_2 name=Burger
//! INFO Order picked up order_id=order_2 courier_id=courier_1 food_wait_ms=0.0 courier_wait_ms=500.0
//! ```
//!
//! Client entry points are wrapped in `#[instrument]` spans, so at `debug` the request
//! path shows up inline (e.g. `prepare_order{order_id=order_2}: Cooking`).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // ids already name the entity
        .compact()
        .init();
}
