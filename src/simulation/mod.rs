//! # Simulation Driver
//!
//! Plays the collaborator around the kitchen: reads order descriptors, submits them at a
//! fixed rate while each one cooks in its own task, dispatches one courier per order
//! with a random travel delay, then reconciles whatever is left and reports the average
//! food and courier wait times.

pub mod config;
pub mod driver;

pub use config::*;
pub use driver::*;
