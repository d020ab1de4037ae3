//! Plain value records handed to the kitchen: [`Order`] and [`Courier`].
//!
//! Both carry a single lifecycle timestamp that is stamped exactly once
//! (`ready_time` / `arrival_time`) and otherwise stay immutable once the
//! kitchen owns them.

pub mod courier;
pub mod order;

pub use courier::*;
pub use order::*;
