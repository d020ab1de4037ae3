//! # Mock Kitchen
//!
//! Utilities for testing code that talks to the kitchen without spawning the actor.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its channel,
//! then pull requests off the receiver with the `expect_*` helpers and answer them by
//! hand. This keeps timing and failure injection fully under the test's control.

use crate::kitchen_actor::{KitchenRequest, Response};
use crate::model::{Courier, OrderId};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::KitchenClient;

/// Creates a kitchen client whose requests land on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (KitchenClient, mpsc::Receiver<KitchenRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (KitchenClient::new(sender), receiver)
}

/// Helper to verify that the next message is a StartPreparation request.
pub async fn expect_start_preparation(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(OrderId, Response<Duration>)> {
    match receiver.recv().await {
        Some(KitchenRequest::StartPreparation { order_id, respond_to }) => Some((order_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an OrderReady request.
pub async fn expect_order_ready(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(OrderId, Response<Instant>)> {
    match receiver.recv().await {
        Some(KitchenRequest::OrderReady { order_id, respond_to }) => Some((order_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a DispatchCourier request.
pub async fn expect_dispatch_courier(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(Courier, Response<()>)> {
    match receiver.recv().await {
        Some(KitchenRequest::DispatchCourier { courier, respond_to }) => Some((courier, respond_to)),
        _ => None,
    }
}
