// till/src/checkout/mod.rs

//! Order placement and order history.

pub mod contexts;
mod steps;

pub use contexts::{CheckoutCtxData, CheckoutLine, CheckoutRequest};

use crate::backend::DataService;
use crate::error::{StoreError, StoreResult};
use crate::flow::SharedCtx;
use crate::model::{Order, OrderItem};
use std::sync::Arc;
use uuid::Uuid;

/// Converts the authenticated user's current cart into a persisted order.
///
/// Runs the checkout flow (see `steps`): load cart lines, refuse an empty
/// cart, price the order, create the order row as `pending`, create one line
/// per cart row with the snapshot price, then clear the cart. The sequence is
/// deliberately not a transaction; each step's failure policy is part of the
/// contract:
///
/// - failure before the order row exists persists nothing and the user may
///   simply retry;
/// - failure while writing the lines leaves the already-created order in
///   place and surfaces as [`StoreError::OrderIncomplete`];
/// - failure while clearing the cart is logged and the placement still
///   succeeds, and the next cart read shows the stale rows until a later
///   mutation or resync removes them.
pub async fn place_order(backend: Arc<dyn DataService>, request: CheckoutRequest) -> StoreResult<Order> {
  let user_id = backend
    .current_user()
    .await?
    .ok_or(StoreError::AuthenticationRequired)?;

  let ctx = SharedCtx::new(CheckoutCtxData {
    backend: backend.clone(),
    user_id,
    delivery_address: request.delivery_address,
    phone_number: request.phone_number,
    payment_reference: request.payment_reference,
    lines: Vec::new(),
    total_amount_cents: 0,
    placed_order: None,
    cart_cleared: false,
  });

  match steps::checkout_flow().run(ctx.clone()).await {
    Ok(_) => {
      let guard = ctx.read();
      guard
        .placed_order
        .clone()
        .ok_or_else(|| StoreError::Internal("checkout finished without an order record".to_string()))
    }
    Err(error) => {
      let placed = { ctx.read().placed_order.clone() };
      match placed {
        // The order row landed but a later abort-policy step did not.
        Some(order) => Err(StoreError::OrderIncomplete {
          order_id: order.id,
          source: Box::new(error),
        }),
        None => Err(error),
      }
    }
  }
}

/// The authenticated user's past orders, newest first.
pub async fn order_history(backend: &Arc<dyn DataService>) -> StoreResult<Vec<Order>> {
  let user_id = backend
    .current_user()
    .await?
    .ok_or(StoreError::AuthenticationRequired)?;
  backend.orders_for_user(user_id).await
}

/// The lines of one order, for detail views.
pub async fn order_lines(backend: &Arc<dyn DataService>, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
  backend.order_items(order_id).await
}
