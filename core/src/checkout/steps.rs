// till/src/checkout/steps.rs

//! The order-placement flow.
//!
//! Five named steps with explicit failure policies. Everything up to and
//! including line creation aborts the run on failure; clearing the cart is
//! `Proceed`: a placed order with a stale cart beats losing the order, so a
//! clear failure is logged and the flow still completes.

use super::contexts::{CheckoutCtxData, CheckoutLine};
use crate::error::StoreError;
use crate::flow::{Flow, FlowControl, OnFailure, SharedCtx};
use crate::model::{NewOrder, NewOrderItem, OrderStatus};
use tracing::{info, warn};

pub(crate) fn checkout_flow() -> Flow<CheckoutCtxData, StoreError> {
  let mut flow = Flow::<CheckoutCtxData, StoreError>::new(&[
    ("load_cart_lines", OnFailure::Abort, None),
    ("price_order", OnFailure::Abort, None),
    ("create_order_record", OnFailure::Abort, None),
    ("create_order_lines", OnFailure::Abort, None),
    ("clear_cart", OnFailure::Proceed, None),
  ]);

  // Step 1: read the cart and resolve each row to the product's current name
  // and price.
  flow.on("load_cart_lines", |ctx: SharedCtx<CheckoutCtxData>| {
    Box::pin(async move {
      let (backend, user_id) = {
        let guard = ctx.read();
        (guard.backend.clone(), guard.user_id)
      };

      let rows = backend.cart_items(user_id).await?;
      let mut lines = Vec::with_capacity(rows.len());
      for row in rows {
        let product = backend.find_product(row.product_id).await?.ok_or_else(|| {
          StoreError::NotFound(format!("product {} referenced by the cart", row.product_id))
        })?;
        lines.push(CheckoutLine {
          product_id: product.id,
          product_name: product.name,
          unit_price_cents: product.price_cents,
          quantity: row.quantity,
        });
      }

      info!(line_count = lines.len(), "cart lines loaded for checkout");
      ctx.write().lines = lines;
      Ok::<_, StoreError>(FlowControl::Continue)
    })
  });

  // Step 2: refuse an empty cart, then price the order from the loaded lines.
  flow.on("price_order", |ctx: SharedCtx<CheckoutCtxData>| {
    Box::pin(async move {
      let total = {
        let mut guard = ctx.write();
        if guard.lines.is_empty() {
          return Err(StoreError::EmptyCart);
        }
        let total: i64 = guard
          .lines
          .iter()
          .map(|line| line.unit_price_cents * line.quantity as i64)
          .sum();
        guard.total_amount_cents = total;
        total
      };
      info!(total_amount_cents = total, "order priced");
      Ok::<_, StoreError>(FlowControl::Continue)
    })
  });

  // The total/lines agreement is re-checked immediately before the order row
  // is written; it is never revisited after creation.
  flow.before("create_order_record", |ctx: SharedCtx<CheckoutCtxData>| {
    Box::pin(async move {
      let guard = ctx.read();
      let computed: i64 = guard
        .lines
        .iter()
        .map(|line| line.unit_price_cents * line.quantity as i64)
        .sum();
      if computed != guard.total_amount_cents {
        return Err(StoreError::Validation(
          "order total does not match its line items".to_string(),
        ));
      }
      Ok::<_, StoreError>(FlowControl::Continue)
    })
  });

  // Step 3: persist the order row, always as `pending`.
  flow.on("create_order_record", |ctx: SharedCtx<CheckoutCtxData>| {
    Box::pin(async move {
      let (backend, new_order) = {
        let guard = ctx.read();
        (
          guard.backend.clone(),
          NewOrder {
            user_id: guard.user_id,
            status: OrderStatus::Pending,
            total_amount_cents: guard.total_amount_cents,
            delivery_address: guard.delivery_address.clone(),
            phone_number: guard.phone_number.clone(),
            payment_reference: guard.payment_reference.clone(),
          },
        )
      };

      let order = backend.insert_order(new_order).await?;
      info!(order_id = %order.id, total_amount_cents = order.total_amount_cents, "order record created");
      ctx.write().placed_order = Some(order);
      Ok::<_, StoreError>(FlowControl::Continue)
    })
  });

  // Step 4: persist one line per cart row, snapshotting the price resolved in
  // step 1. If this fails, the order row from step 3 stays; no compensating
  // deletion is attempted.
  flow.on("create_order_lines", |ctx: SharedCtx<CheckoutCtxData>| {
    Box::pin(async move {
      let (backend, items) = {
        let guard = ctx.read();
        let order = guard
          .placed_order
          .as_ref()
          .ok_or_else(|| StoreError::Internal("order record missing before line creation".to_string()))?;
        let items: Vec<NewOrderItem> = guard
          .lines
          .iter()
          .map(|line| NewOrderItem {
            order_id: order.id,
            product_id: line.product_id,
            quantity: line.quantity,
            price_at_purchase_cents: line.unit_price_cents,
          })
          .collect();
        (guard.backend.clone(), items)
      };

      backend.insert_order_items(items).await?;
      Ok::<_, StoreError>(FlowControl::Continue)
    })
  });

  // Step 5: empty the cart. Failure here never rolls the order back; the
  // stale rows simply survive until the next cart read or mutation.
  flow.on("clear_cart", |ctx: SharedCtx<CheckoutCtxData>| {
    Box::pin(async move {
      let (backend, user_id) = {
        let guard = ctx.read();
        (guard.backend.clone(), guard.user_id)
      };

      if let Err(error) = backend.clear_cart(user_id).await {
        warn!(%user_id, %error, "cart clear failed after order placement; cart left stale");
        return Err(error);
      }
      ctx.write().cart_cleared = true;
      Ok::<_, StoreError>(FlowControl::Continue)
    })
  });

  flow
}
