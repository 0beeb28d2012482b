// till/src/checkout/contexts.rs

//! Context data carried through the checkout flow.

use crate::backend::DataService;
use crate::model::Order;
use std::sync::Arc;
use uuid::Uuid;

/// One cart row resolved against the catalog at checkout time. The price
/// here is what gets snapshotted into the order line.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
  pub product_id: Uuid,
  pub product_name: String,
  pub unit_price_cents: i64,
  pub quantity: u32,
}

/// What the presentation layer supplies when the user submits checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
  pub delivery_address: String,
  pub phone_number: String,
  pub payment_reference: Option<String>,
}

/// Shared state of one checkout run.
#[derive(Clone)]
pub struct CheckoutCtxData {
  pub backend: Arc<dyn DataService>,
  pub user_id: Uuid,
  pub delivery_address: String,
  pub phone_number: String,
  pub payment_reference: Option<String>,
  pub lines: Vec<CheckoutLine>,
  pub total_amount_cents: i64,
  pub placed_order: Option<Order>,
  pub cart_cleared: bool,
}
