// till/src/model/order_item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a placed order.
///
/// `price_at_purchase_cents` is the unit price captured when the order was
/// placed. It is deliberately never re-derived from the product row, so later
/// catalog price changes cannot rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: u32,
  pub price_at_purchase_cents: i64,
}

/// Insert payload for a new order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: u32,
  pub price_at_purchase_cents: i64,
}
