// till/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a placed order.
///
/// Transitions are operator-triggered only: `pending -> processing ->
/// completed`, with `cancelled` reachable from `pending` or `processing`.
/// `completed` and `cancelled` are terminal. Order placement itself only
/// ever writes `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Processing,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
  }

  /// Whether an operator may move an order from `self` to `next`.
  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    matches!(
      (self, next),
      (OrderStatus::Pending, OrderStatus::Processing)
        | (OrderStatus::Pending, OrderStatus::Cancelled)
        | (OrderStatus::Processing, OrderStatus::Completed)
        | (OrderStatus::Processing, OrderStatus::Cancelled)
    )
  }

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processing => "processing",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A persisted order. Immutable after creation except for `status`.
///
/// `total_amount_cents` equals the sum of `price * quantity` over the order's
/// line items as they were at creation time; it is never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub total_amount_cents: i64,
  pub delivery_address: String,
  pub phone_number: String,
  pub payment_reference: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Insert payload for a new order row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub total_amount_cents: i64,
  pub delivery_address: String,
  pub phone_number: String,
  pub payment_reference: Option<String>,
}
