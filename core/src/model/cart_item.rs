// till/src/model/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (user, product) cart row. At most one row exists per pair, and the
/// quantity is strictly positive; a quantity that would drop to zero deletes
/// the row instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub quantity: u32,
  pub added_at: DateTime<Utc>,
}
