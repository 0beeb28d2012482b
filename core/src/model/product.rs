// till/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry, created and maintained by an operator.
///
/// `stock_quantity` is advisory only: placing an order never decrements it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub category: String,
  pub stock_quantity: i32,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new catalog entry; the backend assigns identity and
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub category: String,
  pub stock_quantity: i32,
  pub image_url: Option<String>,
}
