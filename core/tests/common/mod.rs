// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this shared test module

use once_cell::sync::Lazy;
use std::sync::Arc;
use till::{DataService, MemoryDataService, NewProduct, Product};
use tracing::Level;
use uuid::Uuid;

// --- Tracing setup (idempotent across tests) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Backend fixtures ---

pub fn backend() -> Arc<MemoryDataService> {
  Arc::new(MemoryDataService::new())
}

/// A fresh backend with a signed-in user.
pub fn signed_in_backend() -> (Arc<MemoryDataService>, Uuid) {
  let service = backend();
  let user_id = Uuid::new_v4();
  service.sign_in(user_id);
  (service, user_id)
}

pub fn as_service(service: &Arc<MemoryDataService>) -> Arc<dyn DataService> {
  service.clone()
}

pub async fn seed_product(service: &Arc<MemoryDataService>, name: &str, price_cents: i64) -> Product {
  seed_categorized_product(service, name, price_cents, "Hand Tools").await
}

pub async fn seed_categorized_product(
  service: &Arc<MemoryDataService>,
  name: &str,
  price_cents: i64,
  category: &str,
) -> Product {
  service
    .insert_product(NewProduct {
      name: name.to_string(),
      description: None,
      price_cents,
      category: category.to_string(),
      stock_quantity: 25,
      image_url: None,
    })
    .await
    .expect("seeding products must succeed")
}
