// till/examples/cart_session.rs
//
// A full cart session against the in-memory backend: optimistic edits, a
// rejected write rolling back, realtime convergence with a second session,
// and the badge resetting on sign-out.

use std::sync::Arc;
use std::time::Duration;
use till::{
  spawn_cart_resync, CartBadge, CartStore, DataService, MemoryDataService, NewProduct, ShopConfig,
  StoreError, Table,
};
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let config = ShopConfig::from_env()?;
  let service = Arc::new(MemoryDataService::with_feed_capacity(config.change_feed_capacity));

  // The operator seeds the catalog.
  let drill = service
    .insert_product(NewProduct {
      name: "Cordless Drill".to_string(),
      description: Some("18V, two batteries".to_string()),
      price_cents: 8_500,
      category: "Power Tools".to_string(),
      stock_quantity: 12,
      image_url: None,
    })
    .await?;
  let hammer = service
    .insert_product(NewProduct {
      name: "Claw Hammer".to_string(),
      description: None,
      price_cents: 1_200,
      category: "Hand Tools".to_string(),
      stock_quantity: 40,
      image_url: None,
    })
    .await?;

  let user_id = Uuid::new_v4();
  service.sign_in(user_id);

  let backend: Arc<dyn DataService> = service.clone();
  let store = CartStore::new(backend, CartBadge::new());
  let _resync = spawn_cart_resync(store.clone());

  store.set_quantity(drill.id, 1).await?;
  store.increment(drill.id, 1).await?;
  store.set_quantity(hammer.id, 3).await?;
  info!(badge = store.badge().count(), "cart after local edits");

  // A rejected write reverts local state and the badge synchronously.
  service.fail_next_write(Table::CartItems);
  if let Err(error) = store.increment(hammer.id, 1).await {
    info!(%error, badge = store.badge().count(), "write rejected; optimistic state rolled back");
  }

  // Another session of the same user edits the cart; the realtime feed
  // triggers a full resynchronization here.
  service.update_cart_quantity(user_id, drill.id, 5).await?;
  tokio::time::sleep(Duration::from_millis(50)).await;
  info!(
    badge = store.badge().count(),
    drill = store.quantity_of(drill.id),
    currency = %config.currency_code,
    "converged with the backend"
  );

  service.sign_out();
  store.resync().await?;
  info!(badge = store.badge().count(), "after sign-out");

  Ok(())
}
