// tests/checkout_tests.rs
mod common;

use common::*;
use serial_test::serial;
use till::{order_history, place_order, CheckoutRequest, DataService, OrderStatus, Product, StoreError, Table};

fn request() -> CheckoutRequest {
  CheckoutRequest {
    delivery_address: "14 Riverside Drive, Nairobi".to_string(),
    phone_number: "0712345678".to_string(),
    payment_reference: Some("QBR2X1Y3Z4".to_string()),
  }
}

async fn fill_cart(service: &std::sync::Arc<till::MemoryDataService>, user_id: uuid::Uuid, lines: &[(&Product, u32)]) {
  for (product, quantity) in lines {
    service
      .insert_cart_item(user_id, product.id, *quantity)
      .await
      .expect("cart seeding must succeed");
  }
}

#[tokio::test]
#[serial]
async fn order_total_and_lines_snapshot_cart_prices() {
  setup_tracing();
  let (service, user_id) = signed_in_backend();
  let paint = seed_product(&service, "Interior Paint", 500).await;
  let ladder = seed_product(&service, "Step Ladder", 1_200).await;
  fill_cart(&service, user_id, &[(&paint, 2), (&ladder, 1)]).await;

  let order = place_order(as_service(&service), request()).await.expect("placement succeeds");

  assert_eq!(order.total_amount_cents, 2_200);
  assert_eq!(order.status, OrderStatus::Pending);
  assert_eq!(order.user_id, user_id);

  let mut prices: Vec<i64> = service
    .order_items(order.id)
    .await
    .expect("lines readable")
    .iter()
    .map(|line| line.price_at_purchase_cents)
    .collect();
  prices.sort();
  assert_eq!(prices, vec![500, 1_200]);

  // The cart was cleared by the final step.
  assert!(service.cart_items(user_id).await.expect("cart readable").is_empty());
}

#[tokio::test]
#[serial]
async fn empty_cart_is_refused_and_nothing_is_persisted() {
  setup_tracing();
  let (service, _user_id) = signed_in_backend();

  let error = place_order(as_service(&service), request())
    .await
    .expect_err("an empty cart cannot be ordered");

  assert!(matches!(error, StoreError::EmptyCart));
  assert!(service.list_orders().await.expect("orders readable").is_empty());
}

#[tokio::test]
#[serial]
async fn failed_order_row_aborts_with_nothing_persisted() {
  setup_tracing();
  let (service, user_id) = signed_in_backend();
  let product = seed_product(&service, "Wall Tiles", 3_400).await;
  fill_cart(&service, user_id, &[(&product, 2)]).await;

  service.fail_next_write(Table::Orders);
  let error = place_order(as_service(&service), request())
    .await
    .expect_err("order insert fault must surface");

  assert!(matches!(error, StoreError::Backend { .. }));
  assert!(service.list_orders().await.expect("orders readable").is_empty());
  // The cart is untouched and the user may retry.
  assert_eq!(service.cart_items(user_id).await.expect("cart readable").len(), 1);
}

#[tokio::test]
#[serial]
async fn failed_lines_leave_the_order_in_place_as_incomplete() {
  setup_tracing();
  let (service, user_id) = signed_in_backend();
  let product = seed_product(&service, "Floor Varnish", 2_700).await;
  fill_cart(&service, user_id, &[(&product, 3)]).await;

  service.fail_next_write(Table::OrderItems);
  let error = place_order(as_service(&service), request())
    .await
    .expect_err("line insert fault must surface");

  let StoreError::OrderIncomplete { order_id, .. } = error else {
    panic!("expected OrderIncomplete, got {error:?}");
  };

  // The orphaned order row stands; no compensating deletion happened.
  let orphan = service
    .find_order(order_id)
    .await
    .expect("order readable")
    .expect("order row exists");
  assert_eq!(orphan.total_amount_cents, 8_100);
  assert!(service.order_items(order_id).await.expect("lines readable").is_empty());
  // The cart was never cleared.
  assert_eq!(service.cart_items(user_id).await.expect("cart readable").len(), 1);
}

#[tokio::test]
#[serial]
async fn failed_cart_clear_does_not_roll_back_the_order() {
  setup_tracing();
  let (service, user_id) = signed_in_backend();
  let product = seed_product(&service, "Door Handles", 1_800).await;
  fill_cart(&service, user_id, &[(&product, 2)]).await;

  service.fail_next_write(Table::CartItems);
  let order = place_order(as_service(&service), request())
    .await
    .expect("placement still succeeds");

  // Order and lines persisted unchanged...
  assert_eq!(order.total_amount_cents, 3_600);
  assert_eq!(service.order_items(order.id).await.expect("lines readable").len(), 1);
  // ...and a subsequent cart read still returns the stale rows.
  assert_eq!(service.cart_items(user_id).await.expect("cart readable").len(), 1);
}

#[tokio::test]
#[serial]
async fn snapshot_prices_survive_later_catalog_changes() {
  setup_tracing();
  let (service, user_id) = signed_in_backend();
  let product = seed_product(&service, "Ceiling Lamp", 500).await;
  fill_cart(&service, user_id, &[(&product, 2)]).await;

  let order = place_order(as_service(&service), request()).await.expect("placement succeeds");

  // The catalog price changes after the fact.
  let repriced = Product {
    price_cents: 9_900,
    ..product.clone()
  };
  service.update_product(&repriced).await.expect("reprice succeeds");

  let lines = service.order_items(order.id).await.expect("lines readable");
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].price_at_purchase_cents, 500);
  let persisted = service
    .find_order(order.id)
    .await
    .expect("order readable")
    .expect("order exists");
  assert_eq!(persisted.total_amount_cents, 1_000);
}

#[tokio::test]
#[serial]
async fn checkout_requires_authentication() {
  setup_tracing();
  let service = backend();
  let error = place_order(as_service(&service), request())
    .await
    .expect_err("no session, no order");
  assert!(matches!(error, StoreError::AuthenticationRequired));
}

#[tokio::test]
#[serial]
async fn order_history_lists_the_users_orders_newest_first() {
  setup_tracing();
  let (service, user_id) = signed_in_backend();
  let product = seed_product(&service, "Curtain Rail", 750).await;

  fill_cart(&service, user_id, &[(&product, 1)]).await;
  let first = place_order(as_service(&service), request()).await.expect("first placement");
  // Keep the two creation timestamps strictly ordered.
  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  fill_cart(&service, user_id, &[(&product, 2)]).await;
  let second = place_order(as_service(&service), request()).await.expect("second placement");

  let history = order_history(&as_service(&service)).await.expect("history readable");
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].id, second.id);
  assert_eq!(history[1].id, first.id);
}
