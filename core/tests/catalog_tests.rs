// tests/catalog_tests.rs
mod common;

use common::*;
use serial_test::serial;
use till::catalog::{categories, filter_products, storefront_products};

#[tokio::test]
#[serial]
async fn search_matches_names_case_insensitively() {
  setup_tracing();
  let service = backend();
  seed_categorized_product(&service, "Cordless Drill", 8_500, "Power Tools").await;
  seed_categorized_product(&service, "Hammer Drill", 12_000, "Power Tools").await;
  seed_categorized_product(&service, "Claw Hammer", 1_200, "Hand Tools").await;

  let products = storefront_products(&as_service(&service)).await.expect("catalog loads");

  let hits = filter_products(&products, "DRILL", None);
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|p| p.name.to_lowercase().contains("drill")));
}

#[tokio::test]
#[serial]
async fn category_filter_combines_with_search() {
  setup_tracing();
  let service = backend();
  seed_categorized_product(&service, "Cordless Drill", 8_500, "Power Tools").await;
  seed_categorized_product(&service, "Hammer Drill", 12_000, "Power Tools").await;
  seed_categorized_product(&service, "Claw Hammer", 1_200, "Hand Tools").await;

  let products = storefront_products(&as_service(&service)).await.expect("catalog loads");

  let hand_tools = filter_products(&products, "", Some("Hand Tools"));
  assert_eq!(hand_tools.len(), 1);
  assert_eq!(hand_tools[0].name, "Claw Hammer");

  let hammer_drills = filter_products(&products, "hammer", Some("Power Tools"));
  assert_eq!(hammer_drills.len(), 1);
  assert_eq!(hammer_drills[0].name, "Hammer Drill");
}

#[tokio::test]
#[serial]
async fn categories_are_distinct_and_sorted() {
  setup_tracing();
  let service = backend();
  seed_categorized_product(&service, "Cordless Drill", 8_500, "Power Tools").await;
  seed_categorized_product(&service, "Hammer Drill", 12_000, "Power Tools").await;
  seed_categorized_product(&service, "Claw Hammer", 1_200, "Hand Tools").await;
  seed_categorized_product(&service, "Hard Hat", 900, "Safety Equipment").await;

  let products = storefront_products(&as_service(&service)).await.expect("catalog loads");

  assert_eq!(
    categories(&products),
    vec!["Hand Tools", "Power Tools", "Safety Equipment"]
  );
}
