// till/src/catalog.rs

//! Storefront catalog reads and in-memory filtering.

use crate::backend::DataService;
use crate::error::StoreResult;
use crate::model::Product;
use std::sync::Arc;

/// The shoppable catalog, newest first.
pub async fn storefront_products(backend: &Arc<dyn DataService>) -> StoreResult<Vec<Product>> {
  backend.list_products().await
}

/// Case-insensitive name search combined with an exact category filter
/// (`None` matches every category).
pub fn filter_products<'a>(products: &'a [Product], search: &str, category: Option<&str>) -> Vec<&'a Product> {
  let needle = search.to_lowercase();
  products
    .iter()
    .filter(|product| {
      let matches_search = needle.is_empty() || product.name.to_lowercase().contains(&needle);
      let matches_category = category.map_or(true, |c| product.category == c);
      matches_search && matches_category
    })
    .collect()
}

/// The distinct categories present in the catalog, sorted.
pub fn categories(products: &[Product]) -> Vec<String> {
  let mut categories: Vec<String> = products.iter().map(|p| p.category.clone()).collect();
  categories.sort();
  categories.dedup();
  categories
}
