// till/src/config.rs

use crate::error::{StoreError, StoreResult};
use dotenvy::dotenv;
use std::env;

/// Runtime configuration, loaded from the environment (with `.env` support).
/// Every variable has a development default so local runs and examples work
/// without setup.
#[derive(Debug, Clone)]
pub struct ShopConfig {
  /// Base URL of the hosted data service.
  pub service_url: String,
  /// API key for the hosted data service, when one is required.
  pub service_key: Option<String>,
  /// ISO currency code used when presenting amounts.
  pub currency_code: String,
  /// Buffer size of each table's change feed; subscribers that fall further
  /// behind observe a lag and resynchronize.
  pub change_feed_capacity: usize,
}

impl ShopConfig {
  pub fn from_env() -> StoreResult<Self> {
    dotenv().ok();

    let get_env = |var_name: &str| {
      env::var(var_name)
        .map_err(|e| StoreError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let service_url = get_env("SHOP_SERVICE_URL").unwrap_or_else(|_| "http://localhost:54321".to_string());
    let service_key = env::var("SHOP_SERVICE_KEY").ok();
    let currency_code = get_env("SHOP_CURRENCY").unwrap_or_else(|_| "KES".to_string());
    let change_feed_capacity = get_env("SHOP_CHANGE_FEED_CAPACITY")
      .unwrap_or_else(|_| "64".to_string())
      .parse::<usize>()
      .map_err(|e| StoreError::Config(format!("Invalid SHOP_CHANGE_FEED_CAPACITY: {}", e)))?;

    tracing::info!("Shop configuration loaded.");

    Ok(Self {
      service_url,
      service_key,
      currency_code,
      change_feed_capacity,
    })
  }
}
