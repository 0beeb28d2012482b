// till/src/cart/store.rs

use super::badge::CartBadge;
use crate::backend::DataService;
use crate::error::{StoreError, StoreResult};
use crate::flow::SharedCtx;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The session's authoritative local view of "how many units of each product
/// are in the cart", kept consistent with the backend by optimistic mutation
/// plus realtime resynchronization.
///
/// Mutations follow a fixed protocol: apply locally first (zero perceived
/// latency), adjust the badge by the delta, then issue the backend write; on
/// rejection, revert both synchronously and surface the error. Convergence
/// with other sessions of the same user is left entirely to [`resync`], which
/// re-reads the backend's rows whenever the realtime channel reports a cart
/// change. Re-read wins; there is no client-side conflict resolution.
///
/// [`resync`]: CartStore::resync
#[derive(Clone)]
pub struct CartStore {
  backend: Arc<dyn DataService>,
  quantities: SharedCtx<HashMap<Uuid, u32>>,
  badge: CartBadge,
}

impl CartStore {
  pub fn new(backend: Arc<dyn DataService>, badge: CartBadge) -> Self {
    Self {
      backend,
      quantities: SharedCtx::new(HashMap::new()),
      badge,
    }
  }

  pub fn backend(&self) -> &Arc<dyn DataService> {
    &self.backend
  }

  pub fn badge(&self) -> &CartBadge {
    &self.badge
  }

  /// The locally known quantity for one product (0 when absent).
  pub fn quantity_of(&self, product_id: Uuid) -> u32 {
    self.quantities.read().get(&product_id).copied().unwrap_or(0)
  }

  /// Snapshot of the full quantity map for the presentation layer.
  pub fn quantities(&self) -> HashMap<Uuid, u32> {
    self.quantities.read().clone()
  }

  /// Sets the cart to exactly `requested` units of the product.
  ///
  /// A requested quantity of zero or less deletes the backing row. Rejected
  /// with [`StoreError::AuthenticationRequired`] before any local change when
  /// no user is signed in.
  pub async fn set_quantity(&self, product_id: Uuid, requested: i64) -> StoreResult<()> {
    let user_id = self.require_user().await?;

    let new_quantity = requested.clamp(0, u32::MAX as i64) as u32;
    let previous = self.quantity_of(product_id);
    let delta = new_quantity as i64 - previous as i64;

    // Optimistic local application, then the write it anticipates.
    self.apply_local(product_id, new_quantity);
    self.badge.adjust(delta);

    let write = if new_quantity == 0 {
      self.backend.delete_cart_item(user_id, product_id).await
    } else if previous == 0 {
      self
        .backend
        .insert_cart_item(user_id, product_id, new_quantity)
        .await
        .map(|_| ())
    } else {
      self
        .backend
        .update_cart_quantity(user_id, product_id, new_quantity)
        .await
    };

    if let Err(error) = write {
      // Rollback is synchronous with observing the rejection.
      self.apply_local(product_id, previous);
      self.badge.adjust(-delta);
      warn!(%product_id, previous, new_quantity, %error, "cart write rejected; local state reverted");
      return Err(error);
    }

    debug!(%product_id, quantity = new_quantity, "cart quantity persisted");
    Ok(())
  }

  /// Adjusts the quantity relative to the locally known value. A result
  /// below one deletes the row rather than storing zero.
  pub async fn increment(&self, product_id: Uuid, delta: i64) -> StoreResult<()> {
    let current = self.quantity_of(product_id) as i64;
    self.set_quantity(product_id, current + delta).await
  }

  /// Full resynchronization against the backend: re-reads the user's cart
  /// rows, rebuilds the quantity map, and overwrites the badge total. With
  /// no signed-in user, clears both.
  ///
  /// This is the sole truth-recovery mechanism; it may redundantly overwrite
  /// the optimistic state with identical values.
  pub async fn resync(&self) -> StoreResult<()> {
    match self.backend.current_user().await? {
      None => {
        self.quantities.write().clear();
        self.badge.reset();
      }
      Some(user_id) => {
        let rows = self.backend.cart_items(user_id).await?;
        let mut map = HashMap::with_capacity(rows.len());
        let mut total: u64 = 0;
        for row in rows {
          total += row.quantity as u64;
          map.insert(row.product_id, row.quantity);
        }
        *self.quantities.write() = map;
        self.badge.set_total(total);
      }
    }
    Ok(())
  }

  fn apply_local(&self, product_id: Uuid, quantity: u32) {
    let mut map = self.quantities.write();
    if quantity == 0 {
      map.remove(&product_id);
    } else {
      map.insert(product_id, quantity);
    }
  }

  async fn require_user(&self) -> StoreResult<Uuid> {
    self
      .backend
      .current_user()
      .await?
      .ok_or(StoreError::AuthenticationRequired)
  }
}
