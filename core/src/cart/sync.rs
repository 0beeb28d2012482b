// till/src/cart/sync.rs

use super::store::CartStore;
use crate::backend::Table;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Owner of a running reconciliation task. Dropping it stops listening;
/// writes already in flight finish in the background with no further effect
/// on the dropped view.
#[derive(Debug)]
pub struct ResyncHandle {
  task: JoinHandle<()>,
}

impl Drop for ResyncHandle {
  fn drop(&mut self) {
    self.task.abort();
  }
}

/// Spawns the reconciliation task for a cart store: every change the backend
/// reports for the cart table, from any session or row, triggers a full
/// [`CartStore::resync`]. The task ends when the backend drops its side of
/// the channel.
///
/// A resync failure keeps the last known local state; the next notification
/// retries.
pub fn spawn_cart_resync(store: CartStore) -> ResyncHandle {
  let mut feed = store.backend().subscribe(Table::CartItems);
  let task = tokio::spawn(async move {
    loop {
      match feed.recv().await {
        Ok(change) => {
          debug!(?change, "cart change observed; resynchronizing");
          if let Err(error) = store.resync().await {
            warn!(%error, "cart resync failed; keeping last known state");
          }
        }
        Err(RecvError::Lagged(missed)) => {
          warn!(missed, "cart change feed lagged; resynchronizing");
          if let Err(error) = store.resync().await {
            warn!(%error, "cart resync failed; keeping last known state");
          }
        }
        Err(RecvError::Closed) => break,
      }
    }
  });
  ResyncHandle { task }
}
