// till/src/cart/badge.rs

use std::sync::Arc;
use tokio::sync::watch;

/// The running total of cart quantities, shared across every presentation
/// surface of the session.
///
/// The store adjusts it incrementally as a latency hint when a mutation is
/// applied optimistically; every realtime resynchronization overwrites it
/// with the authoritative sum. The total is clamped at zero and reset when
/// the session ends, so a signed-out surface never shows stale counts.
///
/// Observation is publish-subscribe: `watch()` hands out a receiver, and
/// dropping the receiver unsubscribes.
#[derive(Clone, Debug)]
pub struct CartBadge {
  total: Arc<watch::Sender<u64>>,
}

impl CartBadge {
  pub fn new() -> Self {
    let (tx, _rx) = watch::channel(0);
    Self { total: Arc::new(tx) }
  }

  /// The current total.
  pub fn count(&self) -> u64 {
    *self.total.borrow()
  }

  /// Applies a signed adjustment, clamped so the total never goes negative.
  pub fn adjust(&self, delta: i64) {
    self.total.send_modify(|current| {
      let next = (*current as i64).saturating_add(delta);
      *current = next.max(0) as u64;
    });
  }

  /// Overwrites the total with an authoritative sum.
  pub fn set_total(&self, total: u64) {
    self.total.send_replace(total);
  }

  /// Drops back to zero (sign-out, or a resync that found no user).
  pub fn reset(&self) {
    self.set_total(0);
  }

  /// Subscribes to total changes.
  pub fn watch(&self) -> watch::Receiver<u64> {
    self.total.subscribe()
  }
}

impl Default for CartBadge {
  fn default() -> Self {
    Self::new()
  }
}
