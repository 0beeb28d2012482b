// till/src/flow/context.rs

//! Shared, lockable state passed to every handler of a flow, and the handler
//! type itself.

use super::control::FlowControl;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Shared ownership of a flow's (or any component's) mutable state.
///
/// Guards are blocking and MUST be dropped before any `.await` suspension
/// point; handlers read what they need into locals, await, then re-lock to
/// write results back.
#[derive(Debug)]
pub struct SharedCtx<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedCtx<T> {
  pub fn new(data: T) -> Self {
    SharedCtx(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read lock. Drop the guard before awaiting.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// Acquires a write lock. Drop the guard before awaiting.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }
}

impl<T: Send + Sync + 'static> Clone for SharedCtx<T> {
  fn clone(&self) -> Self {
    SharedCtx(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedCtx<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}

/// A step handler: an async function over the shared context, resolving to a
/// control signal or the flow's error type.
pub type Handler<TData, Err> = Box<
  dyn Fn(SharedCtx<TData>) -> Pin<Box<dyn Future<Output = Result<FlowControl, Err>> + Send>>
    + Send
    + Sync,
>;
