// till/src/error.rs

use crate::model::OrderStatus;
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

/// Faults raised by the step engine itself, as opposed to faults raised by
/// the handlers it runs.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for step: {step_name}")]
  HandlerMissing { step_name: String },
}

/// The error surface of the consistency core.
///
/// Every backend-call failure is caught at the call site that issued it and
/// mapped into one of these variants; nothing propagates to a global handler.
#[derive(Debug, Error)]
pub enum StoreError {
  /// A cart mutation or checkout was attempted with no signed-in user.
  /// Raised before any local state change and before the backend is reached;
  /// the presentation layer decides how to route the user to sign-in.
  #[error("Authentication required")]
  AuthenticationRequired,

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Resource not found: {0}")]
  NotFound(String),

  /// A read or write against the hosted data service failed
  /// (network, permission, or constraint rejection).
  #[error("Backend request failed: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },

  /// Checkout refusal: an order is never created from an empty cart.
  #[error("Cart is empty; nothing to order")]
  EmptyCart,

  /// The order row was written but its line items were not. The order is left
  /// in place and no compensating deletion is attempted; the caller surfaces
  /// this to the user, who may need to contact support.
  #[error("Order {order_id} was created but its line items were not saved")]
  OrderIncomplete {
    order_id: Uuid,
    #[source]
    source: Box<StoreError>,
  },

  /// Rejected operator transition, including any attempt to move an order
  /// out of a terminal status.
  #[error("Order status may not change from {from} to {to}")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Flow error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Internal error: {0}")]
  Internal(String),
}

impl StoreError {
  /// Wraps an arbitrary backend-adapter failure.
  pub fn backend(err: impl Into<AnyhowError>) -> Self {
    StoreError::Backend { source: err.into() }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
