// src/lib.rs

//! Till: an asynchronous cart and order consistency engine for storefronts
//! backed by hosted data services.
//!
//! Till keeps a session's cart coherent across surfaces and sessions without
//! locking or client-side conflict resolution:
//!  - Optimistic cart mutations with synchronous rollback on rejection.
//!  - A shared, observable badge total, clamped at zero and scoped to the
//!    authentication session.
//!  - Realtime reconciliation: any backend-reported cart change triggers a
//!    full re-read, the sole truth-recovery mechanism.
//!  - Order placement as an explicit multi-step flow with a per-step failure
//!    policy instead of a transaction.
//!  - Operator status transitions with lifecycle enforcement (terminal
//!    statuses stay terminal).
//!
//! The hosted backend sits behind the [`DataService`] trait; an in-memory
//! implementation with fault injection ships for tests and examples.

pub mod admin;
pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod error;
pub mod flow;
pub mod model;

// --- Re-exports for the Public API ---

pub use crate::admin::AdminDesk;
pub use crate::backend::{ChangeFeed, ChangeKind, DataService, MemoryDataService, Table, TableChange};
pub use crate::cart::{spawn_cart_resync, CartBadge, CartStore, ResyncHandle};
pub use crate::checkout::{order_history, order_lines, place_order, CheckoutLine, CheckoutRequest};
pub use crate::config::ShopConfig;
pub use crate::contact::{submit_contact_message, ContactForm};
pub use crate::error::{FlowError, StoreError, StoreResult};
pub use crate::flow::{Flow, FlowControl, FlowOutcome, OnFailure, SharedCtx};
pub use crate::model::{
  CartItem, Message, MessageStatus, NewMessage, NewOrder, NewOrderItem, NewProduct, Order,
  OrderItem, OrderStatus, Product,
};
