// till/src/cart/mod.rs

//! The cart consistency core: optimistic local state with rollback, a shared
//! observable badge total, and realtime reconciliation.
//!
//! The optimistic path ([`CartStore`]) and the reconciliation path
//! ([`spawn_cart_resync`]) are deliberately decoupled: the first gives the
//! presentation layer zero-latency feedback, the second is the consistency
//! backstop that re-reads authoritative state whenever the backend reports
//! any cart change.

pub mod badge;
pub mod store;
pub mod sync;

pub use badge::CartBadge;
pub use store::CartStore;
pub use sync::{spawn_cart_resync, ResyncHandle};
