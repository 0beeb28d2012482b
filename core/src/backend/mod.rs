// till/src/backend/mod.rs

//! The seam to the hosted data service.
//!
//! Everything the core needs from the backend is behind the [`DataService`]
//! trait: authenticated-user lookup, typed table reads/writes, and per-table
//! change subscriptions. [`MemoryDataService`] is an in-process
//! implementation with fault injection, used by tests and examples.

pub mod memory;
pub mod service;

pub use memory::MemoryDataService;
pub use service::{ChangeFeed, ChangeKind, DataService, Table, TableChange};
