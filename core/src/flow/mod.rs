// till/src/flow/mod.rs

//! A small sequential step engine.
//!
//! Multi-step business sequences (most notably order placement) are expressed
//! as a `Flow`: an ordered list of named steps, each with `before`/`on`/`after`
//! handlers over a shared lockable context, a skip condition, and an explicit
//! per-step failure policy. The policy is what makes deliberately
//! non-transactional sequences first-class: a step may be declared to abort
//! the run on failure, or to log the failure and let the rest of the flow
//! proceed without rolling anything back.

pub mod context;
pub mod control;
pub mod definition;
pub mod execution;
pub mod step;

pub use context::{Handler, SharedCtx};
pub use control::{FlowControl, FlowOutcome};
pub use definition::Flow;
pub use step::{OnFailure, SkipCondition, StepDef};
