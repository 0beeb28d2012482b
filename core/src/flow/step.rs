// till/src/flow/step.rs

//! Definition of a single step within a flow.

use super::SharedCtx;
use std::sync::Arc;

/// Condition evaluated against the shared context before a step runs; a
/// `true` result skips the step.
pub type SkipCondition<TData> = Arc<dyn Fn(SharedCtx<TData>) -> bool + Send + Sync + 'static>;

/// What a handler failure in this step does to the rest of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
  /// Propagate the error and stop; nothing after this step runs.
  Abort,
  /// Log the error and move on to the next step. Earlier steps are not
  /// rolled back. Used for tail steps whose failure must not undo the work
  /// already persisted.
  Proceed,
}

/// A named step with its failure policy and optional skip condition.
#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub on_failure: OnFailure,
  pub skip_if: Option<SkipCondition<T>>,
}

// SkipCondition has no useful Debug form; report only its presence.
impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("on_failure", &self.on_failure)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
