// till/src/flow/control.rs

//! Signals for controlling flow execution and the outcome of a run.

/// Signal from a handler indicating whether the flow should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  /// Continue with the current step's remaining handlers and later steps.
  Continue,
  /// Halt the flow immediately. No further handlers run.
  Halt,
}

/// Outcome of a full flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// All non-skipped steps ran to completion. Steps whose failure policy is
  /// `OnFailure::Proceed` may still have failed along the way.
  Completed,
  /// A handler halted the flow via `FlowControl::Halt`.
  Halted,
}
