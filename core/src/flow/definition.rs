// till/src/flow/definition.rs

//! The `Flow<TData, Err>` struct: construction and handler registration.

use super::context::{Handler, SharedCtx};
use super::control::FlowControl;
use super::step::{OnFailure, SkipCondition, StepDef};
use crate::error::FlowError;
use std::collections::HashMap;
use std::future::Future;

/// An ordered sequence of named steps over a shared context of type `TData`,
/// whose handlers return `Result<FlowControl, Err>`.
///
/// `Err` must be `From<FlowError>` so that engine-level faults (a step with
/// no handlers) surface through the same error channel as handler faults.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,

  // Handlers for each phase of each step, keyed by step name.
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a flow from `(name, failure policy, skip condition)` triples.
  pub fn new(step_defs: &[(&str, OnFailure, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, on_failure, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        on_failure: *on_failure,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  // Registering against an unknown step is a programming error (a typo in a
  // step name), not a runtime condition; fail fast at setup.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Flow setup error: step '{}' not found in flow definition.", step_name);
    }
  }

  /// Registers a `before` hook for a step.
  ///
  /// The handler takes the shared context and resolves to
  /// `Result<FlowControl, UserProvidedErr>`, where `UserProvidedErr` must
  /// convert into the flow's `Err` type.
  pub fn before<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(SharedCtx<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let final_handler: Handler<TData, Err> = Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.before.entry(step_name.to_string()).or_default().push(final_handler);
  }

  /// Registers the main handler for a step. (Same error conversion rules as
  /// `before`.)
  pub fn on<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(SharedCtx<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let final_handler: Handler<TData, Err> = Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.on.entry(step_name.to_string()).or_default().push(final_handler);
  }

  /// Registers an `after` hook for a step.
  pub fn after<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(SharedCtx<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let final_handler: Handler<TData, Err> = Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.after.entry(step_name.to_string()).or_default().push(final_handler);
  }
}
