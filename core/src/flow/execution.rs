// till/src/flow/execution.rs

//! `Flow::run()`: executes the steps in order, honoring skip conditions,
//! halt signals, and per-step failure policies.

use super::context::SharedCtx;
use super::control::{FlowControl, FlowOutcome};
use super::definition::Flow;
use super::step::OnFailure;
use crate::error::FlowError;
use tracing::{event, instrument, span, Level};

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs the flow against the given shared context.
  ///
  /// A handler error in an `OnFailure::Abort` step propagates immediately; in
  /// an `OnFailure::Proceed` step it is logged, the step's remaining handlers
  /// are dropped, and the next step runs. A step with no handlers at all is
  /// an engine fault (`FlowError::HandlerMissing`) regardless of policy.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(
      flow_context_type = %std::any::type_name::<TData>(),
      flow_error_type = %std::any::type_name::<Err>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx: SharedCtx<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow execution starting.");

    'steps: for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      let step_span = span!(
        Level::INFO,
        "flow_step",
        step_name,
        step_index = step_idx,
        on_failure = ?step_def.on_failure
      );
      let _step_span_guard = step_span.enter();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(ctx.clone()) {
          event!(Level::INFO, "Step skipped by its skip condition.");
          continue;
        }
      }

      let phases = [
        ("before", &self.before),
        ("on", &self.on),
        ("after", &self.after),
      ];

      if phases.iter().all(|(_, map)| map.get(step_name).map_or(true, |v| v.is_empty())) {
        event!(Level::ERROR, "Step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase_name, handlers_map) in phases {
        let Some(handlers) = handlers_map.get(step_name) else {
          continue;
        };
        for (handler_idx, handler_fn) in handlers.iter().enumerate() {
          let handler_span = span!(Level::DEBUG, "flow_handler", phase = phase_name, handler_index = handler_idx);
          let _handler_span_guard = handler_span.enter();
          match handler_fn(ctx.clone()).await {
            Ok(FlowControl::Continue) => {}
            Ok(FlowControl::Halt) => {
              event!(Level::INFO, phase = phase_name, "Flow halted by a handler.");
              return Ok(FlowOutcome::Halted);
            }
            Err(error) => match step_def.on_failure {
              OnFailure::Abort => {
                event!(Level::ERROR, %error, phase = phase_name, "Step handler failed; aborting flow.");
                return Err(error);
              }
              OnFailure::Proceed => {
                event!(
                  Level::WARN,
                  %error,
                  phase = phase_name,
                  "Step handler failed; continuing per failure policy."
                );
                continue 'steps;
              }
            },
          }
        }
      }
      event!(Level::DEBUG, "Step finished.");
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }
}
