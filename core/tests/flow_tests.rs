// tests/flow_tests.rs
mod common;

use common::setup_tracing;
use serial_test::serial;
use std::sync::Arc;
use till::{Flow, FlowControl, FlowOutcome, FlowError, OnFailure, SharedCtx, StoreError};

#[derive(Clone, Debug, Default)]
struct TraceCtx {
  log: Vec<String>,
  counter: i32,
}

fn record(step_name: &'static str) -> impl Fn(SharedCtx<TraceCtx>) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<FlowControl, StoreError>> + Send>> + Send + Sync + 'static {
  move |ctx: SharedCtx<TraceCtx>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.log.push(step_name.to_string());
      Ok(FlowControl::Continue)
    })
  }
}

#[tokio::test]
#[serial]
async fn runs_steps_in_order() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[
    ("first", OnFailure::Abort, None),
    ("second", OnFailure::Abort, None),
    ("third", OnFailure::Abort, None),
  ]);
  flow.on("first", record("first"));
  flow.on("second", record("second"));
  flow.on("third", record("third"));

  let ctx = SharedCtx::new(TraceCtx::default());
  let outcome = flow.run(ctx.clone()).await.expect("flow must complete");

  assert_eq!(outcome, FlowOutcome::Completed);
  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.log, vec!["first", "second", "third"]);
}

#[tokio::test]
#[serial]
async fn halt_stops_later_steps() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[
    ("first", OnFailure::Abort, None),
    ("gate", OnFailure::Abort, None),
    ("unreached", OnFailure::Abort, None),
  ]);
  flow.on("first", record("first"));
  flow.on("gate", |ctx: SharedCtx<TraceCtx>| {
    Box::pin(async move {
      ctx.write().log.push("gate".to_string());
      Ok::<_, StoreError>(FlowControl::Halt)
    })
  });
  flow.on("unreached", record("unreached"));

  let ctx = SharedCtx::new(TraceCtx::default());
  let outcome = flow.run(ctx.clone()).await.expect("halt is not an error");

  assert_eq!(outcome, FlowOutcome::Halted);
  assert_eq!(ctx.read().log, vec!["first", "gate"]);
}

#[tokio::test]
#[serial]
async fn abort_policy_propagates_handler_error() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[
    ("good", OnFailure::Abort, None),
    ("bad", OnFailure::Abort, None),
    ("unreached", OnFailure::Abort, None),
  ]);
  flow.on("good", record("good"));
  flow.on("bad", |ctx: SharedCtx<TraceCtx>| {
    Box::pin(async move {
      ctx.write().log.push("bad".to_string());
      Err::<FlowControl, _>(StoreError::Validation("broken step".to_string()))
    })
  });
  flow.on("unreached", record("unreached"));

  let ctx = SharedCtx::new(TraceCtx::default());
  let error = flow.run(ctx.clone()).await.expect_err("bad step must abort the flow");

  assert!(matches!(error, StoreError::Validation(message) if message == "broken step"));
  assert_eq!(ctx.read().log, vec!["good", "bad"]);
}

#[tokio::test]
#[serial]
async fn proceed_policy_continues_past_failure() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[
    ("first", OnFailure::Abort, None),
    ("tolerated", OnFailure::Proceed, None),
    ("last", OnFailure::Abort, None),
  ]);
  flow.on("first", record("first"));
  flow.on("tolerated", |ctx: SharedCtx<TraceCtx>| {
    Box::pin(async move {
      ctx.write().log.push("tolerated".to_string());
      Err::<FlowControl, _>(StoreError::Internal("non-fatal".to_string()))
    })
  });
  // An after hook of a failed Proceed step must not run either.
  flow.after("tolerated", record("tolerated_after"));
  flow.on("last", record("last"));

  let ctx = SharedCtx::new(TraceCtx::default());
  let outcome = flow.run(ctx.clone()).await.expect("proceed step failures are swallowed");

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().log, vec!["first", "tolerated", "last"]);
}

#[tokio::test]
#[serial]
async fn skip_condition_skips_step() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[
    ("first", OnFailure::Abort, None),
    (
      "skippable",
      OnFailure::Abort,
      Some(Arc::new(|ctx: SharedCtx<TraceCtx>| ctx.read().counter > 0)),
    ),
    ("last", OnFailure::Abort, None),
  ]);
  flow.on("first", record("first"));
  flow.on("skippable", record("skippable"));
  flow.on("last", record("last"));

  let ctx = SharedCtx::new(TraceCtx::default());
  let outcome = flow.run(ctx.clone()).await.expect("flow must complete");

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().log, vec!["first", "last"]);
}

#[tokio::test]
#[serial]
async fn step_without_handlers_is_an_engine_fault() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[
    ("first", OnFailure::Abort, None),
    ("forgotten", OnFailure::Abort, None),
  ]);
  flow.on("first", record("first"));

  let ctx = SharedCtx::new(TraceCtx::default());
  let error = flow.run(ctx.clone()).await.expect_err("unhandled step must fail");

  assert!(matches!(
    error,
    StoreError::Flow {
      source: FlowError::HandlerMissing { step_name }
    } if step_name == "forgotten"
  ));
}

#[tokio::test]
#[serial]
async fn hooks_run_around_the_main_handler() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, StoreError>::new(&[("only", OnFailure::Abort, None)]);
  flow.before("only", record("before"));
  flow.on("only", record("on"));
  flow.after("only", record("after"));

  let ctx = SharedCtx::new(TraceCtx::default());
  flow.run(ctx.clone()).await.expect("flow must complete");

  assert_eq!(ctx.read().log, vec!["before", "on", "after"]);
}
