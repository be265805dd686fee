mod common;

use common::{EXAMPLE, EXPOSURE, META};
use rdm_model::{dict, DataModel, DefaultArgs, ModelError, PauseOptions, Value};
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Records the message of every event at `level`.
#[derive(Clone)]
struct EventLog {
    level: Level,
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == self.level {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.messages.lock().unwrap().push(message);
        }
    }
}

/// Runs `f` under a local subscriber and returns the messages logged at `level`.
fn events_during<T>(level: Level, f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let log = EventLog {
        level,
        messages: Arc::default(),
    };
    let subscriber = tracing_subscriber::registry().with(log.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let messages = log.messages.lock().unwrap().clone();
    (out, messages)
}

fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    events_during(Level::WARN, f)
}

fn exposure() -> DataModel {
    DataModel::make_default(&EXPOSURE, None, &DefaultArgs::new()).unwrap()
}

fn assert_flags_on(m: &DataModel) {
    assert!(m.validate_assignment());
    assert!(m.revalidate_instances());
}

// ── set_item ─────────────────────────────────────────────────────

#[test]
fn validated_set_item_rejects_bad_values() {
    let mut m = exposure();
    let (result, warnings) = warnings_during(|| m.set_item("nresultants", "many"));
    let err = result.unwrap_err();
    assert!(err.as_validation().unwrap().has_path("nresultants"));
    assert_eq!(m["nresultants"], Value::Int(-999_999));
    assert!(warnings.is_empty());
}

#[test]
fn validated_set_item_accepts_good_values() {
    let mut m = exposure();
    m.set_item("nresultants", 4).unwrap();
    assert_eq!(m["nresultants"], Value::Int(4));
}

#[test]
fn unvalidated_set_item_warns_once() {
    let mut m = exposure();
    m.set_validate_setitem(false);
    let (result, warnings) = warnings_during(|| m.set_item("nresultants", "many"));
    result.unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("set_validate_setitem(true)"));
    assert_eq!(m["nresultants"], Value::from("many"));
}

#[test]
fn unvalidated_set_item_leaves_model_invalid() {
    let mut m = exposure();
    m.set_validate_setitem(false);
    m.set_item("nresultants", "many").unwrap();
    assert_flags_on(&m);
    let err = m.revalidate().unwrap_err();
    assert!(err.as_validation().unwrap().has_path("nresultants"));
}

#[test]
fn set_item_stores_unknown_keys_as_extras() {
    let mut m = exposure();
    m.set_item("comment", "free text").unwrap();
    assert_eq!(m.extra()["comment"], Value::from("free text"));
}

// ── pause_validation ─────────────────────────────────────────────

#[test]
fn writes_inside_a_pause_are_not_checked() {
    let mut m = exposure();
    let result = m.pause_validation(|m| {
        assert!(!m.validate_assignment());
        assert!(!m.revalidate_instances());
        m.set("nresultants", "many")?;
        m.set("nresultants", 3)?;
        Ok(())
    });
    result.unwrap();
    assert_flags_on(&m);
    assert_eq!(m["nresultants"], Value::Int(3));
}

#[test]
fn exit_revalidation_reports_the_offending_field() {
    let mut m = exposure();
    let err = m
        .pause_validation(|m| m.set("exposure_time", "long"))
        .unwrap_err();
    assert!(err.as_validation().unwrap().has_path("exposure_time"));
    assert_flags_on(&m);
}

#[test]
fn exit_revalidation_can_be_skipped() {
    let mut m = exposure();
    m.pause_validation_with(PauseOptions { revalidate_on_exit: false }, |m| m.set("exposure_time", "long"))
        .unwrap();
    assert_flags_on(&m);
    assert!(m.revalidate().is_err());
}

#[test]
fn closure_errors_pass_through_and_restore_flags() {
    let mut m = exposure();
    let err = m
        .pause_validation(|m| -> Result<(), ModelError> {
            m.set("exposure_time", "long")?;
            Err(ModelError::Config("stop".to_string()))
        })
        .unwrap_err();
    assert!(matches!(err, ModelError::Config(_)));
    assert_flags_on(&m);
}

#[test]
fn failed_closures_still_revalidate_on_exit() {
    let mut m = exposure();
    let (result, debug) = events_during(Level::DEBUG, || {
        m.pause_validation(|m| -> Result<(), ModelError> {
            m.set("exposure_time", "long")?;
            Err(ModelError::Config("stop".to_string()))
        })
    });
    assert!(matches!(result, Err(ModelError::Config(_))));
    assert_eq!(debug, ["model left invalid by a failed pause scope"]);
    assert_flags_on(&m);
}

#[test]
fn failed_closures_skip_revalidation_when_disabled() {
    let mut m = exposure();
    let (result, debug) = events_during(Level::DEBUG, || {
        m.pause_validation_with(PauseOptions { revalidate_on_exit: false }, |m| -> Result<(), ModelError> {
            m.set("exposure_time", "long")?;
            Err(ModelError::Config("stop".to_string()))
        })
    });
    assert!(matches!(result, Err(ModelError::Config(_))));
    assert!(debug.is_empty());
}

#[test]
fn closure_output_is_returned() {
    let mut m = exposure();
    let n = m.pause_validation(|m| Ok(m.iter().count())).unwrap();
    assert_eq!(n, EXPOSURE.fields().len());
}

#[test]
fn panics_inside_a_pause_restore_flags() {
    let mut m = exposure();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = m.pause_validation(|_| -> Result<(), ModelError> { panic!("boom") });
    }));
    assert!(outcome.is_err());
    assert_flags_on(&m);
}

#[test]
fn nested_pauses_restore_the_outer_state() {
    let mut m = exposure();
    m.pause_validation(|outer| {
        outer.pause_validation_with(PauseOptions { revalidate_on_exit: false }, |inner| {
            inner.set("nresultants", "x")
        })?;
        // Still paused after the inner scope.
        assert!(!outer.validate_assignment());
        outer.set("nresultants", 2)
    })
    .unwrap();
    assert_flags_on(&m);
}

// ── Guard ────────────────────────────────────────────────────────

#[test]
fn dropping_the_guard_restores_flags() {
    let mut m = exposure();
    {
        let mut guard = m.pause();
        guard.set("nresultants", "x").unwrap();
        assert!(!guard.validate_assignment());
    }
    assert_flags_on(&m);
    assert!(m.revalidate().is_err());
}

#[test]
fn finish_revalidates() {
    let mut m = exposure();
    let mut guard = m.pause();
    guard.set("nresultants", "x").unwrap();
    let err = guard.finish().unwrap_err();
    assert!(err.as_validation().unwrap().has_path("nresultants"));
    assert_flags_on(&m);
}

#[test]
fn paused_nested_models_are_stored_unpaused() {
    let mut meta = DataModel::make_default(&META, None, &DefaultArgs::new()).unwrap();
    let mut exposure = exposure();
    {
        let mut guard = exposure.pause();
        guard.set("nresultants", "x").unwrap();
        // A paused instance is not re-checked when handed to a parent.
        meta.set("exposure", (*guard).clone()).unwrap();
    }
    let err = meta.revalidate().unwrap_err();
    assert!(err.as_validation().unwrap().has_path("exposure.nresultants"));

    let stored = meta.model_mut("exposure").unwrap();
    assert_flags_on(stored);
    let err = stored.set("nresultants", "many").unwrap_err();
    assert!(err.as_validation().unwrap().has_path("nresultants"));
    stored.set("nresultants", 4).unwrap();
    meta.revalidate().unwrap();
}

#[test]
fn pausing_does_not_touch_other_instances() {
    let mut a = DataModel::make_default(&EXAMPLE, None, &DefaultArgs::new()).unwrap();
    let b = DataModel::new(&EXAMPLE, dict! { "name" => "b", "count" => 1, "tags" => Vec::<i64>::new() }).unwrap();
    let _guard = a.pause();
    assert_flags_on(&b);
}
