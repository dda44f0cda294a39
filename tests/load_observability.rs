use std::sync::{Arc, Mutex};

use tablequery::load::{load_from_path, LoadContext, LoadObserver, LoadOptions, LoadSeverity};
use tablequery::types::{DataType, Field, Schema};
use tablequery::Error;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<usize>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, _stats: tablequery::load::LoadStats) {
        *self.successes.lock().unwrap() += 1;
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &Error) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &Error) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn schema_name_only() -> Schema {
    Schema::new(vec![Field::new("name", DataType::Utf8)])
}

fn schema_missing_col() -> Schema {
    Schema::new(vec![Field::new("definitely_missing", DataType::Utf8)])
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Missing file -> I/O error -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &schema_name_only(), &opts)
        .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Critical]);
    assert_eq!(alerts, vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Schema mismatch -> Error severity (not Critical) -> should not alert
    let _ = load_from_path("tests/fixtures/names.csv", &schema_missing_col(), &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let ds = load_from_path("tests/fixtures/names.csv", &schema_name_only(), &opts).unwrap();
    assert!(ds.row_count() > 0);
    assert_eq!(*obs.successes.lock().unwrap(), 1);
    assert!(obs.failures.lock().unwrap().is_empty());
}
