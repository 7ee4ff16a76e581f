//! Activity history as used by a long-running owner.

use fientesia::activity::{
    ActivityEvent, ActivityKind, ActivityLog, ActivityRecord, load_history, save_history,
};
use fientesia::diagnostic::diagnose;
use fientesia::inference::ClassScore;
use fientesia::risk::{PredictionAnalysis, RiskLevel};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn prediction_with_co(co: f64) -> PredictionAnalysis {
    let mut values = [30.5, 55.0, 0.002, 0.005].repeat(3);
    values[3] = co;
    PredictionAnalysis::analyze(&values, 21).unwrap()
}

fn diagnosis(label: &str) -> ActivityRecord {
    ActivityRecord::Diagnostic(
        diagnose(vec![ClassScore {
            label: label.to_string(),
            probability: 0.8,
        }])
        .unwrap(),
    )
}

#[test]
fn test_keeps_ten_newest_entries() {
    let mut log = ActivityLog::new();
    for i in 0..15 {
        if i % 3 == 0 {
            log.append(diagnosis("healthy"));
        } else {
            log.record_prediction(prediction_with_co(0.005));
        }
    }

    assert_eq!(log.len(), 10);
    let ids: Vec<u64> = log.history().map(|e| e.id).collect();
    assert_eq!(ids, (5..15).rev().collect::<Vec<_>>());
}

#[test]
fn test_subscriber_sees_each_entry() {
    let titles = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&titles);

    let mut log = ActivityLog::new();
    log.subscribe(move |event| {
        if let ActivityEvent::Added(entry) = event {
            seen.lock().unwrap().push(entry.title.clone());
        }
    });

    log.record_prediction(prediction_with_co(0.7));
    log.append(diagnosis("salmo"));

    assert_eq!(
        *titles.lock().unwrap(),
        vec!["Prevision: DANGER", "Diagnostic: Salmonellose"]
    );
}

#[test]
fn test_flock_status_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut log = ActivityLog::new();
    log.record_prediction(prediction_with_co(0.7));
    log.append(diagnosis("healthy"));
    save_history(&log, &path).unwrap();

    let restored = load_history(&path).unwrap();
    let status = restored.flock_status();
    assert_eq!(status.level, RiskLevel::Danger);
    assert_eq!(status.label, "DANGER");
    assert_eq!(
        restored.latest_of_type(ActivityKind::Diagnostic).map(|e| e.id),
        Some(1)
    );
}

#[test]
fn test_persisted_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut log = ActivityLog::new();
    log.append(diagnosis("cocci"));
    save_history(&log, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &json[0];
    assert_eq!(entry["id"], 0);
    assert_eq!(entry["kind"], "diagnostic");
    assert_eq!(entry["title"], "Diagnostic: Coccidiose");
    assert_eq!(entry["result"]["diagnostic"]["severity"], "danger");
    assert!(entry["timestamp"].is_string());
}
