//! Loading sequence windows and scaler files from disk.

use fientesia::Error;
use fientesia::inference::{FeatureScaler, InferenceBackend, RecordedBackend, SequenceWindow};
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_both_layouts_load_to_same_rows() {
    let dir = TempDir::new().unwrap();
    let bare = write(dir.path(), "bare.json", "[[1, 2], [3, null]]");
    let wrapped = write(dir.path(), "wrapped.json", r#"{"sequence": [[1, 2], [3, null]]}"#);

    let a = SequenceWindow::load(&bare, 2, 2).unwrap();
    let b = SequenceWindow::load(&wrapped, 2, 2).unwrap();
    assert_eq!(a.rows(), b.rows());
    assert_eq!(a.rows()[1], vec![3.0, 0.0]);
    assert_eq!(a.source(), Some(bare.as_path()));
}

#[test]
fn test_wrong_timestep_count_names_expected_length() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "w.json", "[[1, 2]]");

    let err = SequenceWindow::load(&path, 168, 2).unwrap_err();
    assert!(matches!(err, Error::SequenceShape { .. }));
    assert!(err.to_string().contains("168"));
}

#[test]
fn test_ragged_row_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "w.json", "[[1, 2, 3], [1, 2]]");

    let err = SequenceWindow::load(&path, 2, 3).unwrap_err();
    assert!(err.to_string().contains("timestep 1"));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "w.json", r#"{"rows": []}"#);

    assert!(matches!(
        SequenceWindow::load(&path, 1, 1),
        Err(Error::SequenceParse { .. })
    ));
}

#[test]
fn test_scaler_standardizes_tensor() {
    let dir = TempDir::new().unwrap();
    let window = write(dir.path(), "w.json", "[[10, 4], [20, 6]]");
    let scaler = write(
        dir.path(),
        "scaler.json",
        r#"{"feature_0": {"mean": 15, "scale": 5}}"#,
    );

    let window = SequenceWindow::load(&window, 2, 2).unwrap();
    let scaler = FeatureScaler::load(&scaler).unwrap();
    assert_eq!(window.to_input_tensor(&scaler), vec![-1.0, 4.0, 1.0, 6.0]);
}

#[test]
fn test_recorded_backend_reads_forecast_sidecar() {
    let dir = TempDir::new().unwrap();
    let window = write(dir.path(), "barn.json", "[[0]]");
    write(
        dir.path(),
        "barn.forecast.json",
        "[30.5, 55, 0.002, 0.005, 30.5, 55, 0.002, 0.005, 30.5, 55, 0.002, 0.005]",
    );

    let window = SequenceWindow::load(&window, 1, 1).unwrap();
    let outputs = RecordedBackend::new().predict_sequence(&window).unwrap();
    assert_eq!(outputs.len(), 12);
    assert_eq!(outputs[0].label, "temp_1h");
}
