//! Offline backend replaying model outputs recorded as JSON.
//!
//! Useful on machines without the mobile runtime: each input carries a
//! sidecar file holding what the on-device model produced for it.

use crate::constants::recorded::{FORECAST_SUFFIX, SCORES_SUFFIX};
use crate::error::{Error, Result};
use crate::inference::{
    ClassScore, InferenceBackend, LabeledValue, SequenceWindow, default_target_names,
    label_values,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recorded forecaster output: bare numbers or labeled values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedOutput {
    Values(Vec<f64>),
    Labeled(Vec<LabeledValue>),
}

/// Sidecar path for `input` (`dir/stem<suffix>`).
pub fn sidecar_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}"))
}

/// Read a recorded forecaster output.
///
/// Bare numbers are labeled with the default target names.
pub fn load_model_output(path: &Path) -> Result<Vec<LabeledValue>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ModelOutputRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let output: RecordedOutput =
        serde_json::from_str(&contents).map_err(|e| Error::ModelOutputParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(match output {
        RecordedOutput::Values(values) => label_values(&values, &default_target_names()),
        RecordedOutput::Labeled(values) => values,
    })
}

/// Read recorded classifier scores (`[{"label": .., "probability": ..}]`).
pub fn load_class_scores(path: &Path) -> Result<Vec<ClassScore>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ModelOutputRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::ModelOutputParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Backend that reads `<stem>.scores.json` for photos and
/// `<stem>.forecast.json` for sequence windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedBackend;

impl RecordedBackend {
    /// Create a recorded backend.
    pub const fn new() -> Self {
        Self
    }
}

impl InferenceBackend for RecordedBackend {
    fn classify_image(&self, image: &Path) -> Result<Vec<ClassScore>> {
        if !image.exists() {
            return Err(Error::Inference {
                reason: format!("image not found: {}", image.display()),
            });
        }
        let scores_path = sidecar_path(image, SCORES_SUFFIX);
        debug!("Replaying classifier scores from {}", scores_path.display());
        load_class_scores(&scores_path)
    }

    fn predict_sequence(&self, window: &SequenceWindow) -> Result<Vec<LabeledValue>> {
        let source = window.source().ok_or_else(|| Error::Inference {
            reason: "recorded backend needs a window loaded from a file".to_string(),
        })?;
        let output_path = sidecar_path(source, FORECAST_SUFFIX);
        debug!(
            "Replaying forecast for {}x{} window from {}",
            window.timesteps(),
            window.features(),
            output_path.display()
        );
        load_model_output(&output_path)
    }
}
