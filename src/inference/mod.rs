//! Boundary to the on-device models.
//!
//! The risk engine never talks to a model directly. Platform adapters
//! implement [`InferenceBackend`]; the engine only sees the data shapes
//! defined here.

mod backend;
mod recorded;
mod scaler;
mod sequence;

pub use backend::InferenceBackend;
pub use recorded::{RecordedBackend, load_class_scores, load_model_output, sidecar_path};
pub use scaler::FeatureScaler;
pub use sequence::{SequenceFile, SequenceWindow};

use crate::constants::forecast::{HORIZON_COUNT, VARIABLES_PER_HORIZON};
use serde::{Deserialize, Serialize};

/// One classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    /// Class label.
    pub label: String,
    /// Class probability (0.0 - 1.0).
    pub probability: f32,
}

/// One forecaster output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    /// Target name (`temp_1h`, ...). Informational only.
    pub label: String,
    /// Predicted value.
    pub value: f64,
}

/// Target names used when the model config does not provide any.
pub fn default_target_names() -> Vec<String> {
    const HORIZONS: [&str; HORIZON_COUNT] = ["1h", "6h", "24h"];
    const VARIABLES: [&str; VARIABLES_PER_HORIZON] = ["temp", "humidity", "nh3", "co"];

    HORIZONS
        .iter()
        .flat_map(|h| VARIABLES.iter().map(move |v| format!("{v}_{h}")))
        .collect()
}

/// Label a bare output vector with target names (`out_<i>` past the known ones).
pub fn label_values(values: &[f64], names: &[String]) -> Vec<LabeledValue> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| LabeledValue {
            label: names.get(i).cloned().unwrap_or_else(|| format!("out_{i}")),
            value,
        })
        .collect()
}

/// Strip labels, keeping positional order.
pub fn output_values(outputs: &[LabeledValue]) -> Vec<f64> {
    outputs.iter().map(|o| o.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_names_order() {
        let names = default_target_names();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "temp_1h");
        assert_eq!(names[3], "co_1h");
        assert_eq!(names[4], "temp_6h");
        assert_eq!(names[11], "co_24h");
    }

    #[test]
    fn test_label_values_falls_back_to_index() {
        let names = vec!["a".to_string()];
        let labeled = label_values(&[1.0, 2.0], &names);
        assert_eq!(labeled[0].label, "a");
        assert_eq!(labeled[1].label, "out_1");
        assert_eq!(output_values(&labeled), vec![1.0, 2.0]);
    }
}
