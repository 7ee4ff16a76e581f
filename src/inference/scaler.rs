//! Per-feature standardization parameters.

use crate::constants::sequence::SCALER_KEY_PREFIX;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ScalerEntry {
    #[serde(default)]
    mean: f32,
    #[serde(default = "unit_scale")]
    scale: f32,
}

const fn unit_scale() -> f32 {
    1.0
}

/// `(raw - mean) / scale` per feature index.
///
/// Features without parameters pass through unchanged; a zero scale is
/// treated as 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureScaler {
    params: HashMap<usize, (f32, f32)>,
}

impl FeatureScaler {
    /// Scaler that leaves every feature unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Parse `{"feature_0": {"mean": .., "scale": ..}, ...}`.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let entries: BTreeMap<String, ScalerEntry> = serde_json::from_str(json)?;
        let mut params = HashMap::with_capacity(entries.len());

        for (key, entry) in entries {
            let Some(index) = key
                .strip_prefix(SCALER_KEY_PREFIX)
                .and_then(|i| i.parse::<usize>().ok())
            else {
                debug!("Ignoring scaler key '{key}'");
                continue;
            };
            let scale = if entry.scale == 0.0 { 1.0 } else { entry.scale };
            params.insert(index, (entry.mean, scale));
        }

        Ok(Self { params })
    }

    /// Load scaler parameters from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ScalerRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let scaler = Self::from_json_str(&contents).map_err(|e| Error::ScalerParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Loaded scaler for {} feature(s)", scaler.len());
        Ok(scaler)
    }

    /// Number of features with explicit parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no feature has explicit parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Mean and scale for a feature.
    pub fn params_for(&self, feature: usize) -> (f32, f32) {
        self.params.get(&feature).copied().unwrap_or((0.0, 1.0))
    }

    /// Standardize one raw value.
    pub fn standardize(&self, feature: usize, raw: f32) -> f32 {
        let (mean, scale) = self.params_for(feature);
        (raw - mean) / scale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_feature_keys() {
        let scaler = FeatureScaler::from_json_str(
            r#"{
                "feature_0": {"mean": 20.0, "scale": 2.0},
                "feature_3": {"mean": 1.0},
                "version": {"mean": 9.0, "scale": 9.0}
            }"#,
        )
        .unwrap();

        assert_eq!(scaler.len(), 2);
        assert_eq!(scaler.standardize(0, 24.0), 2.0);
        assert_eq!(scaler.params_for(3), (1.0, 1.0));
        assert_eq!(scaler.params_for(7), (0.0, 1.0));
    }

    #[test]
    fn test_zero_scale_is_replaced() {
        let scaler =
            FeatureScaler::from_json_str(r#"{"feature_1": {"mean": 5.0, "scale": 0.0}}"#).unwrap();
        assert_eq!(scaler.standardize(1, 7.0), 2.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = FeatureScaler::load(Path::new("/nonexistent/scaler_params.json"));
        assert!(matches!(result, Err(Error::ScalerRead { .. })));
    }
}
