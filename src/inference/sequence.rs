//! Sensor sequence windows fed to the forecaster.

use crate::error::{Error, Result};
use crate::inference::FeatureScaler;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Accepted layouts of a sequence JSON file.
///
/// Either a bare array of rows or an object with a `sequence` key. Null
/// cells are read as `0.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SequenceFile {
    /// `[[...], [...], ...]`
    Array(Vec<Vec<Option<f32>>>),
    /// `{"sequence": [[...], ...]}`
    Wrapped {
        /// Timestep rows.
        sequence: Vec<Vec<Option<f32>>>,
    },
}

impl SequenceFile {
    /// Parse a sequence document.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Normalize either layout to plain rows.
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        let rows = match self {
            Self::Array(rows) | Self::Wrapped { sequence: rows } => rows,
        };
        rows.into_iter()
            .map(|row| row.into_iter().map(|cell| cell.unwrap_or(0.0)).collect())
            .collect()
    }
}

/// A validated `timesteps × features` window.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceWindow {
    rows: Vec<Vec<f32>>,
    features: usize,
    source: Option<PathBuf>,
}

impl SequenceWindow {
    /// Build a window, requiring the exact shape.
    pub fn from_rows(rows: Vec<Vec<f32>>, timesteps: usize, features: usize) -> Result<Self> {
        if rows.len() != timesteps {
            return Err(Error::SequenceShape {
                message: format!(
                    "sequence length must be {timesteps} (got {})",
                    rows.len()
                ),
            });
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != features) {
            return Err(Error::SequenceShape {
                message: format!(
                    "each timestep must have {features} features (timestep {index} has {})",
                    row.len()
                ),
            });
        }

        Ok(Self {
            rows,
            features,
            source: None,
        })
    }

    /// Load and validate a window from a JSON file.
    pub fn load(path: &Path, timesteps: usize, features: usize) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::SequenceRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file = SequenceFile::from_json_str(&contents).map_err(|e| Error::SequenceParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut window = Self::from_rows(file.into_rows(), timesteps, features)?;
        window.source = Some(path.to_path_buf());
        Ok(window)
    }

    /// Number of timesteps.
    pub fn timesteps(&self) -> usize {
        self.rows.len()
    }

    /// Number of features per timestep.
    pub const fn features(&self) -> usize {
        self.features
    }

    /// Raw rows.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// File the window was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Row-major `[1, timesteps, features]` tensor, standardized per feature.
    pub fn to_input_tensor(&self, scaler: &FeatureScaler) -> Vec<f32> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(feature, &raw)| scaler.standardize(feature, raw))
            })
            .collect()
    }
}
