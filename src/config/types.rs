//! Configuration type definitions.

use crate::constants::{DEFAULT_AGE_DAYS, sequence};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    pub defaults: DefaultsConfig,

    /// Activity history settings.
    pub history: HistoryConfig,

    /// Sequence window settings.
    pub sequence: SequenceConfig,

    /// Photo diagnosis settings.
    pub diagnostic: DiagnosticConfig,
}

/// Default analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Flock age in days used when no `--age` or `--stage` is given.
    pub age_days: u32,

    /// Report format.
    pub format: OutputFormat,

    /// Record analyses in the activity history.
    pub history: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            age_days: DEFAULT_AGE_DAYS,
            format: OutputFormat::Text,
            history: true,
        }
    }
}

/// Activity history settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file (default: `history.json` in the data directory).
    pub file: Option<PathBuf>,
}

/// Sequence window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SequenceConfig {
    /// Timesteps per window.
    pub timesteps: usize,

    /// Features per timestep.
    pub features: usize,

    /// Scaler parameter file applied before inference.
    pub scaler: Option<PathBuf>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            timesteps: sequence::TIMESTEPS,
            features: sequence::FEATURES,
            scaler: None,
        }
    }
}

/// Photo diagnosis settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiagnosticConfig {
    /// Top-class probability below which a diagnosis is reported as uncertain.
    pub min_confidence: f32,
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
    /// One CSV row per horizon and variable.
    Csv,
}

impl OutputFormat {
    /// File extension for reports written to disk.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
