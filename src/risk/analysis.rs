//! Prediction analysis document.

use super::horizon::{Horizons, aggregate_horizons};
use super::level::RiskLevel;
use super::severity::resolve_global_risk;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of one forecast analysis. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionAnalysis {
    /// Per-horizon verdicts.
    pub horizons: Horizons,
    /// Worst level across all verdicts.
    pub global_risk: RiskLevel,
    /// Flock age the thresholds were selected for.
    pub age: u32,
    /// When the analysis was produced.
    pub analyzed_at: DateTime<Utc>,
}

impl PredictionAnalysis {
    /// Analyze a model output vector, stamping the current time.
    pub fn analyze(values: &[f64], age: u32) -> Result<Self> {
        Self::analyze_at(values, age, Utc::now())
    }

    /// Analyze a model output vector with an explicit timestamp.
    ///
    /// Identical inputs always produce identical documents.
    pub fn analyze_at(values: &[f64], age: u32, analyzed_at: DateTime<Utc>) -> Result<Self> {
        let horizons = aggregate_horizons(values, age)?;
        let global_risk = resolve_global_risk(&horizons);
        debug!("Analysis for age {age}: global risk {global_risk}");

        Ok(Self {
            horizons,
            global_risk,
            age,
            analyzed_at,
        })
    }

    /// Subtitle for the global risk.
    pub const fn subtitle(&self) -> &'static str {
        self.global_risk.subtitle()
    }

    /// Activity log title (`Prevision: CRITICAL`).
    pub fn title(&self) -> String {
        format!("Prevision: {}", self.global_risk.as_str().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_analyze_at_is_idempotent() {
        let values = [32.5, 72.0, 0.012, 0.3].repeat(3);
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).single();
        assert!(at.is_some());
        let Some(at) = at else { return };

        let first = PredictionAnalysis::analyze_at(&values, 21, at).ok();
        let second = PredictionAnalysis::analyze_at(&values, 21, at).ok();
        assert!(first.is_some());
        assert_eq!(first, second);

        let json_first = first.as_ref().and_then(|a| serde_json::to_string(a).ok());
        let json_second = second.as_ref().and_then(|a| serde_json::to_string(a).ok());
        assert_eq!(json_first, json_second);
    }

    #[test]
    fn test_document_shape() {
        let values = [30.5, 55.0, 0.002, 0.005].repeat(3);
        let analysis = PredictionAnalysis::analyze(&values, 21).ok();
        let json = analysis.and_then(|a| serde_json::to_value(a).ok());
        let Some(json) = json else {
            panic!("analysis failed");
        };
        assert_eq!(json["globalRisk"], "optimal");
        assert_eq!(json["age"], 21);
        assert!(json["analyzedAt"].is_string());
        assert!(json["horizons"]["24h"]["co"].is_object());
    }

    #[test]
    fn test_title_uses_uppercase_level() {
        let mut values = [30.5, 55.0, 0.002, 0.005].repeat(3);
        values[0] = 32.5;
        let analysis = PredictionAnalysis::analyze(&values, 21).ok();
        assert_eq!(
            analysis.map(|a| (a.title(), a.subtitle())),
            Some(("Prevision: DANGER".to_string(), "Correction nécessaire"))
        );
    }
}
