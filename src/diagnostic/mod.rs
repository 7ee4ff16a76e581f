//! Droppings diagnosis from image classifier scores.

mod catalogue;

pub use catalogue::{DroppingsClass, find_class};

use crate::error::{Error, Result};
use crate::inference::ClassScore;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of classifying one droppings photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Model label of the top class (`cocci`, `healthy`, ...).
    pub label: String,
    /// Display name of the condition.
    pub name: String,
    /// Severity associated with the condition.
    pub severity: RiskLevel,
    /// Probability of the top class.
    pub confidence: f32,
    /// Short description of the condition.
    pub description: String,
    /// Recommended actions.
    pub recommendations: Vec<String>,
    /// All scores, most probable first.
    pub ranked: Vec<ClassScore>,
}

impl Diagnosis {
    /// Activity log title (`Diagnostic: Coccidiose`).
    pub fn title(&self) -> String {
        format!("Diagnostic: {}", self.name)
    }
}

/// Rank classifier scores and describe the most probable class.
///
/// Scores are sorted by probability, highest first. The top label must be
/// in the catalogue; lower-ranked unknown labels are kept as-is.
pub fn diagnose(scores: Vec<ClassScore>) -> Result<Diagnosis> {
    let mut ranked = scores;
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    let top = ranked.first().ok_or(Error::EmptyClassification)?;
    let class = find_class(&top.label).ok_or_else(|| Error::UnknownClass {
        label: top.label.clone(),
    })?;
    debug!(
        "Top class {} ({:.1}%)",
        class.label,
        f64::from(top.probability) * 100.0
    );

    Ok(Diagnosis {
        label: class.label.to_string(),
        name: class.name.to_string(),
        severity: class.severity,
        confidence: top.probability,
        description: class.description.to_string(),
        recommendations: class
            .recommendations
            .iter()
            .map(ToString::to_string)
            .collect(),
        ranked,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn score(label: &str, probability: f32) -> ClassScore {
        ClassScore {
            label: label.to_string(),
            probability,
        }
    }

    #[test]
    fn test_diagnose_picks_most_probable() {
        let diagnosis = diagnose(vec![
            score("cocci", 0.08),
            score("healthy", 0.87),
            score("salmo", 0.03),
            score("ncd", 0.02),
        ])
        .unwrap();

        assert_eq!(diagnosis.label, "healthy");
        assert_eq!(diagnosis.name, "Sain");
        assert_eq!(diagnosis.severity, RiskLevel::Optimal);
        assert_eq!(diagnosis.confidence, 0.87);
        assert_eq!(diagnosis.ranked[1].label, "cocci");
        assert_eq!(diagnosis.title(), "Diagnostic: Sain");
    }

    #[test]
    fn test_diagnose_ncd_is_critical() {
        let diagnosis = diagnose(vec![score("ncd", 0.6), score("healthy", 0.4)]).unwrap();
        assert_eq!(diagnosis.severity, RiskLevel::Critical);
        assert!(diagnosis.recommendations.iter().any(|r| r.contains("URGENCE")));
    }

    #[test]
    fn test_diagnose_empty_scores() {
        assert!(matches!(diagnose(vec![]), Err(Error::EmptyClassification)));
    }

    #[test]
    fn test_diagnose_unknown_top_label() {
        let result = diagnose(vec![score("feathers", 0.9), score("healthy", 0.1)]);
        assert!(matches!(result, Err(Error::UnknownClass { label }) if label == "feathers"));
    }
}
