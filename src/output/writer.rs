//! Report writer trait definition.

use crate::diagnostic::Diagnosis;
use crate::error::Result;
use crate::risk::{AgeThresholds, PredictionAnalysis};

/// Trait for writing analysis reports.
pub trait ReportWriter {
    /// Write one forecast analysis.
    fn write_analysis(&mut self, source: &str, analysis: &PredictionAnalysis) -> Result<()>;

    /// Write one photo diagnosis.
    ///
    /// `uncertain` is set when the top-class probability is below the
    /// configured minimum.
    fn write_diagnosis(&mut self, source: &str, diagnosis: &Diagnosis, uncertain: bool)
    -> Result<()>;

    /// Write the thresholds applied at one age.
    fn write_thresholds(&mut self, thresholds: &AgeThresholds) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
