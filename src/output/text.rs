//! Human-readable report writer.

use super::{ReportWriter, verdict_lines};
use crate::diagnostic::Diagnosis;
use crate::error::Result;
use crate::risk::{AgeThresholds, GasThresholds, PredictionAnalysis, RiskLevel, ThresholdSet};
use std::io::Write;

/// Plain text report writer.
pub struct TextReportWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> TextReportWriter<W> {
    /// Create a new text writer.
    pub const fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn separate(&mut self) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer)?;
        }
        self.written += 1;
        Ok(())
    }

    fn write_recommendations(&mut self, items: &[impl AsRef<str>]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "Recommandations:")?;
        for item in items {
            writeln!(self.writer, "  - {}", item.as_ref())?;
        }
        Ok(())
    }
}

fn band_summary(set: &ThresholdSet) -> String {
    format!(
        "optimal {:.1}-{:.1}, acceptable {:.1}-{:.1}",
        set.optimal.low, set.optimal.high, set.acceptable.low, set.acceptable.high
    )
}

fn gas_summary(gas: &GasThresholds) -> String {
    format!(
        "optimal <{}, warning >={}, danger >={}, critical >={} ppm",
        gas.optimal, gas.warning, gas.danger, gas.critical
    )
}

fn level_tag(level: RiskLevel) -> String {
    level.as_str().to_uppercase()
}

impl<W: Write> ReportWriter for TextReportWriter<W> {
    fn write_analysis(&mut self, source: &str, analysis: &PredictionAnalysis) -> Result<()> {
        self.separate()?;
        writeln!(
            self.writer,
            "{source}: {} ({}) - age {} days",
            level_tag(analysis.global_risk),
            analysis.subtitle(),
            analysis.age
        )?;

        for (horizon, result) in analysis.horizons.iter() {
            for line in verdict_lines(horizon, result) {
                writeln!(
                    self.writer,
                    "  {:<4} {:<12} {:>9.2} {:<4} {:<9} {}",
                    line.horizon.label(),
                    line.variable.name(),
                    line.value,
                    line.variable.unit(),
                    level_tag(line.level),
                    line.message
                )?;
            }
        }

        self.write_recommendations(analysis.global_risk.recommendations())
    }

    fn write_diagnosis(
        &mut self,
        source: &str,
        diagnosis: &Diagnosis,
        uncertain: bool,
    ) -> Result<()> {
        self.separate()?;
        writeln!(
            self.writer,
            "{source}: {} - {} ({:.1}%){}",
            diagnosis.name,
            level_tag(diagnosis.severity),
            f64::from(diagnosis.confidence) * 100.0,
            if uncertain { " [incertain]" } else { "" }
        )?;
        writeln!(self.writer, "  {}", diagnosis.description)?;
        for score in diagnosis.ranked.iter().skip(1) {
            writeln!(
                self.writer,
                "  {:<8} {:>5.1}%",
                score.label,
                f64::from(score.probability) * 100.0
            )?;
        }
        self.write_recommendations(diagnosis.recommendations.as_slice())
    }

    fn write_thresholds(&mut self, thresholds: &AgeThresholds) -> Result<()> {
        self.separate()?;
        writeln!(self.writer, "Seuils pour {} jours", thresholds.age)?;
        writeln!(
            self.writer,
            "  temperature  {} °C",
            band_summary(&thresholds.temperature)
        )?;
        writeln!(
            self.writer,
            "  humidity     {} %",
            band_summary(&thresholds.humidity)
        )?;
        writeln!(self.writer, "  nh3          {}", gas_summary(&thresholds.nh3))?;
        writeln!(self.writer, "  co           {}", gas_summary(&thresholds.co))?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagnostic::diagnose;
    use crate::inference::ClassScore;

    fn render(f: impl FnOnce(&mut TextReportWriter<Vec<u8>>)) -> String {
        let mut writer = TextReportWriter::new(Vec::new());
        f(&mut writer);
        writer.finalize().unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_analysis_report() {
        let values = [30.5, 55.0, 0.002, 0.005, 32.5, 55.0, 0.002, 0.005, 30.5, 55.0, 0.002, 0.005];
        let analysis = PredictionAnalysis::analyze(&values, 21).unwrap();
        let text = render(|w| w.write_analysis("window.json", &analysis).unwrap());

        assert!(text.starts_with("window.json: DANGER (Correction nécessaire) - age 21 days"));
        assert!(text.contains("Hyperthermie - Danger"));
        assert!(text.contains("2.00 ppm"));
        assert!(text.contains("Recommandations:"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  6h")).count(), 4);
    }

    #[test]
    fn test_optimal_analysis_has_no_recommendations() {
        let values = [30.5, 55.0, 0.002, 0.005].repeat(3);
        let analysis = PredictionAnalysis::analyze(&values, 21).unwrap();
        let text = render(|w| w.write_analysis("w", &analysis).unwrap());
        assert!(!text.contains("Recommandations"));
    }

    #[test]
    fn test_diagnosis_report() {
        let diagnosis = diagnose(vec![
            ClassScore {
                label: "healthy".to_string(),
                probability: 0.1,
            },
            ClassScore {
                label: "salmo".to_string(),
                probability: 0.85,
            },
        ])
        .unwrap();
        let text = render(|w| w.write_diagnosis("photo.jpg", &diagnosis, true).unwrap());

        assert!(text.starts_with("photo.jpg: Salmonellose - WARNING (85.0%) [incertain]"));
        assert!(text.contains("healthy"));
    }

    #[test]
    fn test_thresholds_report() {
        let text = render(|w| w.write_thresholds(&AgeThresholds::for_age(21)).unwrap());
        assert!(text.contains("Seuils pour 21 jours"));
        assert!(text.contains("optimal 30.0-31.0, acceptable 29.0-32.0"));
        assert!(text.contains("optimal <5, warning >=10, danger >=20, critical >=25 ppm"));
    }

    #[test]
    fn test_reports_are_separated() {
        let text = render(|w| {
            w.write_thresholds(&AgeThresholds::for_age(3)).unwrap();
            w.write_thresholds(&AgeThresholds::for_age(42)).unwrap();
        });
        assert!(text.contains("\n\nSeuils pour 42 jours"));
    }
}
