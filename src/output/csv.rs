//! CSV report writer.

use super::{ReportWriter, verdict_lines};
use crate::constants::confidence::DECIMAL_PLACES;
use crate::diagnostic::Diagnosis;
use crate::error::{Error, Result};
use crate::risk::{AgeThresholds, GasThresholds, PredictionAnalysis, ThresholdSet};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct VerdictRow<'a> {
    source: &'a str,
    age: u32,
    horizon: &'static str,
    variable: &'static str,
    value: f64,
    unit: &'static str,
    level: &'static str,
    message: &'a str,
    global_risk: &'static str,
}

#[derive(Serialize)]
struct DiagnosisRow<'a> {
    source: &'a str,
    label: &'a str,
    name: &'a str,
    severity: &'static str,
    confidence: String,
    uncertain: bool,
}

#[derive(Serialize)]
struct ThresholdRow {
    age: u32,
    variable: &'static str,
    optimal_low: Option<f64>,
    optimal_high: f64,
    acceptable_low: Option<f64>,
    acceptable_high: Option<f64>,
    warning: Option<f64>,
    danger: Option<f64>,
    critical: Option<f64>,
}

impl ThresholdRow {
    const fn band(age: u32, variable: &'static str, set: &ThresholdSet) -> Self {
        Self {
            age,
            variable,
            optimal_low: Some(set.optimal.low),
            optimal_high: set.optimal.high,
            acceptable_low: Some(set.acceptable.low),
            acceptable_high: Some(set.acceptable.high),
            warning: None,
            danger: None,
            critical: None,
        }
    }

    const fn gas(age: u32, variable: &'static str, gas: &GasThresholds) -> Self {
        Self {
            age,
            variable,
            optimal_low: None,
            optimal_high: gas.optimal,
            acceptable_low: None,
            acceptable_high: None,
            warning: Some(gas.warning),
            danger: Some(gas.danger),
            critical: Some(gas.critical),
        }
    }
}

/// CSV writer: one row per horizon and variable for analyses.
pub struct CsvReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReportWriter<W> {
    /// Create a new CSV writer. The header is taken from the first row.
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| {
                let source = e.error();
                Error::Io(std::io::Error::new(source.kind(), source.to_string()))
            })
    }

    fn row(&mut self, row: &impl Serialize) -> Result<()> {
        self.writer
            .serialize(row)
            .map_err(|e| Error::CsvWrite { source: e })
    }
}

impl<W: Write> ReportWriter for CsvReportWriter<W> {
    fn write_analysis(&mut self, source: &str, analysis: &PredictionAnalysis) -> Result<()> {
        for (horizon, result) in analysis.horizons.iter() {
            for line in verdict_lines(horizon, result) {
                self.row(&VerdictRow {
                    source,
                    age: analysis.age,
                    horizon: line.horizon.label(),
                    variable: line.variable.name(),
                    value: line.value,
                    unit: line.variable.unit(),
                    level: line.level.as_str(),
                    message: line.message,
                    global_risk: analysis.global_risk.as_str(),
                })?;
            }
        }
        Ok(())
    }

    fn write_diagnosis(
        &mut self,
        source: &str,
        diagnosis: &Diagnosis,
        uncertain: bool,
    ) -> Result<()> {
        self.row(&DiagnosisRow {
            source,
            label: &diagnosis.label,
            name: &diagnosis.name,
            severity: diagnosis.severity.as_str(),
            confidence: format!(
                "{:.decimal$}",
                diagnosis.confidence,
                decimal = DECIMAL_PLACES
            ),
            uncertain,
        })
    }

    fn write_thresholds(&mut self, thresholds: &AgeThresholds) -> Result<()> {
        let age = thresholds.age;
        self.row(&ThresholdRow::band(age, "temperature", &thresholds.temperature))?;
        self.row(&ThresholdRow::band(age, "humidity", &thresholds.humidity))?;
        self.row(&ThresholdRow::gas(age, "nh3", &thresholds.nh3))?;
        self.row(&ThresholdRow::gas(age, "co", &thresholds.co))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
