//! JSON report writer.

use super::ReportWriter;
use crate::diagnostic::Diagnosis;
use crate::error::{Error, Result};
use crate::risk::{AgeThresholds, PredictionAnalysis};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Analysis document with its source.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisDocument<'a> {
    source: &'a str,
    analysis: &'a PredictionAnalysis,
    recommendations: &'static [&'static str],
}

/// Diagnosis document with its source.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosisDocument<'a> {
    source: &'a str,
    diagnosis: &'a Diagnosis,
    uncertain: bool,
}

/// Collects documents and writes them as one pretty-printed JSON array.
pub struct JsonReportWriter<W: Write> {
    writer: W,
    documents: Vec<Value>,
}

impl<W: Write> JsonReportWriter<W> {
    /// Create a new JSON writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn push(&mut self, document: &impl Serialize) -> Result<()> {
        let value = serde_json::to_value(document).map_err(|e| Error::JsonSerialize { source: e })?;
        self.documents.push(value);
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonReportWriter<W> {
    fn write_analysis(&mut self, source: &str, analysis: &PredictionAnalysis) -> Result<()> {
        self.push(&AnalysisDocument {
            source,
            analysis,
            recommendations: analysis.global_risk.recommendations(),
        })
    }

    fn write_diagnosis(
        &mut self,
        source: &str,
        diagnosis: &Diagnosis,
        uncertain: bool,
    ) -> Result<()> {
        self.push(&DiagnosisDocument {
            source,
            diagnosis,
            uncertain,
        })
    }

    fn write_thresholds(&mut self, thresholds: &AgeThresholds) -> Result<()> {
        self.push(thresholds)
    }

    fn finalize(&mut self) -> Result<()> {
        let documents = std::mem::take(&mut self.documents);
        serde_json::to_writer_pretty(&mut self.writer, &documents)
            .map_err(|e| Error::JsonSerialize { source: e })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
