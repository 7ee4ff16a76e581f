//! Report writers.

mod csv;
mod json;
pub mod progress;
mod text;
mod writer;

pub use csv::CsvReportWriter;
pub use json::JsonReportWriter;
pub use text::TextReportWriter;
pub use writer::ReportWriter;

use crate::config::OutputFormat;
use crate::risk::{Horizon, HorizonResult, RiskLevel, Variable};
use std::io::Write;

/// Create a writer for `format` over `sink`.
pub fn create_writer(format: OutputFormat, sink: Box<dyn Write>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Text => Box::new(TextReportWriter::new(sink)),
        OutputFormat::Json => Box::new(JsonReportWriter::new(sink)),
        OutputFormat::Csv => Box::new(CsvReportWriter::new(sink)),
    }
}

/// One verdict flattened for tabular output.
struct VerdictLine<'a> {
    horizon: Horizon,
    variable: Variable,
    /// Value in display units (ppm for gases).
    value: f64,
    level: RiskLevel,
    message: &'a str,
}

fn verdict_lines(horizon: Horizon, result: &HorizonResult) -> [VerdictLine<'_>; 4] {
    let line = |variable, value, level, message| VerdictLine {
        horizon,
        variable,
        value,
        level,
        message,
    };
    [
        line(
            Variable::Temperature,
            result.temperature.value,
            result.temperature.level,
            result.temperature.message.as_str(),
        ),
        line(
            Variable::Humidity,
            result.humidity.value,
            result.humidity.level,
            result.humidity.message.as_str(),
        ),
        line(
            Variable::Nh3,
            result.nh3.ppm(),
            result.nh3.level,
            result.nh3.message.as_str(),
        ),
        line(
            Variable::Co,
            result.co.ppm(),
            result.co.level,
            result.co.message.as_str(),
        ),
    ]
}
