//! Risk evaluation engine.
//!
//! Maps raw forecaster outputs and the flock age to per-variable risk levels,
//! groups them by forecast horizon and reduces them to one global severity.
//! Everything in here is a pure function of its inputs.

mod analysis;
mod evaluator;
mod horizon;
mod level;
mod severity;
mod thresholds;

pub use analysis::PredictionAnalysis;
pub use evaluator::{Assessment, evaluate_gas, evaluate_humidity, evaluate_temperature, to_ppm};
pub use horizon::{Horizon, HorizonResult, Horizons, Variable, VariableVerdict, aggregate_horizons};
pub use level::RiskLevel;
pub use severity::{resolve_global_risk, worst_of};
pub use thresholds::{
    AgeThresholds, Band, GasThresholds, GasType, ThresholdSet, gas_thresholds,
    humidity_thresholds, temperature_thresholds,
};
