//! Per-variable risk evaluation.
//!
//! Checks run most-severe-first and the first match wins. The functions are
//! total over finite inputs; callers reject NaN and infinities beforehand
//! (see [`aggregate_horizons`](super::aggregate_horizons)).

use super::level::RiskLevel;
use super::thresholds::{GasThresholds, GasType, ThresholdSet};
use crate::constants::{critical_margin, forecast::PPM_PER_FRACTION};
use serde::{Deserialize, Serialize};

/// Level and message for one reading; the caller attaches the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Assigned risk level.
    pub level: RiskLevel,
    /// Human-readable verdict.
    pub message: String,
}

impl Assessment {
    fn new(level: RiskLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Wording for a banded variable, indexed by tier and direction.
struct BandWording {
    critical_low: &'static str,
    critical_high: &'static str,
    danger_low: &'static str,
    danger_high: &'static str,
    acceptable: &'static str,
    optimal: &'static str,
}

const TEMPERATURE_WORDING: BandWording = BandWording {
    critical_low: "HYPOTHERMIE CRITIQUE",
    critical_high: "HYPERTHERMIE CRITIQUE",
    danger_low: "Hypothermie - Danger",
    danger_high: "Hyperthermie - Danger",
    acceptable: "Température acceptable",
    optimal: "Température optimale",
};

const HUMIDITY_WORDING: BandWording = BandWording {
    critical_low: "AIR TRÈS SEC - CRITIQUE",
    critical_high: "AIR TRÈS HUMIDE - CRITIQUE",
    danger_low: "Air trop sec - Danger",
    danger_high: "Air trop humide - Danger",
    acceptable: "Humidité acceptable",
    optimal: "Humidité optimale",
};

fn evaluate_band(
    value: f64,
    thresholds: &ThresholdSet,
    margin: f64,
    wording: &BandWording,
) -> Assessment {
    let ThresholdSet {
        optimal,
        acceptable,
    } = thresholds;
    let too_low = value < acceptable.low;

    if value < acceptable.low - margin || value > acceptable.high + margin {
        let message = if too_low {
            wording.critical_low
        } else {
            wording.critical_high
        };
        return Assessment::new(RiskLevel::Critical, message);
    }

    if too_low || value > acceptable.high {
        let message = if too_low {
            wording.danger_low
        } else {
            wording.danger_high
        };
        return Assessment::new(RiskLevel::Danger, message);
    }

    if optimal.contains(value) {
        Assessment::new(RiskLevel::Optimal, wording.optimal)
    } else {
        Assessment::new(RiskLevel::Warning, wording.acceptable)
    }
}

/// Classify a temperature in °C.
///
/// Critical beyond 3 °C outside the acceptable band, danger outside it,
/// warning outside the optimal band, optimal otherwise.
pub fn evaluate_temperature(value: f64, thresholds: &ThresholdSet) -> Assessment {
    evaluate_band(
        value,
        thresholds,
        critical_margin::TEMPERATURE,
        &TEMPERATURE_WORDING,
    )
}

/// Classify a relative humidity in %. Same tiers as temperature with a
/// 10 point critical margin.
pub fn evaluate_humidity(value: f64, thresholds: &ThresholdSet) -> Assessment {
    evaluate_band(
        value,
        thresholds,
        critical_margin::HUMIDITY,
        &HUMIDITY_WORDING,
    )
}

/// Convert a model gas fraction to ppm.
pub fn to_ppm(fraction: f64) -> f64 {
    fraction * PPM_PER_FRACTION
}

/// Classify a gas reading given as a model fraction.
///
/// Everything under the warning bound is optimal; the message still tells
/// "optimal" (below the optimal bound) apart from "acceptable".
pub fn evaluate_gas(fraction: f64, gas: GasType, thresholds: &GasThresholds) -> Assessment {
    let ppm = to_ppm(fraction);
    let symbol = gas.symbol();

    if ppm >= thresholds.critical {
        Assessment::new(RiskLevel::Critical, format!("{symbol} CRITIQUE - ÉVACUATION"))
    } else if ppm >= thresholds.danger {
        Assessment::new(RiskLevel::Danger, format!("{symbol} élevé - Danger"))
    } else if ppm >= thresholds.warning {
        Assessment::new(
            RiskLevel::Warning,
            format!("{symbol} modéré - Avertissement"),
        )
    } else if ppm >= thresholds.optimal {
        Assessment::new(RiskLevel::Optimal, format!("{symbol} acceptable"))
    } else {
        Assessment::new(RiskLevel::Optimal, format!("{symbol} optimal"))
    }
}
