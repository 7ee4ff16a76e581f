//! Horizon aggregation.
//!
//! The forecaster emits a flat vector where index `i` is variable `i % 4`
//! (temperature, humidity, NH3, CO) at horizon `i / 4` (1h, 6h, 24h). Labels
//! are never consulted; the layout is positional.

use super::evaluator::{Assessment, evaluate_gas, evaluate_humidity, evaluate_temperature, to_ppm};
use super::level::RiskLevel;
use super::thresholds::{AgeThresholds, GasThresholds, GasType, ThresholdSet};
use crate::constants::forecast::{HORIZON_COUNT, OUTPUT_LEN, VARIABLES_PER_HORIZON};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forecast lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// One hour ahead.
    #[serde(rename = "1h")]
    OneHour,
    /// Six hours ahead.
    #[serde(rename = "6h")]
    SixHours,
    /// Twenty-four hours ahead.
    #[serde(rename = "24h")]
    TwentyFourHours,
}

impl Horizon {
    /// All horizons in model output order.
    pub const ALL: [Self; HORIZON_COUNT] = [Self::OneHour, Self::SixHours, Self::TwentyFourHours];

    /// Short label (`1h`, `6h`, `24h`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::SixHours => "6h",
            Self::TwentyFourHours => "24h",
        }
    }

    /// Position of this horizon in the model output.
    pub const fn index(self) -> usize {
        match self {
            Self::OneHour => 0,
            Self::SixHours => 1,
            Self::TwentyFourHours => 2,
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Forecast variable, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    /// Air temperature (°C).
    Temperature,
    /// Relative humidity (%).
    Humidity,
    /// Ammonia (fraction; ×1000 for ppm).
    Nh3,
    /// Carbon monoxide (fraction; ×1000 for ppm).
    Co,
}

impl Variable {
    /// All variables in model output order.
    pub const ALL: [Self; VARIABLES_PER_HORIZON] =
        [Self::Temperature, Self::Humidity, Self::Nh3, Self::Co];

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Nh3 => "nh3",
            Self::Co => "co",
        }
    }

    /// Display unit after conversion.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Nh3 | Self::Co => "ppm",
        }
    }
}

/// Verdict for one variable at one horizon.
///
/// `thresholds` holds the bands or bounds the value was judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableVerdict<T> {
    /// Raw model value (°C, %, or gas fraction).
    pub value: f64,
    /// Assigned risk level.
    pub level: RiskLevel,
    /// Human-readable verdict.
    pub message: String,
    /// Thresholds used for the verdict.
    pub thresholds: T,
}

impl<T> VariableVerdict<T> {
    fn new(value: f64, assessment: Assessment, thresholds: T) -> Self {
        Self {
            value,
            level: assessment.level,
            message: assessment.message,
            thresholds,
        }
    }
}

impl VariableVerdict<GasThresholds> {
    /// Gas concentration in ppm.
    pub fn ppm(&self) -> f64 {
        to_ppm(self.value)
    }
}

/// The four verdicts of one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonResult {
    /// Temperature verdict.
    pub temperature: VariableVerdict<ThresholdSet>,
    /// Humidity verdict.
    pub humidity: VariableVerdict<ThresholdSet>,
    /// Ammonia verdict.
    pub nh3: VariableVerdict<GasThresholds>,
    /// Carbon monoxide verdict.
    pub co: VariableVerdict<GasThresholds>,
}

impl HorizonResult {
    /// Levels in variable order.
    pub const fn levels(&self) -> [RiskLevel; VARIABLES_PER_HORIZON] {
        [
            self.temperature.level,
            self.humidity.level,
            self.nh3.level,
            self.co.level,
        ]
    }

    fn evaluate(values: &[f64], horizon: Horizon, thresholds: &AgeThresholds) -> Result<Self> {
        for (variable, value) in Variable::ALL.iter().zip(values) {
            if !value.is_finite() {
                return Err(Error::NonFiniteReading {
                    variable: variable.name(),
                    horizon: horizon.label(),
                    value: *value,
                });
            }
        }

        let (temperature, humidity, nh3, co) = (values[0], values[1], values[2], values[3]);

        Ok(Self {
            temperature: VariableVerdict::new(
                temperature,
                evaluate_temperature(temperature, &thresholds.temperature),
                thresholds.temperature,
            ),
            humidity: VariableVerdict::new(
                humidity,
                evaluate_humidity(humidity, &thresholds.humidity),
                thresholds.humidity,
            ),
            nh3: VariableVerdict::new(
                nh3,
                evaluate_gas(nh3, GasType::Nh3, &thresholds.nh3),
                thresholds.nh3,
            ),
            co: VariableVerdict::new(
                co,
                evaluate_gas(co, GasType::Co, &thresholds.co),
                thresholds.co,
            ),
        })
    }
}

/// Results for the three horizons, keyed `1h`, `6h`, `24h`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horizons {
    /// One hour ahead.
    #[serde(rename = "1h")]
    pub one_hour: HorizonResult,
    /// Six hours ahead.
    #[serde(rename = "6h")]
    pub six_hours: HorizonResult,
    /// Twenty-four hours ahead.
    #[serde(rename = "24h")]
    pub twenty_four_hours: HorizonResult,
}

impl Horizons {
    /// Result for one horizon.
    pub const fn get(&self, horizon: Horizon) -> &HorizonResult {
        match horizon {
            Horizon::OneHour => &self.one_hour,
            Horizon::SixHours => &self.six_hours,
            Horizon::TwentyFourHours => &self.twenty_four_hours,
        }
    }

    /// Iterate horizons in lead-time order.
    pub fn iter(&self) -> impl Iterator<Item = (Horizon, &HorizonResult)> {
        Horizon::ALL.into_iter().map(|h| (h, self.get(h)))
    }

    /// All twelve levels, horizon-major.
    pub fn levels(&self) -> impl Iterator<Item = RiskLevel> + '_ {
        self.iter().flat_map(|(_, result)| result.levels())
    }
}

/// Group a flat model output into three evaluated horizons.
///
/// Reads `values[0..12]`; extra values are ignored. Fails with
/// [`Error::Shape`] when fewer than 12 values are given and with
/// [`Error::NonFiniteReading`] on NaN or infinite values.
pub fn aggregate_horizons(values: &[f64], age: u32) -> Result<Horizons> {
    if values.len() < OUTPUT_LEN {
        return Err(Error::Shape {
            expected: OUTPUT_LEN,
            actual: values.len(),
        });
    }
    if values.len() > OUTPUT_LEN {
        debug!(
            "Ignoring {} trailing model output value(s)",
            values.len() - OUTPUT_LEN
        );
    }

    let thresholds = AgeThresholds::for_age(age);
    let evaluate = |horizon: Horizon| {
        HorizonResult::evaluate(horizon_slice(values, horizon), horizon, &thresholds)
    };

    Ok(Horizons {
        one_hour: evaluate(Horizon::OneHour)?,
        six_hours: evaluate(Horizon::SixHours)?,
        twenty_four_hours: evaluate(Horizon::TwentyFourHours)?,
    })
}

fn horizon_slice(values: &[f64], horizon: Horizon) -> &[f64] {
    let start = horizon.index() * VARIABLES_PER_HORIZON;
    &values[start..start + VARIABLES_PER_HORIZON]
}
