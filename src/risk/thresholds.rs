//! Age-bucketed threshold tables.
//!
//! Temperature and humidity bands depend on the flock age; gas bounds are
//! fixed. Buckets are matched in ascending order with `age <= upper`, first
//! match wins, and the last entry of each table applies to any older flock.

use serde::{Deserialize, Serialize};

/// Closed numeric interval `[low, high]`, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Band {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl Band {
    /// Create a band.
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `value` lies inside the band.
    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Whether this band is nested inside `outer`.
    pub fn is_within(&self, outer: &Self) -> bool {
        outer.low <= self.low && self.high <= outer.high
    }

    /// Midpoint of the band.
    pub fn center(&self) -> f64 {
        f64::midpoint(self.low, self.high)
    }
}

impl From<[f64; 2]> for Band {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<Band> for [f64; 2] {
    fn from(band: Band) -> Self {
        [band.low, band.high]
    }
}

/// Optimal and acceptable bands for temperature or humidity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// Target band.
    pub optimal: Band,
    /// Tolerated band; always contains `optimal`.
    pub acceptable: Band,
}

impl ThresholdSet {
    const fn new(optimal: (f64, f64), acceptable: (f64, f64)) -> Self {
        Self {
            optimal: Band::new(optimal.0, optimal.1),
            acceptable: Band::new(acceptable.0, acceptable.1),
        }
    }
}

/// Gas concentration bounds in ppm, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasThresholds {
    /// Upper bound of the truly optimal range.
    pub optimal: f64,
    /// Warning starts at this concentration.
    pub warning: f64,
    /// Danger starts at this concentration.
    pub danger: f64,
    /// Critical starts at this concentration.
    pub critical: f64,
}

/// Monitored gases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasType {
    /// Ammonia.
    Nh3,
    /// Carbon monoxide.
    Co,
}

impl GasType {
    /// Uppercase chemical symbol used in messages.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Nh3 => "NH3",
            Self::Co => "CO",
        }
    }
}

impl std::fmt::Display for GasType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nh3 => write!(f, "nh3"),
            Self::Co => write!(f, "co"),
        }
    }
}

impl std::str::FromStr for GasType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nh3" => Ok(Self::Nh3),
            "co" => Ok(Self::Co),
            other => Err(format!("unknown gas type: {other}")),
        }
    }
}

/// Temperature buckets as `(upper age bound, thresholds)`.
const TEMPERATURE_BUCKETS: [(u32, ThresholdSet); 5] = [
    (7, ThresholdSet::new((35.5, 36.5), (35.0, 37.0))),
    (14, ThresholdSet::new((32.5, 33.5), (32.0, 34.0))),
    (21, ThresholdSet::new((30.0, 31.0), (29.0, 32.0))),
    (28, ThresholdSet::new((27.0, 28.0), (26.0, 29.0))),
    (35, ThresholdSet::new((24.0, 25.0), (23.0, 26.0))),
];
const TEMPERATURE_FALLBACK: ThresholdSet = ThresholdSet::new((21.0, 22.0), (20.0, 23.0));

const HUMIDITY_BUCKETS: [(u32, ThresholdSet); 2] = [
    (3, ThresholdSet::new((62.0, 68.0), (60.0, 70.0))),
    (14, ThresholdSet::new((55.0, 65.0), (50.0, 70.0))),
];
const HUMIDITY_FALLBACK: ThresholdSet = ThresholdSet::new((45.0, 65.0), (40.0, 70.0));

const NH3_THRESHOLDS: GasThresholds = GasThresholds {
    optimal: 5.0,
    warning: 10.0,
    danger: 20.0,
    critical: 25.0,
};

const CO_THRESHOLDS: GasThresholds = GasThresholds {
    optimal: 10.0,
    warning: 50.0,
    danger: 600.0,
    critical: 2000.0,
};

fn select_bucket(buckets: &[(u32, ThresholdSet)], fallback: ThresholdSet, age: u32) -> ThresholdSet {
    buckets
        .iter()
        .find(|(upper, _)| age <= *upper)
        .map_or(fallback, |(_, thresholds)| *thresholds)
}

/// Temperature thresholds (°C) for a flock of the given age.
pub fn temperature_thresholds(age: u32) -> ThresholdSet {
    select_bucket(&TEMPERATURE_BUCKETS, TEMPERATURE_FALLBACK, age)
}

/// Relative humidity thresholds (%) for a flock of the given age.
pub fn humidity_thresholds(age: u32) -> ThresholdSet {
    select_bucket(&HUMIDITY_BUCKETS, HUMIDITY_FALLBACK, age)
}

/// Fixed gas thresholds (ppm).
pub const fn gas_thresholds(gas: GasType) -> GasThresholds {
    match gas {
        GasType::Nh3 => NH3_THRESHOLDS,
        GasType::Co => CO_THRESHOLDS,
    }
}

/// Every threshold that applies to one flock age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeThresholds {
    /// Age the tables were selected for.
    pub age: u32,
    /// Temperature bands.
    pub temperature: ThresholdSet,
    /// Humidity bands.
    pub humidity: ThresholdSet,
    /// Ammonia bounds.
    pub nh3: GasThresholds,
    /// Carbon monoxide bounds.
    pub co: GasThresholds,
}

impl AgeThresholds {
    /// Resolve all tables for `age`.
    pub fn for_age(age: u32) -> Self {
        Self {
            age,
            temperature: temperature_thresholds(age),
            humidity: humidity_thresholds(age),
            nh3: gas_thresholds(GasType::Nh3),
            co: gas_thresholds(GasType::Co),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_band_contains_is_inclusive() {
        let band = Band::new(30.0, 31.0);
        assert!(band.contains(30.0));
        assert!(band.contains(31.0));
        assert!(!band.contains(29.9));
        assert!(!band.contains(f64::NAN));
    }

    #[test]
    fn test_temperature_bucket_boundaries() {
        assert_eq!(temperature_thresholds(0).optimal, Band::new(35.5, 36.5));
        assert_eq!(temperature_thresholds(7).optimal, Band::new(35.5, 36.5));
        assert_eq!(temperature_thresholds(8).optimal, Band::new(32.5, 33.5));
        assert_eq!(temperature_thresholds(14).optimal, Band::new(32.5, 33.5));
        assert_eq!(temperature_thresholds(21).acceptable, Band::new(29.0, 32.0));
        assert_eq!(temperature_thresholds(22).optimal, Band::new(27.0, 28.0));
        assert_eq!(temperature_thresholds(35).optimal, Band::new(24.0, 25.0));
        assert_eq!(temperature_thresholds(36).optimal, Band::new(21.0, 22.0));
        assert_eq!(temperature_thresholds(1000), TEMPERATURE_FALLBACK);
        assert_eq!(temperature_thresholds(u32::MAX), TEMPERATURE_FALLBACK);
    }

    #[test]
    fn test_humidity_bucket_boundaries() {
        assert_eq!(humidity_thresholds(3).optimal, Band::new(62.0, 68.0));
        assert_eq!(humidity_thresholds(4).optimal, Band::new(55.0, 65.0));
        assert_eq!(humidity_thresholds(14).acceptable, Band::new(50.0, 70.0));
        assert_eq!(humidity_thresholds(15).acceptable, Band::new(40.0, 70.0));
    }

    #[test]
    fn test_optimal_nested_in_acceptable_for_every_bucket() {
        for age in 0..=60 {
            let temp = temperature_thresholds(age);
            let hum = humidity_thresholds(age);
            assert!(temp.optimal.is_within(&temp.acceptable), "temperature, age {age}");
            assert!(hum.optimal.is_within(&hum.acceptable), "humidity, age {age}");
        }
    }

    #[test]
    fn test_gas_bounds_strictly_increasing() {
        for gas in [GasType::Nh3, GasType::Co] {
            let t = gas_thresholds(gas);
            assert!(t.optimal < t.warning && t.warning < t.danger && t.danger < t.critical);
        }
        assert_eq!(gas_thresholds(GasType::Nh3).critical, 25.0);
        assert_eq!(gas_thresholds(GasType::Co).danger, 600.0);
    }

    #[test]
    fn test_band_serializes_as_pair() {
        let json = serde_json::to_string(&Band::new(30.0, 31.0)).ok();
        assert_eq!(json.as_deref(), Some("[30.0,31.0]"));
        let band: Option<Band> = serde_json::from_str("[29.0,32.0]").ok();
        assert_eq!(band, Some(Band::new(29.0, 32.0)));
    }

    #[test]
    fn test_gas_type_from_str() {
        assert_eq!("NH3".parse::<GasType>().ok(), Some(GasType::Nh3));
        assert_eq!("co".parse::<GasType>().ok(), Some(GasType::Co));
        assert!("co2".parse::<GasType>().is_err());
    }
}
