//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "fientesia";

/// Default flock age in days when neither CLI nor config provides one.
pub const DEFAULT_AGE_DAYS: u32 = 21;

/// Model output layout for the environment forecaster.
pub mod forecast {
    /// Number of variables predicted per horizon (temperature, humidity, NH3, CO).
    pub const VARIABLES_PER_HORIZON: usize = 4;

    /// Number of forecast horizons (1h, 6h, 24h).
    pub const HORIZON_COUNT: usize = 3;

    /// Minimum number of values the forecaster must emit.
    pub const OUTPUT_LEN: usize = VARIABLES_PER_HORIZON * HORIZON_COUNT;

    /// Gas outputs are fractions; multiply by this to get ppm.
    pub const PPM_PER_FRACTION: f64 = 1000.0;
}

/// Distance beyond the acceptable band at which a reading becomes critical.
pub mod critical_margin {
    /// Temperature margin in degrees Celsius.
    pub const TEMPERATURE: f64 = 3.0;

    /// Relative humidity margin in percentage points.
    pub const HUMIDITY: f64 = 10.0;
}

/// Sequence window expected by the forecaster.
pub mod sequence {
    /// Number of timesteps in one window (one week of hourly readings).
    pub const TIMESTEPS: usize = 168;

    /// Number of features per timestep.
    pub const FEATURES: usize = 47;

    /// Key prefix used in scaler parameter files (`feature_0`, `feature_1`, ...).
    pub const SCALER_KEY_PREFIX: &str = "feature_";
}

/// File name suffixes for outputs recorded next to their inputs.
pub mod recorded {
    /// Forecaster output recorded for a sequence window (`window.forecast.json`).
    pub const FORECAST_SUFFIX: &str = ".forecast.json";

    /// Classifier scores recorded for a photo (`photo.scores.json`).
    pub const SCORES_SUFFIX: &str = ".scores.json";
}

/// Activity history constants.
pub mod history {
    /// Maximum number of entries kept; oldest are evicted first.
    pub const CAPACITY: usize = 10;

    /// Default history file name inside the data directory.
    pub const FILE_NAME: &str = "history.json";
}

/// Presets for common flock stages, in days.
pub mod stage {
    /// Chicks (0-7 days).
    pub const CHICKS: u32 = 3;
    /// Growing birds (8-14 days).
    pub const GROWING: u32 = 10;
    /// Finishing birds (15-28 days).
    pub const FINISHING: u32 = 21;
    /// Adult birds (28+ days).
    pub const ADULT: u32 = 42;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}
