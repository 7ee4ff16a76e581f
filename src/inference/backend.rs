//! Inference capability trait.

use crate::error::Result;
use crate::inference::{ClassScore, LabeledValue, SequenceWindow};
use std::path::Path;

/// Access to the two on-device models.
///
/// Calls may be slow and may fail; the risk engine is only invoked on a
/// successful result.
pub trait InferenceBackend {
    /// Classify a droppings photo. Scores are in model label order.
    fn classify_image(&self, image: &Path) -> Result<Vec<ClassScore>>;

    /// Forecast environment values from a sensor window.
    ///
    /// Returns at least 12 values laid out horizon-major
    /// (temperature, humidity, NH3, CO at 1h, then 6h, then 24h).
    fn predict_sequence(&self, window: &SequenceWindow) -> Result<Vec<LabeledValue>>;
}
