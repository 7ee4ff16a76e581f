//! Single input processing.

use crate::diagnostic::{Diagnosis, diagnose};
use crate::error::Result;
use crate::inference::{InferenceBackend, SequenceWindow, load_model_output, output_values};
use crate::risk::PredictionAnalysis;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Forecast a window with `backend` and analyze the result for `age`.
pub fn forecast(
    backend: &dyn InferenceBackend,
    window: &SequenceWindow,
    age: u32,
) -> Result<PredictionAnalysis> {
    let start_time = Instant::now();

    debug!(
        "Running forecaster on {}x{} window",
        window.timesteps(),
        window.features()
    );
    let outputs = backend.predict_sequence(window)?;
    let analysis = PredictionAnalysis::analyze(&output_values(&outputs), age)?;

    debug!(
        "Forecast analyzed in {:.1}ms",
        start_time.elapsed().as_secs_f64() * 1000.0
    );
    Ok(analysis)
}

/// Load a sequence window, forecast it and analyze the result.
pub fn process_window(
    backend: &dyn InferenceBackend,
    path: &Path,
    timesteps: usize,
    features: usize,
    age: u32,
) -> Result<PredictionAnalysis> {
    info!("Processing: {}", path.display());
    let window = SequenceWindow::load(path, timesteps, features)?;
    forecast(backend, &window, age)
}

/// Analyze a recorded forecaster output file.
pub fn analyze_output_file(path: &Path, age: u32) -> Result<PredictionAnalysis> {
    info!("Processing: {}", path.display());
    let outputs = load_model_output(path)?;
    PredictionAnalysis::analyze(&output_values(&outputs), age)
}

/// Classify a droppings photo and describe the most probable condition.
pub fn classify(backend: &dyn InferenceBackend, image: &Path) -> Result<Diagnosis> {
    info!("Classifying: {}", image.display());
    let scores = backend.classify_image(image)?;
    diagnose(scores)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::inference::{ClassScore, LabeledValue};
    use crate::risk::RiskLevel;

    struct FixedBackend {
        values: Vec<f64>,
        scores: Vec<ClassScore>,
    }

    impl InferenceBackend for FixedBackend {
        fn classify_image(&self, _image: &Path) -> Result<Vec<ClassScore>> {
            Ok(self.scores.clone())
        }

        fn predict_sequence(&self, _window: &SequenceWindow) -> Result<Vec<LabeledValue>> {
            Ok(self
                .values
                .iter()
                .map(|&value| LabeledValue {
                    label: String::new(),
                    value,
                })
                .collect())
        }
    }

    fn window() -> SequenceWindow {
        SequenceWindow::from_rows(vec![vec![0.0; 2]; 3], 3, 2).unwrap()
    }

    #[test]
    fn test_forecast_analyzes_backend_output() {
        let mut values = [30.5, 55.0, 0.002, 0.005].repeat(3);
        values[4] = 36.0;
        let backend = FixedBackend {
            values,
            scores: Vec::new(),
        };

        let analysis = forecast(&backend, &window(), 21).unwrap();
        assert_eq!(analysis.global_risk, RiskLevel::Critical);
    }

    #[test]
    fn test_forecast_short_output_is_shape_error() {
        let backend = FixedBackend {
            values: vec![30.0; 8],
            scores: Vec::new(),
        };
        assert!(matches!(
            forecast(&backend, &window(), 21),
            Err(Error::Shape {
                expected: 12,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_classify_picks_top_class() {
        let backend = FixedBackend {
            values: Vec::new(),
            scores: vec![
                ClassScore {
                    label: "healthy".to_string(),
                    probability: 0.2,
                },
                ClassScore {
                    label: "ncd".to_string(),
                    probability: 0.7,
                },
            ],
        };
        let diagnosis = classify(&backend, Path::new("photo.jpg")).unwrap();
        assert_eq!(diagnosis.severity, RiskLevel::Critical);
    }
}
