//! Configuration validation.

use crate::config::Config;
use crate::constants::confidence;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sequence(config)?;
    validate_diagnostic(config)?;
    Ok(())
}

/// Validate sequence window dimensions.
fn validate_sequence(config: &Config) -> Result<()> {
    let sequence = &config.sequence;

    if sequence.timesteps == 0 {
        return Err(Error::ConfigValidation {
            message: "sequence.timesteps must be at least 1".to_string(),
        });
    }

    if sequence.features == 0 {
        return Err(Error::ConfigValidation {
            message: "sequence.features must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate diagnosis settings.
fn validate_diagnostic(config: &Config) -> Result<()> {
    let min_confidence = config.diagnostic.min_confidence;

    if !(confidence::MIN..=confidence::MAX).contains(&min_confidence) {
        return Err(Error::ConfigValidation {
            message: format!(
                "diagnostic.min_confidence must be between {} and {}, got {}",
                confidence::MIN,
                confidence::MAX,
                min_confidence
            ),
        });
    }

    Ok(())
}
