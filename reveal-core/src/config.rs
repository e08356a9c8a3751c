use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`RevealConfig`] cannot drive a session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("duration per shape must be a positive number of milliseconds, got {0}")]
    InvalidDuration(f64),

    #[error("total cycles must be at least 1")]
    ZeroCycles,

    #[error("twinkle probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("twinkle amplitude must be finite and non-negative, got {0}")]
    InvalidAmplitude(f32),
}

/// Fixed parameters of one reveal session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Number of points in every shape.
    pub particle_count: usize,
    /// Time spent morphing from one shape into the next, in milliseconds.
    pub duration_per_shape_ms: f64,
    /// Shape transitions to play before completion.
    pub total_cycles: u32,
    /// Chance that a point receives twinkle noise on a given frame.
    pub twinkle_probability: f64,
    /// Full width of the twinkle offset on each axis.
    pub twinkle_amplitude: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            particle_count: 30_000,
            duration_per_shape_ms: 1200.0,
            total_cycles: 4,
            twinkle_probability: 0.05,
            twinkle_amplitude: 0.1,
        }
    }
}

impl RevealConfig {
    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration_per_shape_ms.is_finite() || self.duration_per_shape_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration_per_shape_ms));
        }
        if self.total_cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        if !(0.0..=1.0).contains(&self.twinkle_probability) {
            return Err(ConfigError::InvalidProbability(self.twinkle_probability));
        }
        if !self.twinkle_amplitude.is_finite() || self.twinkle_amplitude < 0.0 {
            return Err(ConfigError::InvalidAmplitude(self.twinkle_amplitude));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RevealConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.particle_count, 30_000);
        assert_eq!(cfg.total_cycles, 4);
    }

    #[test]
    fn validate_rejects_non_positive_duration() {
        let mut cfg = RevealConfig::default();
        cfg.duration_per_shape_ms = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDuration(0.0)));

        cfg.duration_per_shape_ms = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_cycles() {
        let mut cfg = RevealConfig::default();
        cfg.total_cycles = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCycles));
    }

    #[test]
    fn validate_rejects_bad_twinkle_settings() {
        let mut cfg = RevealConfig::default();
        cfg.twinkle_probability = 1.5;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidProbability(1.5)));

        let mut cfg = RevealConfig::default();
        cfg.twinkle_amplitude = -0.1;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidAmplitude(-0.1)));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: RevealConfig =
            serde_json::from_str(r#"{ "particle_count": 500, "total_cycles": 2 }"#).unwrap();

        assert_eq!(cfg.particle_count, 500);
        assert_eq!(cfg.total_cycles, 2);
        assert_eq!(cfg.duration_per_shape_ms, 1200.0);
        assert_eq!(cfg.twinkle_probability, 0.05);
    }
}
