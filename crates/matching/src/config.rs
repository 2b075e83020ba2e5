//! Engine thresholds and result caps.

use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// Minimum score (exclusive) for a pair to count as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Dashboard suggestion cap.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Similar-items panel cap.
pub const DEFAULT_MAX_SIMILAR: usize = 3;

/// Tunable parameters of the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub threshold: f64,
    pub max_suggestions: usize,
    pub max_similar: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_similar: DEFAULT_MAX_SIMILAR,
        }
    }
}

impl MatchConfig {
    /// Build and validate a configuration.
    pub fn new(threshold: f64, max_suggestions: usize, max_similar: usize) -> Result<Self> {
        let config = Self {
            threshold,
            max_suggestions,
            max_similar,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds outside `[0, 1]` (including NaN) and zero caps.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::ThresholdOutOfRange(self.threshold));
        }
        if self.max_suggestions == 0 {
            return Err(MatchError::ZeroCap("max_suggestions"));
        }
        if self.max_similar == 0 {
            return Err(MatchError::ZeroCap("max_similar"));
        }
        Ok(())
    }

    /// Whether `score` clears the threshold.
    pub fn is_match(&self, score: f64) -> bool {
        score > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            MatchConfig::new(1.2, 5, 3),
            Err(MatchError::ThresholdOutOfRange(1.2))
        );
        assert!(MatchConfig::new(f64::NAN, 5, 3).is_err());
        assert_eq!(
            MatchConfig::new(0.3, 0, 3),
            Err(MatchError::ZeroCap("max_suggestions"))
        );
        assert_eq!(
            MatchConfig::new(0.3, 5, 0),
            Err(MatchError::ZeroCap("max_similar"))
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = MatchConfig::default();
        assert!(!config.is_match(0.3));
        assert!(config.is_match(0.300_001));
    }
}
