//! Traffic observation model for per-request operational readings

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::Result;

/// A single set of operational traffic readings
///
/// Constructed per request from raw form values and discarded after use.
/// The fields are kept as signed integers so that out-of-range input can be
/// carried up to validation instead of being silently clamped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TrafficObservation {
    /// Congestion level as a percentage (valid range 0-100)
    pub congestion_percent: i32,
    /// Number of accidents reported (must be non-negative)
    pub accidents_reported: i32,
}

impl TrafficObservation {
    /// Create a new observation from raw readings
    #[must_use]
    pub fn new(congestion_percent: i32, accidents_reported: i32) -> Self {
        Self {
            congestion_percent,
            accidents_reported,
        }
    }

    /// Check that both readings are within their valid ranges
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.congestion_percent) {
            return Err(PipelineError::invalid_input(format!(
                "Congestion level must be between 0 and 100, got {}",
                self.congestion_percent
            )));
        }

        if self.accidents_reported < 0 {
            return Err(PipelineError::invalid_input(format!(
                "Accidents reported cannot be negative, got {}",
                self.accidents_reported
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_observation() {
        let observation = TrafficObservation::new(50, 2);
        assert!(observation.validate().is_ok());
    }

    #[test]
    fn test_boundary_values_are_valid() {
        assert!(TrafficObservation::new(0, 0).validate().is_ok());
        assert!(TrafficObservation::new(100, 0).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_congestion() {
        let err = TrafficObservation::new(-1, 0).validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput { .. }));

        let err = TrafficObservation::new(101, 0).validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput { .. }));
    }

    #[test]
    fn test_negative_accidents() {
        let err = TrafficObservation::new(50, -1).validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput { .. }));
    }
}
