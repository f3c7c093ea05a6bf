//! Caller-owned history of recommendation requests
//!
//! The pipeline itself is stateless; callers that want a request history
//! own one of these and append to it after each successful call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Recommendation, TrafficObservation};

/// One completed recommendation request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecommendationRecord {
    pub observation: TrafficObservation,
    pub recommendation: Recommendation,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log of recommendation requests
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct History {
    records: Vec<RecommendationRecord>,
}

impl History {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed request to the history
    pub fn record(&mut self, observation: TrafficObservation, recommendation: Recommendation) {
        self.records.push(RecommendationRecord {
            observation,
            recommendation,
            recorded_at: Utc::now(),
        });
    }

    /// All records in insertion order
    #[must_use]
    pub fn records(&self) -> &[RecommendationRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut history = History::new();

        history.record(
            TrafficObservation::new(10, 0),
            Recommendation::new("All clear."),
        );
        history.record(
            TrafficObservation::new(90, 3),
            Recommendation::new("Divert traffic."),
        );

        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].observation.congestion_percent, 10);
        assert_eq!(history.records()[1].observation.congestion_percent, 90);
        assert_eq!(history.records()[1].recommendation.text, "Divert traffic.");
    }
}
