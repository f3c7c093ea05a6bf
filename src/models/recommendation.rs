//! Recommendation model for completion endpoint output

use serde::{Deserialize, Serialize};

/// Plain text returned by the language model
///
/// No internal structure is guaranteed beyond the text itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub text: String,
}

impl Recommendation {
    /// Create a new recommendation
    #[must_use]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
