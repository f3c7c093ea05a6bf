//! Error types and handling for the `TrafficAI` pipeline

use thiserror::Error;

/// Main error type for the `TrafficAI` pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Caller-supplied data violates a precondition
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Transient network or connectivity fault
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Remote service throttled the request
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        /// Delay hint from the remote service, when one was provided
        retry_after_seconds: Option<u64>,
    },

    /// Remote service returned data outside the expected schema
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Configuration-related errors, including rejected credentials
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PipelineError {
    /// Create a new invalid-input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new service-unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a new rate-limited error
    pub fn rate_limited<S: Into<String>>(message: S, retry_after_seconds: Option<u64>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_seconds,
        }
    }

    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether a later identical call could plausibly succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PipelineError::ServiceUnavailable { .. } | PipelineError::RateLimited { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            PipelineError::ServiceUnavailable { .. } => {
                "Unable to reach the external service. Please check your internet connection and try again."
                    .to_string()
            }
            PipelineError::RateLimited {
                retry_after_seconds, ..
            } => match retry_after_seconds {
                Some(seconds) => {
                    format!("The service is throttling requests. Please retry in {seconds} seconds.")
                }
                None => "The service is throttling requests. Please retry later.".to_string(),
            },
            PipelineError::MalformedResponse { .. } => {
                "The external service returned unexpected data.".to_string()
            }
            PipelineError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}
