//! Configuration management for the `TrafficAI` pipeline
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::error::PipelineError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TrafficAI` pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Completion endpoint configuration
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Routing endpoint configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Bearer credential for the completion endpoint
    pub api_key: Option<String>,
    /// Base URL for the completion API
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion request
    #[serde(default = "default_completion_model")]
    pub model: String,
    /// Maximum output length per request
    #[serde(default = "default_completion_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Routing endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL for the routing API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Logging settings consumed by the binary's subscriber setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_completion_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_completion_model() -> String {
    "text-davinci-002".to_string()
}

fn default_completion_max_tokens() -> u32 {
    500
}

fn default_routing_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            max_tokens: default_completion_max_tokens(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig::default(),
            routing: RoutingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRAFFICAI_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRAFFICAI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PipelineConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Fall back to the conventional credential variable
        if config.completion.api_key.is_none() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                if !key.is_empty() {
                    config.completion.api_key = Some(key);
                }
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trafficai").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(api_key) = &self.completion.api_key {
            if api_key.is_empty() {
                return Err(PipelineError::config(
                    "Completion API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }
        }

        if self.completion.base_url.is_empty() {
            return Err(PipelineError::config("Completion base URL cannot be empty").into());
        }

        if self.routing.base_url.is_empty() {
            return Err(PipelineError::config("Routing base URL cannot be empty").into());
        }

        if self.completion.max_tokens == 0 || self.completion.max_tokens > 4096 {
            return Err(PipelineError::config(
                "Completion max tokens must be between 1 and 4096",
            )
            .into());
        }

        for (name, timeout) in [
            ("Completion", self.completion.timeout_seconds),
            ("Routing", self.routing.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(PipelineError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds"
                ))
                .into());
            }
        }

        for (name, retries) in [
            ("Completion", self.completion.max_retries),
            ("Routing", self.routing.max_retries),
        ] {
            if retries > 10 {
                return Err(PipelineError::config(format!(
                    "{name} max retries cannot exceed 10"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.completion.max_tokens, 500);
        assert_eq!(config.routing.base_url, "https://router.project-osrm.org");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = PipelineConfig::default();
        config.completion.api_key = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_timeout_rejected() {
        let mut config = PipelineConfig::default();
        config.routing.timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = PipelineConfig::default();
        config.completion.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let mut config = PipelineConfig::default();
        config.completion.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let mut config = PipelineConfig::default();
        config.routing.max_retries = 11;
        assert!(config.validate().is_err());
    }
}
