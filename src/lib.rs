//! `TrafficAI` - Route retrieval and incident recommendation pipeline
//!
//! This library provides the core request/response utilities behind traffic
//! management and disaster response tooling: building outbound requests from
//! operational inputs, querying external routing and language-model
//! endpoints with bounded timeouts and capped retries, and normalizing the
//! responses into typed results.

pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod request;

// Re-export core types for public API
pub use api::{CompletionClient, RoutingClient};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use history::{History, RecommendationRecord};
pub use models::{Coordinate, Recommendation, RouteQuery, RouteResult, TrafficObservation};
pub use request::{build_recommendation_prompt, build_route_url};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PipelineError>;
