//! HTTP clients for the routing and completion endpoints
//!
//! Both clients share the same transport stack: a timeout-bounded reqwest
//! client wrapped in retry middleware with exponential backoff. Transient
//! faults (connection errors, timeouts, 5xx, 429) are retried up to the
//! configured cap; everything that survives the retries is normalized into
//! the pipeline error taxonomy.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::models::{Coordinate, Recommendation, RouteResult};
use crate::Result;

const USER_AGENT: &str = concat!("trafficai/", env!("CARGO_PKG_VERSION"));

/// Build the shared transport: bounded timeout plus capped retry with backoff
fn build_http_client(timeout_seconds: u32, max_retries: u32) -> Result<ClientWithMiddleware> {
    let client = Client::builder()
        .timeout(Duration::from_secs(u64::from(timeout_seconds)))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| PipelineError::config(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(500), Duration::from_secs(30))
        .build_with_max_retries(max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Normalize a transport-level failure into the pipeline taxonomy
fn send_error(service: &str, err: &reqwest_middleware::Error) -> PipelineError {
    match err {
        reqwest_middleware::Error::Reqwest(inner) if inner.is_timeout() => {
            PipelineError::unavailable(format!("{service} request timed out"))
        }
        reqwest_middleware::Error::Reqwest(inner) if inner.is_connect() => {
            PipelineError::unavailable(format!("{service} is unreachable: {inner}"))
        }
        _ => PipelineError::unavailable(format!("{service} request failed: {err}")),
    }
}

/// Map a non-success status (after retries are exhausted) to a typed error
fn check_status(service: &str, response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        warn!("{service} rate limit exceeded (HTTP 429), retry hint: {retry_after:?}");
        return Err(PipelineError::rate_limited(
            format!("{service} throttled the request (HTTP 429)"),
            retry_after,
        ));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(PipelineError::config(format!(
            "{service} rejected the supplied credential (HTTP {status})"
        )));
    }

    Err(PipelineError::unavailable(format!(
        "{service} returned HTTP {status}"
    )))
}

/// Client for the language-model completion endpoint
#[derive(Debug)]
pub struct CompletionClient {
    client: ClientWithMiddleware,
    base_url: String,
    model: String,
    max_tokens: u32,
    api_key: String,
}

impl CompletionClient {
    /// Create a new completion client
    ///
    /// Requires a bearer credential from configuration; the credential is
    /// never embedded in code.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let api_key = config
            .completion
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                PipelineError::config(
                    "Completion API key is not configured. \
                     Set completion.api_key or the OPENAI_API_KEY environment variable.",
                )
            })?;

        let client = build_http_client(
            config.completion.timeout_seconds,
            config.completion.max_retries,
        )?;

        Ok(Self {
            client,
            base_url: config.completion.base_url.trim_end_matches('/').to_string(),
            model: config.completion.model.clone(),
            max_tokens: config.completion.max_tokens,
            api_key,
        })
    }

    /// Request a completion for the given prompt
    ///
    /// Returns the first choice's text with surrounding whitespace removed.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn fetch_recommendation(&self, prompt: &str) -> Result<Recommendation> {
        let url = format!("{}/completions", self.base_url);
        debug!("Requesting completion from {url}");

        let request = completions::CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error("Completion service", &e))?;

        let response = check_status("Completion service", response)?;

        let body: completions::CompletionResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse completion response: {e}");
            PipelineError::malformed(format!(
                "Completion response did not match the expected schema: {e}"
            ))
        })?;

        let choice = body
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::malformed("Completion response contained no choices"))?;

        let text = choice
            .text
            .ok_or_else(|| PipelineError::malformed("Completion choice contained no text"))?;

        info!("Received completion with {} characters", text.len());
        Ok(Recommendation::new(text.trim()))
    }
}

/// Client for the routing endpoint
pub struct RoutingClient {
    client: ClientWithMiddleware,
}

impl RoutingClient {
    /// Create a new routing client
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = build_http_client(
            config.routing.timeout_seconds,
            config.routing.max_retries,
        )?;

        Ok(Self { client })
    }

    /// Fetch the route described by a prepared routing URL
    ///
    /// The response body carries coordinates as `[longitude, latitude]`
    /// pairs; they are inverted exactly once here to the latitude-first
    /// order used by the rest of the crate. A response with no routes is a
    /// valid `NoRoute` outcome, not an error.
    #[instrument(skip(self, url))]
    pub async fn fetch_route(&self, url: &str) -> Result<RouteResult> {
        debug!("Requesting route: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| send_error("Routing service", &e))?;

        let response = check_status("Routing service", response)?;

        let body: osrm::RouteResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse routing response: {e}");
            PipelineError::malformed(format!(
                "Routing response did not match the expected schema: {e}"
            ))
        })?;

        let Some(route) = body.routes.unwrap_or_default().into_iter().next() else {
            info!("Routing service reported no route");
            return Ok(RouteResult::NoRoute);
        };

        let points: Vec<Coordinate> = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[longitude, latitude]| Coordinate::new(latitude, longitude))
            .collect();

        info!("Received route with {} points", points.len());
        Ok(RouteResult::Route(points))
    }
}

/// Routing endpoint response structures
mod osrm {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct RouteResponse {
        pub routes: Option<Vec<Route>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Route {
        pub geometry: Geometry,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub coordinates: Vec<[f64; 2]>,
    }
}

/// Completion endpoint request and response structures
mod completions {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct CompletionRequest<'a> {
        pub model: &'a str,
        pub prompt: &'a str,
        pub max_tokens: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct CompletionResponse {
        pub choices: Option<Vec<CompletionChoice>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CompletionChoice {
        pub text: Option<String>,
    }
}
