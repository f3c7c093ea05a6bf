//! Outbound request construction
//!
//! Deterministic, side-effect-free transformation of typed input into the
//! payloads sent to the external services: a natural-language prompt for the
//! completion endpoint and a routing URL for the routing endpoint.

use crate::models::{RouteQuery, TrafficObservation};
use crate::Result;

/// Build the analysis prompt for a traffic observation
///
/// Both numeric readings are embedded literally so the model sees the exact
/// values entered by the operator.
pub fn build_recommendation_prompt(observation: &TrafficObservation) -> Result<String> {
    observation.validate()?;

    Ok(format!(
        "Analyze the following real-time traffic data and provide recommendations:\n\
         Congestion Level: {}%\n\
         Accidents Reported: {}\n",
        observation.congestion_percent, observation.accidents_reported
    ))
}

/// Build the routing request URL for a start/end query
///
/// The routing endpoint expects `longitude,latitude` pairs, the reverse of
/// the latitude-first convention used everywhere else in this crate. The
/// swap happens here and nowhere else on the request side.
pub fn build_route_url(base_url: &str, query: &RouteQuery) -> Result<String> {
    query.validate()?;

    Ok(format!(
        "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
        base_url.trim_end_matches('/'),
        query.start.longitude,
        query.start.latitude,
        query.end.longitude,
        query.end.latitude
    ))
}
