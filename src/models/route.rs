//! Route models for geographic coordinates, queries, and outcomes

use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::Result;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that the coordinate is a finite point on the globe
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(PipelineError::invalid_input(format!(
                "Coordinates must be finite numbers, got ({}, {})",
                self.latitude, self.longitude
            )));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PipelineError::invalid_input(format!(
                "Latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PipelineError::invalid_input(format!(
                "Longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }

        Ok(())
    }

    /// Format coordinate as a latitude, longitude string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Start and end points of a route request
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RouteQuery {
    /// Create a new route query
    #[must_use]
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// Check that both endpoints are valid coordinates
    pub fn validate(&self) -> Result<()> {
        self.start.validate()?;
        self.end.validate()?;
        Ok(())
    }
}

/// Outcome of a route lookup
///
/// `NoRoute` is a valid, expected outcome when the remote service processed
/// the request but found no path between the endpoints. It is not a fault.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum RouteResult {
    /// Ordered path from start to end, latitude first
    Route(Vec<Coordinate>),
    /// The service found no route between the endpoints
    NoRoute,
}

impl RouteResult {
    /// Whether the lookup came back without a route
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        matches!(self, RouteResult::NoRoute)
    }

    /// The path coordinates, if a route was found
    #[must_use]
    pub fn points(&self) -> Option<&[Coordinate]> {
        match self {
            RouteResult::Route(points) => Some(points),
            RouteResult::NoRoute => None,
        }
    }

    /// Total path length in kilometers, if a route was found
    #[must_use]
    pub fn path_length_km(&self) -> Option<f64> {
        let points = self.points()?;

        let length = points
            .windows(2)
            .map(|pair| {
                let from = HaversineLocation {
                    latitude: pair[0].latitude,
                    longitude: pair[0].longitude,
                };
                let to = HaversineLocation {
                    latitude: pair[1].latitude,
                    longitude: pair[1].longitude,
                };
                distance(from, to, Units::Kilometers)
            })
            .sum();

        Some(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let coordinate = Coordinate::new(28.6024, -81.2001);
        assert!(coordinate.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        assert!(Coordinate::new(91.0, 0.0).validate().is_err());
        assert!(Coordinate::new(-91.0, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, 181.0).validate().is_err());
        assert!(Coordinate::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert!(Coordinate::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_query_validates_both_endpoints() {
        let query = RouteQuery::new(Coordinate::new(28.6024, -81.2001), Coordinate::new(95.0, 0.0));
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_no_route_has_no_points() {
        let result = RouteResult::NoRoute;
        assert!(result.is_no_route());
        assert!(result.points().is_none());
        assert!(result.path_length_km().is_none());
    }

    #[test]
    fn test_path_length() {
        // One degree of longitude along the equator is roughly 111 km
        let result = RouteResult::Route(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
        ]);

        let length = result.path_length_km().unwrap();
        assert!(
            (110.0..113.0).contains(&length),
            "unexpected path length: {length}"
        );
    }
}
