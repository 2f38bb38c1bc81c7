//! Provider seams for the route resolution engine.
//!
//! These are intentionally minimal. Concrete HTTP adapters live in
//! [`crate::geocode`] and [`crate::osrm`]; tests substitute deterministic
//! in-memory implementations.

use thiserror::Error;

use crate::polyline::Polyline;

/// (latitude, longitude) pair.
pub type Coord = (f64, f64);

/// Successful outcome of a single provider geocoding attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub latitude: f64,
    pub longitude: f64,
    /// Canonical address string as formatted by the provider.
    pub formatted_address: String,
}

/// Failure of one outbound provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider rejected the request due to rate limiting (HTTP 429).
    #[error("provider rate limited the request")]
    RateLimited,

    /// Transport-level failure (connect, timeout, non-success HTTP status).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The provider answered but had no result for the query.
    #[error("provider returned no result")]
    NoResult,

    /// The provider answered with a non-success application status.
    #[error("provider returned status {0}")]
    Status(String),
}

impl ProviderError {
    /// Transient failures are worth retrying; permanent ones are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::RateLimited | ProviderError::Transport(_))
    }
}

/// Resolves one free-text address to a coordinate.
///
/// A single attempt per address; the caller decides what to do with
/// unresolved ones.
pub trait GeocodeProvider {
    fn geocode(&self, query: &str) -> Result<GeocodedPlace, ProviderError>;
}

/// Road-network queries for a single leg between two coordinates.
pub trait LegProvider {
    /// Driving distance in meters.
    fn road_distance(&self, from: Coord, to: Coord) -> Result<f64, ProviderError>;

    /// Drawable geometry for the leg.
    fn road_geometry(&self, from: Coord, to: Coord) -> Result<Polyline, ProviderError>;
}

impl<P: LegProvider + ?Sized> LegProvider for &P {
    fn road_distance(&self, from: Coord, to: Coord) -> Result<f64, ProviderError> {
        (**self).road_distance(from, to)
    }

    fn road_geometry(&self, from: Coord, to: Coord) -> Result<Polyline, ProviderError> {
        (**self).road_geometry(from, to)
    }
}
