//! Address geocoding with plausibility filtering.
//!
//! Wraps any [`GeocodeProvider`] with the filters that make raw provider
//! answers safe to route through: a country qualifier on the query, rejection
//! of the provider's unknown-location centroid, and an optional latitude band
//! for deployments that serve a known sub-region.

use serde::Deserialize;
use tracing::warn;

use crate::stop::RejectionReason;
use crate::traits::{Coord, GeocodeProvider, GeocodedPlace, ProviderError};

/// Coordinate the provider returns when it cannot confidently resolve an
/// address: the national centroid of Brazil.
pub const UNKNOWN_LOCATION_CENTROID: Coord = (-14.235004, -51.92528);

/// Filtering configuration applied on top of the raw provider.
#[derive(Debug, Clone)]
pub struct GeocodeFilter {
    /// Appended to queries that do not already mention it, to bias results
    /// to the expected national region.
    pub country_qualifier: String,
    /// The provider's unknown-location coordinate; results this close to it
    /// are rejected as generic.
    pub generic_centroid: Coord,
    /// Per-axis tolerance in degrees around the generic centroid.
    pub centroid_tolerance_deg: f64,
    /// Accepted latitude band `(min, max)`; `None` disables the regional
    /// filter. Guards against street-name collisions across distant states.
    pub lat_band: Option<(f64, f64)>,
}

impl Default for GeocodeFilter {
    fn default() -> Self {
        Self {
            country_qualifier: "Brasil".to_string(),
            generic_centroid: UNKNOWN_LOCATION_CENTROID,
            centroid_tolerance_deg: 0.75,
            lat_band: None,
        }
    }
}

/// Resolves free-text addresses through a provider, applying the configured
/// filters. One provider attempt per address, no retry.
#[derive(Debug, Clone)]
pub struct Geocoder<P> {
    provider: P,
    filter: GeocodeFilter,
}

impl<P: GeocodeProvider> Geocoder<P> {
    pub fn new(provider: P, filter: GeocodeFilter) -> Self {
        Self { provider, filter }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve one raw address to a validated place.
    ///
    /// Any provider failure maps to [`RejectionReason::NotFound`]; the
    /// plausibility and regional filters produce the other rejections.
    pub fn resolve(&self, raw_address: &str) -> Result<GeocodedPlace, RejectionReason> {
        let query = self.qualified_query(raw_address);
        let place = match self.provider.geocode(&query) {
            Ok(place) => place,
            Err(err) => {
                warn!(address = raw_address, error = %err, "geocoding failed");
                return Err(RejectionReason::NotFound);
            }
        };

        if self.is_generic_centroid((place.latitude, place.longitude)) {
            warn!(
                address = raw_address,
                "geocoder returned the unknown-location centroid"
            );
            return Err(RejectionReason::Generic);
        }

        if let Some((min_lat, max_lat)) = self.filter.lat_band {
            if place.latitude < min_lat || place.latitude > max_lat {
                warn!(
                    address = raw_address,
                    latitude = place.latitude,
                    "geocoded outside the expected region"
                );
                return Err(RejectionReason::OutOfRegion);
            }
        }

        Ok(place)
    }

    fn qualified_query(&self, raw_address: &str) -> String {
        let qualifier = &self.filter.country_qualifier;
        if qualifier.is_empty()
            || raw_address
                .to_lowercase()
                .contains(&qualifier.to_lowercase())
        {
            raw_address.to_string()
        } else {
            format!("{}, {}", raw_address.trim_end().trim_end_matches(','), qualifier)
        }
    }

    fn is_generic_centroid(&self, location: Coord) -> bool {
        let (centroid_lat, centroid_lng) = self.filter.generic_centroid;
        let tolerance = self.filter.centroid_tolerance_deg;
        (location.0 - centroid_lat).abs() <= tolerance
            && (location.1 - centroid_lng).abs() <= tolerance
    }
}

/// Google Geocoding API configuration.
#[derive(Debug, Clone)]
pub struct GoogleGeocodeConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl GoogleGeocodeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            api_key: api_key.into(),
            timeout_secs: 5,
        }
    }
}

/// Blocking HTTP client for the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocodeClient {
    config: GoogleGeocodeConfig,
    client: reqwest::blocking::Client,
}

impl GoogleGeocodeClient {
    pub fn new(config: GoogleGeocodeConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl GeocodeProvider for GoogleGeocodeClient {
    fn geocode(&self, query: &str) -> Result<GeocodedPlace, ProviderError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("address", query), ("key", self.config.api_key.as_str())])
            .send()?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        let body: GeocodeResponse = response.error_for_status()?.json()?;
        match body.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(ProviderError::NoResult),
            other => return Err(ProviderError::Status(other.to_string())),
        }

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or(ProviderError::NoResult)?;

        Ok(GeocodedPlace {
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
            formatted_address: result.formatted_address,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: GeocodeLocation,
}

#[derive(Debug, Deserialize)]
struct GeocodeLocation {
    lat: f64,
    lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverCalled;

    impl GeocodeProvider for NeverCalled {
        fn geocode(&self, _query: &str) -> Result<GeocodedPlace, ProviderError> {
            Err(ProviderError::NoResult)
        }
    }

    fn geocoder(filter: GeocodeFilter) -> Geocoder<NeverCalled> {
        Geocoder::new(NeverCalled, filter)
    }

    #[test]
    fn test_query_gains_country_qualifier() {
        let g = geocoder(GeocodeFilter::default());
        assert_eq!(
            g.qualified_query("Rua das Flores, 123 - Curitiba"),
            "Rua das Flores, 123 - Curitiba, Brasil"
        );
    }

    #[test]
    fn test_query_keeps_existing_qualifier() {
        let g = geocoder(GeocodeFilter::default());
        assert_eq!(
            g.qualified_query("Av. Paulista, 1000 - São Paulo, brasil"),
            "Av. Paulista, 1000 - São Paulo, brasil"
        );
    }

    #[test]
    fn test_query_trailing_comma_trimmed() {
        let g = geocoder(GeocodeFilter::default());
        assert_eq!(g.qualified_query("Praça Sete, "), "Praça Sete, Brasil");
    }

    #[test]
    fn test_centroid_detection_within_tolerance() {
        let g = geocoder(GeocodeFilter::default());
        assert!(g.is_generic_centroid(UNKNOWN_LOCATION_CENTROID));
        assert!(g.is_generic_centroid((-14.5, -51.5)));
        assert!(!g.is_generic_centroid((-23.55, -46.63)));
    }
}
