//! OSRM HTTP adapter for per-leg road distance and geometry.

use serde::Deserialize;

use crate::polyline::Polyline;
use crate::traits::{Coord, LegProvider, ProviderError};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("delivery-router/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// OSRM expects `lng,lat` pairs in the path.
    fn route_url(&self, from: Coord, to: Coord, query: &str) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?{}",
            self.config.base_url, self.config.profile, from.1, from.0, to.1, to.0, query
        )
    }

    fn fetch(&self, url: &str) -> Result<OsrmRouteResponse, ProviderError> {
        let response = self.client.get(url).send()?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        let body: OsrmRouteResponse = response.error_for_status()?.json()?;
        if body.code != "Ok" {
            return Err(ProviderError::Status(body.code));
        }

        Ok(body)
    }
}

impl LegProvider for OsrmClient {
    fn road_distance(&self, from: Coord, to: Coord) -> Result<f64, ProviderError> {
        let url = self.route_url(from, to, "overview=false");
        let body = self.fetch(&url)?;
        body.routes
            .first()
            .map(|route| route.distance)
            .ok_or(ProviderError::NoResult)
    }

    fn road_geometry(&self, from: Coord, to: Coord) -> Result<Polyline, ProviderError> {
        let url = self.route_url(from, to, "overview=full&geometries=polyline");
        let body = self.fetch(&url)?;
        let encoded = body
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.geometry)
            .ok_or(ProviderError::NoResult)?;

        Polyline::from_encoded(&encoded)
            .ok_or_else(|| ProviderError::Status("unparseable geometry".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    geometry: Option<String>,
}
