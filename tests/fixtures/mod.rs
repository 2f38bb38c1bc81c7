//! Shared test fixtures: deterministic in-memory providers.
//!
//! - [`MatrixLegProvider`]: road distances from a fixed pairwise matrix
//! - [`StaticGeocoder`]: canned geocoding answers keyed by raw address
//! - [`FlakyLegProvider`]: scripted transient failures for retry tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use delivery_router::polyline::Polyline;
use delivery_router::stop::Stop;
use delivery_router::traits::{Coord, GeocodeProvider, GeocodedPlace, LegProvider, ProviderError};

pub fn location_key(location: Coord) -> String {
    format!("{:.6},{:.6}", location.0, location.1)
}

pub fn stop(id: u32, location: Coord) -> Stop {
    Stop::resolved(id, format!("stop {id}"), None, location.0, location.1)
}

/// Road distances backed by a fixed symmetric matrix. Pairs not in the
/// matrix answer `NoResult`, which exercises the straight-line fallback.
#[derive(Default)]
pub struct MatrixLegProvider {
    distances: HashMap<(String, String), f64>,
}

impl MatrixLegProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leg(mut self, from: Coord, to: Coord, meters: f64) -> Self {
        self.distances
            .insert((location_key(from), location_key(to)), meters);
        self.distances
            .insert((location_key(to), location_key(from)), meters);
        self
    }
}

impl LegProvider for MatrixLegProvider {
    fn road_distance(&self, from: Coord, to: Coord) -> Result<f64, ProviderError> {
        self.distances
            .get(&(location_key(from), location_key(to)))
            .copied()
            .ok_or(ProviderError::NoResult)
    }

    fn road_geometry(&self, from: Coord, to: Coord) -> Result<Polyline, ProviderError> {
        if self
            .distances
            .contains_key(&(location_key(from), location_key(to)))
        {
            Ok(Polyline::straight(from, to))
        } else {
            Err(ProviderError::NoResult)
        }
    }
}

/// Geocoding answers keyed by raw address; the qualified query only has to
/// start with the registered key. Records every query it receives.
#[derive(Default)]
pub struct StaticGeocoder {
    places: Vec<(String, GeocodedPlace)>,
    pub queries: RefCell<Vec<String>>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, raw: &str, latitude: f64, longitude: f64) -> Self {
        self.places.push((
            raw.to_string(),
            GeocodedPlace {
                latitude,
                longitude,
                formatted_address: format!("{raw} (formatted)"),
            },
        ));
        self
    }
}

impl GeocodeProvider for StaticGeocoder {
    fn geocode(&self, query: &str) -> Result<GeocodedPlace, ProviderError> {
        self.queries.borrow_mut().push(query.to_string());
        self.places
            .iter()
            .find(|(raw, _)| query.starts_with(raw.as_str()))
            .map(|(_, place)| place.clone())
            .ok_or(ProviderError::NoResult)
    }
}

/// Fails a scripted number of times with a transient error, then succeeds
/// with a fixed distance. Counts every call.
pub struct FlakyLegProvider {
    pub failures_before_success: u32,
    pub meters: f64,
    pub calls: RefCell<u32>,
}

impl FlakyLegProvider {
    pub fn new(failures_before_success: u32, meters: f64) -> Self {
        Self {
            failures_before_success,
            meters,
            calls: RefCell::new(0),
        }
    }

    fn call(&self) -> Result<f64, ProviderError> {
        let mut calls = self.calls.borrow_mut();
        *calls += 1;
        if *calls <= self.failures_before_success {
            Err(ProviderError::RateLimited)
        } else {
            Ok(self.meters)
        }
    }
}

impl LegProvider for FlakyLegProvider {
    fn road_distance(&self, _from: Coord, _to: Coord) -> Result<f64, ProviderError> {
        self.call()
    }

    fn road_geometry(&self, from: Coord, to: Coord) -> Result<Polyline, ProviderError> {
        self.call().map(|_| Polyline::straight(from, to))
    }
}

/// Permanent provider failure on every call.
pub struct DownLegProvider;

impl LegProvider for DownLegProvider {
    fn road_distance(&self, _from: Coord, _to: Coord) -> Result<f64, ProviderError> {
        Err(ProviderError::Status("NoRoute".to_string()))
    }

    fn road_geometry(&self, _from: Coord, _to: Coord) -> Result<Polyline, ProviderError> {
        Err(ProviderError::Status("NoRoute".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Canonical four-stop fixture used by the sequencing scenarios.
//
// Distances are a fixed matrix, deliberately unrelated to the coordinates:
//   A-B = 5000, A-C = 1000, A-D = 10000
//   B-C = 4500, B-D = 6000, C-D = 9600
// Nearest-neighbor from A gives [A, C, B, D]; farthest-first gives
// [A, D, B, C].
// ---------------------------------------------------------------------------

pub const A: Coord = (0.0, 0.0);
pub const B: Coord = (1.0, 0.0);
pub const C: Coord = (2.0, 0.0);
pub const D: Coord = (3.0, 0.0);

pub fn four_stop_matrix() -> MatrixLegProvider {
    MatrixLegProvider::new()
        .with_leg(A, B, 5000.0)
        .with_leg(A, C, 1000.0)
        .with_leg(A, D, 10000.0)
        .with_leg(B, C, 4500.0)
        .with_leg(B, D, 6000.0)
        .with_leg(C, D, 9600.0)
}
