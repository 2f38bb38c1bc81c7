//! End-to-end route planning pipeline.
//!
//! Pure orchestration from `(addresses, options)` to a [`RoutePlan`]: no
//! global state, a fresh plan per call. Session/caching lifecycle belongs to
//! the caller (UI layer), not here.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::cost::{FuelParams, RouteSummary, summarize};
use crate::error::{Error, Result};
use crate::geocode::Geocoder;
use crate::link::navigation_link;
use crate::oracle::DistanceOracle;
use crate::solver::{Leg, SequenceStrategy, SequencedRoute, sequence};
use crate::stop::{RejectionReason, Stop};
use crate::traits::{Coord, GeocodeProvider, LegProvider};

/// One caller-supplied input address. May already carry a coordinate from a
/// previous run, in which case geocoding is skipped.
#[derive(Debug, Clone)]
pub struct Address {
    pub raw: String,
    pub coords: Option<Coord>,
}

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            coords: None,
        }
    }

    pub fn with_coords(raw: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            raw: raw.into(),
            coords: Some((latitude, longitude)),
        }
    }
}

/// An input address dropped from the working set, for the operator report.
#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedAddress {
    pub raw_address: String,
    pub reason: RejectionReason,
}

/// Per-run configuration.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub strategy: SequenceStrategy,
    pub fuel: FuelParams,
    /// Fetch drawable geometry for each leg after sequencing.
    pub fetch_geometry: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            strategy: SequenceStrategy::NearestNeighbor,
            fuel: FuelParams::default(),
            fetch_geometry: false,
        }
    }
}

/// A completed plan: ordered stops, resolved legs, totals, and the
/// addresses that had to be dropped.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub stops: Vec<Stop>,
    pub legs: Vec<Leg>,
    pub total_meters: f64,
    pub summary: RouteSummary,
    pub link: String,
    pub warnings: Vec<UnresolvedAddress>,
}

/// Builds a round-trip delivery route from raw addresses.
///
/// The first resolved address is the base. Unresolved addresses are dropped
/// and reported in `warnings`; fewer than two resolved stops is an error
/// rather than a degenerate one-stop route.
pub fn plan_route<G, P>(
    addresses: &[Address],
    geocoder: &Geocoder<G>,
    oracle: &DistanceOracle<P>,
    options: &PlanOptions,
) -> Result<RoutePlan>
where
    G: GeocodeProvider,
    P: LegProvider,
{
    // Degenerate configuration is rejected before any network work.
    options.fuel.validate()?;

    let mut resolved: Vec<Stop> = Vec::with_capacity(addresses.len());
    let mut warnings: Vec<UnresolvedAddress> = Vec::new();

    for (index, address) in addresses.iter().enumerate() {
        let id = index as u32;
        if let Some((latitude, longitude)) = address.coords {
            resolved.push(Stop::resolved(
                id,
                address.raw.clone(),
                None,
                latitude,
                longitude,
            ));
            continue;
        }

        match geocoder.resolve(&address.raw) {
            Ok(place) => resolved.push(Stop::resolved(
                id,
                address.raw.clone(),
                Some(place.formatted_address),
                place.latitude,
                place.longitude,
            )),
            Err(reason) => warnings.push(UnresolvedAddress {
                raw_address: address.raw.clone(),
                reason,
            }),
        }
    }

    if resolved.len() < 2 {
        return Err(Error::InsufficientStops {
            resolved: resolved.len(),
        });
    }

    let base = resolved.remove(0);
    let mut route = sequence(base, resolved, oracle, options.strategy);

    if options.fetch_geometry {
        attach_geometry(&mut route, oracle);
    }

    let summary = summarize(route.total_meters, &options.fuel)?;
    let link = navigation_link(&route.stops);

    info!(
        stops = route.stops.len(),
        total_meters = route.total_meters,
        unresolved = warnings.len(),
        "route plan complete"
    );

    Ok(RoutePlan {
        stops: route.stops,
        legs: route.legs,
        total_meters: route.total_meters,
        summary,
        link,
        warnings,
    })
}

/// Fetches drawable geometry for every leg, for the rendering layer.
fn attach_geometry<P: LegProvider>(route: &mut SequencedRoute, oracle: &DistanceOracle<P>) {
    let locations: HashMap<u32, Coord> = route
        .stops
        .iter()
        .map(|stop| (stop.id, stop.location()))
        .collect();

    for leg in &mut route.legs {
        if let (Some(&from), Some(&to)) = (locations.get(&leg.from), locations.get(&leg.to)) {
            leg.geometry = Some(oracle.geometry(from, to));
        }
    }
}
