//! Distance oracle: road-network queries with retry and straight-line
//! fallback.
//!
//! Both the distance and geometry paths share the same policy: retry
//! transient provider failures a bounded number of times with a pause that
//! respects the provider's implicit rate limit, then degrade to a
//! great-circle estimate. Neither operation ever fails; degraded results are
//! flagged so callers can distinguish estimated from real legs.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::haversine::haversine_meters;
use crate::polyline::Polyline;
use crate::traits::{Coord, LegProvider, ProviderError};

/// Where a resolved leg value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegSource {
    RoadNetwork,
    StraightLineFallback,
}

/// A resolved leg distance in meters. Always ≥ 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDistance {
    pub meters: f64,
    pub source: LegSource,
}

/// A resolved leg geometry for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub polyline: Polyline,
    pub source: LegSource,
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            pause: Duration::from_millis(1200),
        }
    }
}

/// Wraps a [`LegProvider`] with the retry/fallback policy.
#[derive(Debug, Clone)]
pub struct DistanceOracle<P> {
    provider: P,
    retry: RetryPolicy,
}

impl<P: LegProvider> DistanceOracle<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(provider: P, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Road-network driving distance between two coordinates, degrading to
    /// the haversine distance when the provider is unreachable.
    pub fn distance(&self, from: Coord, to: Coord) -> ResolvedDistance {
        match self.attempt(|| self.provider.road_distance(from, to)) {
            Ok(meters) => ResolvedDistance {
                meters,
                source: LegSource::RoadNetwork,
            },
            Err(err) => {
                warn!(error = %err, "road distance unavailable, using straight-line estimate");
                ResolvedDistance {
                    meters: haversine_meters(from, to),
                    source: LegSource::StraightLineFallback,
                }
            }
        }
    }

    /// Drawable geometry for a leg, degrading to the two-point straight
    /// segment when the provider is unreachable.
    pub fn geometry(&self, from: Coord, to: Coord) -> ResolvedGeometry {
        match self.attempt(|| self.provider.road_geometry(from, to)) {
            Ok(polyline) => ResolvedGeometry {
                polyline,
                source: LegSource::RoadNetwork,
            },
            Err(err) => {
                warn!(error = %err, "road geometry unavailable, using straight segment");
                ResolvedGeometry {
                    polyline: Polyline::straight(from, to),
                    source: LegSource::StraightLineFallback,
                }
            }
        }
    }

    fn attempt<T>(
        &self,
        mut call: impl FnMut() -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        let mut attempt = 1;
        loop {
            match call() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    debug!(attempt, error = %err, "transient provider failure, retrying");
                    thread::sleep(self.retry.pause);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
