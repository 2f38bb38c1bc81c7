//! Stop domain types.

use serde::{Deserialize, Serialize};

use crate::traits::Coord;

/// Geocoding outcome recorded on each stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Pending,
    Resolved,
    RejectedGeneric,
    RejectedOutOfRegion,
    RejectedNotFound,
}

/// Why an address could not be resolved to a usable coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// Provider returned its unknown-location centroid.
    Generic,
    /// Coordinate fell outside the configured latitude band.
    OutOfRegion,
    /// Provider failed or had no result.
    NotFound,
}

impl From<RejectionReason> for ValidationStatus {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::Generic => ValidationStatus::RejectedGeneric,
            RejectionReason::OutOfRegion => ValidationStatus::RejectedOutOfRegion,
            RejectionReason::NotFound => ValidationStatus::RejectedNotFound,
        }
    }
}

/// One delivery stop. Created per input address, mutated only during
/// geocoding, then treated as read-only by the sequencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub id: u32,
    pub raw_address: String,
    /// Canonical address from the geocoding provider, when available.
    pub resolved_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ValidationStatus,
}

impl Stop {
    pub fn resolved(
        id: u32,
        raw_address: impl Into<String>,
        resolved_address: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            raw_address: raw_address.into(),
            resolved_address,
            latitude,
            longitude,
            status: ValidationStatus::Resolved,
        }
    }

    pub fn location(&self) -> Coord {
        (self.latitude, self.longitude)
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ValidationStatus::Resolved
    }
}
