//! Polyline representation for leg geometries.
//!
//! This module provides a type for working with polylines as decoded
//! coordinate sequences, plus decoding of the compact encoded-polyline
//! format the routing provider returns. Decoding happens at the boundary;
//! internal processing only sees coordinate points.

use serde::{Deserialize, Serialize};

use crate::traits::Coord;

/// A polyline representing a leg geometry as decoded coordinates.
///
/// Stores latitude/longitude points directly for internal processing and
/// for handing to the (external) map rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coord>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<Coord>) -> Self {
        Self { points }
    }

    /// Two-point straight segment, used when road geometry is unavailable.
    pub fn straight(from: Coord, to: Coord) -> Self {
        Self::new(vec![from, to])
    }

    /// Decodes the encoded-polyline format (5 decimal digit precision).
    ///
    /// Returns `None` when the input is truncated or malformed.
    pub fn from_encoded(encoded: &str) -> Option<Self> {
        let bytes = encoded.as_bytes();
        let mut points = Vec::new();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;

        while index < bytes.len() {
            lat += decode_value(bytes, &mut index)?;
            lng += decode_value(bytes, &mut index)?;
            points.push((lat as f64 / 1e5, lng as f64 / 1e5));
        }

        Some(Self::new(points))
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coord> {
        self.points
    }
}

/// Decodes one zigzag-encoded varint starting at `index`.
fn decode_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = i64::from(*bytes.get(*index)?).checked_sub(63)?;
        if byte < 0 {
            return None;
        }
        *index += 1;
        // A valid value fits in far fewer chunks than i64 has bits; an
        // overlong chunk sequence is corrupt input, not a bigger number.
        if shift > 63 {
            return None;
        }
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }
    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
