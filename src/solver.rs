//! Route sequencing heuristics.
//!
//! Greedy single-vehicle construction: an optional farthest-first seed pass
//! followed by a nearest-neighbor main loop, closed back to the base. The
//! loop strictly shrinks the remaining set, so it terminates in exactly
//! `|remaining|` iterations; a chosen stop is never reconsidered.
//!
//! Complexity is O(n²) oracle calls, acceptable for delivery-route sizes
//! (tens of stops).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::oracle::{DistanceOracle, LegSource, ResolvedDistance, ResolvedGeometry};
use crate::stop::Stop;
use crate::traits::LegProvider;

/// How the next stop is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceStrategy {
    /// Always drive to the closest unvisited stop.
    NearestNeighbor,
    /// Drive to the farthest stop first, then work back toward the base
    /// with nearest-neighbor.
    FarthestFirstSeed,
}

/// One directed edge of the final route, with its resolved distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: u32,
    pub to: u32,
    pub meters: f64,
    /// Source of the distance value.
    pub source: LegSource,
    /// Drawable geometry, populated on demand for the rendering layer.
    pub geometry: Option<ResolvedGeometry>,
}

/// An ordered route. The base is the first stop; the final leg returns to it
/// without duplicating it in `stops`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencedRoute {
    pub stops: Vec<Stop>,
    /// One leg per consecutive stop pair plus the closing return-to-base leg.
    pub legs: Vec<Leg>,
    pub total_meters: f64,
}

/// Orders `stops` into a round trip from `base`.
///
/// Every stop handed in ends up in the route exactly once; the oracle never
/// fails, so no stop is ever dropped here.
pub fn sequence<P: LegProvider>(
    base: Stop,
    stops: Vec<Stop>,
    oracle: &DistanceOracle<P>,
    strategy: SequenceStrategy,
) -> SequencedRoute {
    let mut remaining = stops;
    let mut route = vec![base.clone()];
    let mut legs: Vec<Leg> = Vec::with_capacity(remaining.len() + 1);
    let mut current = base.clone();

    if strategy == SequenceStrategy::FarthestFirstSeed && !remaining.is_empty() {
        let selected = select_stop(&current, &remaining, oracle, |candidate, best| {
            candidate.meters > best.meters
        });
        let (index, distance) = selected;
        let next = remaining.remove(index);
        debug!(stop = next.id, meters = distance.meters, "farthest-first seed selected");
        legs.push(leg(&current, &next, distance));
        route.push(next.clone());
        current = next;
    }

    while !remaining.is_empty() {
        let (index, distance) = select_stop(&current, &remaining, oracle, |candidate, best| {
            candidate.meters < best.meters
        });
        let next = remaining.remove(index);
        legs.push(leg(&current, &next, distance));
        route.push(next.clone());
        current = next;
    }

    // Close the loop back to the base; the base is not repeated in `stops`.
    let closing = oracle.distance(current.location(), base.location());
    legs.push(leg(&current, &base, closing));

    let total_meters = legs.iter().map(|l| l.meters).sum();
    SequencedRoute {
        stops: route,
        legs,
        total_meters,
    }
}

/// Scans `remaining` and returns the index and distance of the stop winning
/// under `prefer` (ties broken by first-seen order).
///
/// `remaining` must be non-empty. The first candidate always seeds the
/// selection, so a winner exists even if `prefer` never fires; the sequencer
/// can therefore never hang on a selection pass.
fn select_stop<P: LegProvider>(
    current: &Stop,
    remaining: &[Stop],
    oracle: &DistanceOracle<P>,
    prefer: impl Fn(&ResolvedDistance, &ResolvedDistance) -> bool,
) -> (usize, ResolvedDistance) {
    let mut best: Option<(usize, ResolvedDistance)> = None;
    for (index, stop) in remaining.iter().enumerate() {
        let candidate = oracle.distance(current.location(), stop.location());
        let wins = best
            .as_ref()
            .is_none_or(|(_, current_best)| prefer(&candidate, current_best));
        if wins {
            best = Some((index, candidate));
        }
    }
    // Forced selection: unreachable with a non-empty `remaining`, kept so the
    // caller's loop is guaranteed to make progress.
    best.unwrap_or_else(|| {
        (
            0,
            oracle.distance(current.location(), remaining[0].location()),
        )
    })
}

fn leg(from: &Stop, to: &Stop, distance: ResolvedDistance) -> Leg {
    Leg {
        from: from.id,
        to: to.id,
        meters: distance.meters,
        source: distance.source,
        geometry: None,
    }
}
