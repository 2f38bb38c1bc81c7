//! Multi-stop navigation link for external mapping applications.

use crate::stop::Stop;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir";

/// Serializes the ordered stop list into a directions URL visiting every
/// stop in order and returning to the first.
///
/// Produces `stops.len() + 1` coordinate segments (the closing return to
/// the base).
pub fn navigation_link(stops: &[Stop]) -> String {
    let mut segments: Vec<String> = stops.iter().map(segment).collect();
    if let Some(base) = stops.first() {
        segments.push(segment(base));
    }
    format!("{}/{}", DIRECTIONS_BASE, segments.join("/"))
}

fn segment(stop: &Stop) -> String {
    format!("{:.6},{:.6}", stop.latitude, stop.longitude)
}
