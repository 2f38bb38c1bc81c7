//! delivery-router core engine
//!
//! Resolves free-text postal addresses to validated coordinates, obtains
//! road-network travel distances with straight-line fallbacks, and sequences
//! an unordered set of stops into a single-vehicle round trip annotated with
//! fuel cost and a shareable navigation link.

pub mod cost;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod haversine;
pub mod link;
pub mod oracle;
pub mod osrm;
pub mod polyline;
pub mod solver;
pub mod stop;
pub mod traits;
