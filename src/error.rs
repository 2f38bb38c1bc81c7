use thiserror::Error;

/// Convenient result alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level engine error type.
///
/// Provider failures never appear here: distance and geometry queries always
/// degrade to straight-line fallbacks, and geocode rejections are reported as
/// per-address warnings. Only conditions that make the whole route impossible
/// are errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Route generation needs at least two resolved stops (base + one).
    #[error("insufficient valid stops to build a route: {resolved} resolved, need at least 2")]
    InsufficientStops { resolved: usize },

    /// Fuel consumption must be a positive, finite km-per-liter rate.
    #[error("invalid fuel consumption rate: {rate} km/L")]
    InvalidConsumption { rate: f64 },

    /// Wrapper for HTTP client construction errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
