//! Fuel and monetary cost summary for a completed route.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Vehicle fuel parameters supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelParams {
    /// Kilometers driven per liter of fuel. Must be positive and finite.
    pub consumption_km_per_liter: f64,
    /// Fuel price per liter in the caller's currency.
    pub price_per_liter: f64,
}

impl Default for FuelParams {
    fn default() -> Self {
        Self {
            consumption_km_per_liter: 10.0,
            price_per_liter: 6.0,
        }
    }
}

impl FuelParams {
    /// Rejects degenerate configuration before any cost is derived.
    pub fn validate(&self) -> Result<()> {
        if !self.consumption_km_per_liter.is_finite() || self.consumption_km_per_liter <= 0.0 {
            return Err(Error::InvalidConsumption {
                rate: self.consumption_km_per_liter,
            });
        }
        Ok(())
    }
}

/// Derived totals for a completed route. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub km: f64,
    pub liters: f64,
    pub cost: f64,
}

/// Converts accumulated distance into fuel volume and monetary cost.
pub fn summarize(total_meters: f64, params: &FuelParams) -> Result<RouteSummary> {
    params.validate()?;

    let km = total_meters / 1000.0;
    let liters = km / params.consumption_km_per_liter;
    Ok(RouteSummary {
        km,
        liters,
        cost: liters * params.price_per_liter,
    })
}
