//! Main supply sizing with a diversity factor.

use serde::Serialize;

use super::rules::{load_current, select_rating, MAX_RATING};
use crate::panel::types::{LoadGroup, DEFAULT_DIVERSITY_FACTOR};

/// Ratings available for the incoming main breaker.
pub const MAIN_SERIES: [u32; 5] = [25, 32, 40, 50, 63];

/// Ratings available for a standalone RCCB.
pub const RCCB_SERIES: [u32; 3] = [25, 40, 63];

/// Design current never drops below this, however light the load.
pub const MIN_DESIGN_AMPS: f64 = 25.0;

/// Derivation of the main supply rating, kept for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplySizing {
    pub total_power_kw: f64,
    pub total_amps: f64,
    pub diversity_factor: f64,
    pub design_amps: f64,
    pub main_amps: u32,
}

impl SupplySizing {
    /// Rating of the voltage relay placed after the main breaker.
    pub fn relay_amps(&self) -> u32 {
        relay_amperage(self.main_amps)
    }

    /// Rating of an upstream RCCB covering the main breaker.
    pub fn rccb_amps(&self) -> u32 {
        select_rating(&RCCB_SERIES, f64::from(self.main_amps))
    }
}

/// Clamp a diversity factor into (0, 1], substituting the default for
/// values that cannot be used.
pub fn effective_diversity(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor.min(1.0)
    } else {
        DEFAULT_DIVERSITY_FACTOR
    }
}

/// Size the main supply for `groups`.
///
/// An empty panel gets a 63A main so an unconfigured board is never
/// under-sized.
pub fn size_main_supply(groups: &[LoadGroup], diversity_factor: f64) -> SupplySizing {
    let diversity_factor = effective_diversity(diversity_factor);
    let total_power_kw: f64 = groups
        .iter()
        .map(|g| if g.power_kw.is_finite() && g.power_kw > 0.0 { g.power_kw } else { 0.0 })
        .sum();
    let total_amps = load_current(total_power_kw);

    let design_amps = if total_power_kw > 0.0 {
        (total_amps * diversity_factor).max(MIN_DESIGN_AMPS)
    } else {
        MIN_DESIGN_AMPS
    };

    let main_amps = if groups.is_empty() {
        MAX_RATING
    } else {
        select_rating(&MAIN_SERIES, design_amps)
    };

    SupplySizing {
        total_power_kw,
        total_amps,
        diversity_factor,
        design_amps,
        main_amps,
    }
}

/// Voltage relays come in 40A and 63A.
pub fn relay_amperage(main_amps: u32) -> u32 {
    if main_amps <= 40 {
        40
    } else {
        63
    }
}
