//! Electrical sizing and protection rules.
//!
//! - **rules**: circuit breaker rating and cable cross-section per load
//! - **supply**: main breaker rating from the total load and diversity factor
//! - **protection**: requested vs. effective residual-current arrangement
//!
//! Everything here is a pure function of its inputs and assumes a 230V
//! single-phase supply.

mod protection;
mod rules;
mod supply;

pub use protection::{
    circuit_rcd_toggle_enabled, default_rcd_request, effective_mode, needs_circuit_rcd,
    ProtectionPlan, MAIN_RCD_MAX_AMPS, RESIDUAL_TRIP_MA,
};
pub use rules::{
    breaker_amperage, cable_size, load_current, select_rating, BREAKER_SERIES, MAX_RATING,
    SUPPLY_VOLTAGE,
};
pub use supply::{
    effective_diversity, relay_amperage, size_main_supply, SupplySizing, MAIN_SERIES,
    MIN_DESIGN_AMPS, RCCB_SERIES,
};
