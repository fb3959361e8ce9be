//! Breaker and cable sizing for individual circuits.

use crate::panel::types::LoadCategory;

/// Nominal single-phase supply voltage.
pub const SUPPLY_VOLTAGE: f64 = 230.0;

/// Standard circuit breaker ratings in amperes.
pub const BREAKER_SERIES: [u32; 8] = [10, 16, 20, 25, 32, 40, 50, 63];

/// Largest rating in any series; also the fallback when a load exceeds it.
pub const MAX_RATING: u32 = 63;

const SOCKET_FLOOR: u32 = 16;
const LIGHTING_FLOOR: u32 = 10;

/// Load current in amperes for a single-phase load of `power_kw`.
///
/// Negative or non-finite power counts as no load.
pub fn load_current(power_kw: f64) -> f64 {
    if !power_kw.is_finite() || power_kw <= 0.0 {
        return 0.0;
    }
    power_kw * 1000.0 / SUPPLY_VOLTAGE
}

/// Smallest rating in `series` that covers `amps`, or [`MAX_RATING`].
pub fn select_rating(series: &[u32], amps: f64) -> u32 {
    series
        .iter()
        .copied()
        .find(|&s| f64::from(s) >= amps)
        .unwrap_or(MAX_RATING)
}

/// Breaker rating for a circuit.
///
/// The category floor is applied after series selection: sockets never go
/// below 16A and lighting never below 10A.
pub fn breaker_amperage(power_kw: f64, category: LoadCategory) -> u32 {
    let recommended = select_rating(&BREAKER_SERIES, load_current(power_kw));
    match category {
        LoadCategory::Socket if recommended < SOCKET_FLOOR => SOCKET_FLOOR,
        LoadCategory::Lighting if recommended < LIGHTING_FLOOR => LIGHTING_FLOOR,
        _ => recommended,
    }
}

/// Recommended copper cross-section for a breaker rating.
pub fn cable_size(amps: u32) -> &'static str {
    match amps {
        0..=10 => "1.5mm²",
        11..=16 => "2.5mm²",
        17..=25 => "4.0mm²",
        26..=32 => "6.0mm²",
        33..=40 => "10.0mm²",
        _ => "16.0mm²",
    }
}
