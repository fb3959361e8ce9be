//! Residual-current protection policy.
//!
//! The requested mode is resolved once per configuration into an effective
//! mode. Module generation and the per-group RCD toggle both read the
//! effective mode, never the requested one.

use serde::Serialize;
use tracing::debug;

use crate::panel::types::{LoadCategory, LoadGroup, ProtectionMode};

/// Combined main breaker+RCD devices are not stocked above this rating.
pub const MAIN_RCD_MAX_AMPS: u32 = 40;

/// Trip threshold of every leakage device in the panel.
pub const RESIDUAL_TRIP_MA: u32 = 30;

/// Resolved protection arrangement for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProtectionPlan {
    pub requested: ProtectionMode,
    pub effective: ProtectionMode,
}

impl ProtectionPlan {
    pub fn resolve(requested: ProtectionMode, main_amps: u32) -> Self {
        let effective = effective_mode(requested, main_amps);
        if effective != requested {
            debug!(
                "Protection mode {} unavailable at {}A, falling back to {}",
                requested, main_amps, effective
            );
        }
        Self {
            requested,
            effective,
        }
    }

    /// True when the requested mode could not be honoured.
    pub fn fell_back(&self) -> bool {
        self.requested != self.effective
    }

    pub fn main_has_rcd(&self) -> bool {
        self.effective == ProtectionMode::MainRcd
    }

    pub fn has_upstream_rcd(&self) -> bool {
        self.effective == ProtectionMode::UpstreamRcd
    }

    pub fn needs_circuit_rcd(&self, group: &LoadGroup) -> bool {
        needs_circuit_rcd(group, self.effective)
    }

    pub fn circuit_rcd_toggle_enabled(&self) -> bool {
        circuit_rcd_toggle_enabled(self.effective)
    }
}

/// Apply the 40A ceiling of `main-rcd`; other modes pass through.
pub fn effective_mode(requested: ProtectionMode, main_amps: u32) -> ProtectionMode {
    match requested {
        ProtectionMode::MainRcd if main_amps > MAIN_RCD_MAX_AMPS => ProtectionMode::Standard,
        mode => mode,
    }
}

/// Whether `group` gets its own RCBO under the effective mode.
pub fn needs_circuit_rcd(group: &LoadGroup, effective: ProtectionMode) -> bool {
    effective == ProtectionMode::Standard && group.rcd_requested
}

/// The per-group RCD toggle is only editable in standard mode. Its stored
/// value is kept while disabled.
pub fn circuit_rcd_toggle_enabled(effective: ProtectionMode) -> bool {
    effective == ProtectionMode::Standard
}

/// Initial RCD request for a new group: wet circuits other than lighting.
pub fn default_rcd_request(is_wet: bool, category: LoadCategory) -> bool {
    is_wet && category != LoadCategory::Lighting
}
