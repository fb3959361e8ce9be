//! Module sequence construction.
//!
//! Order is fixed: main device, optional relay, optional upstream RCCB, then
//! one device per load group in group order.

use serde::Serialize;

use super::types::{LoadGroup, Module, ModuleKind, PanelOptions};
use crate::sizing::{
    breaker_amperage, size_main_supply, ProtectionPlan, SupplySizing, RESIDUAL_TRIP_MA,
};

/// Modules plus the sizing decisions that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPanel {
    pub supply: SupplySizing,
    pub protection: ProtectionPlan,
    pub modules: Vec<Module>,
}

impl GeneratedPanel {
    pub fn total_width(&self) -> u32 {
        self.modules.iter().map(|m| m.width).sum()
    }
}

/// Build the full module sequence for `groups` under `options`.
pub fn generate(groups: &[LoadGroup], options: &PanelOptions) -> GeneratedPanel {
    let supply = size_main_supply(groups, options.diversity_factor);
    let protection = ProtectionPlan::resolve(options.protection_mode, supply.main_amps);

    let mut modules = Vec::with_capacity(groups.len() + 3);
    modules.push(main_module(supply.main_amps, protection.main_has_rcd()));

    if options.include_relay {
        modules.push(relay_module(supply.relay_amps()));
    }

    if protection.has_upstream_rcd() {
        modules.push(upstream_rcd_module(supply.rccb_amps()));
    }

    for group in groups {
        modules.push(circuit_module(group, protection.needs_circuit_rcd(group)));
    }

    GeneratedPanel {
        supply,
        protection,
        modules,
    }
}

/// Module sequence only.
pub fn generate_modules(groups: &[LoadGroup], options: &PanelOptions) -> Vec<Module> {
    generate(groups, options).modules
}

fn main_module(amps: u32, with_rcd: bool) -> Module {
    let kind = ModuleKind::Main;
    if with_rcd {
        Module {
            kind,
            name: "Main RCBO".to_string(),
            amperage: amps,
            poles: kind.poles(),
            width: kind.width(),
            product_id: format!("main-rcbo-{}a-{}ma-2p", amps, RESIDUAL_TRIP_MA),
            description: format!("2-pole main RCBO {}mA, {}A", RESIDUAL_TRIP_MA, amps),
            residual_ma: Some(RESIDUAL_TRIP_MA),
            group_id: None,
        }
    } else {
        Module {
            kind,
            name: "Main breaker".to_string(),
            amperage: amps,
            poles: kind.poles(),
            width: kind.width(),
            product_id: format!("main-mcb-{}a-2p", amps),
            description: format!("2-pole main breaker {}A", amps),
            residual_ma: None,
            group_id: None,
        }
    }
}

fn relay_module(amps: u32) -> Module {
    let kind = ModuleKind::Relay;
    Module {
        kind,
        name: "Voltage relay".to_string(),
        amperage: amps,
        poles: kind.poles(),
        width: kind.width(),
        product_id: format!("voltage-relay-{}a", amps),
        description: format!("Voltage protection relay {}A", amps),
        residual_ma: None,
        group_id: None,
    }
}

fn upstream_rcd_module(amps: u32) -> Module {
    let kind = ModuleKind::UpstreamRcd;
    Module {
        kind,
        name: "RCCB".to_string(),
        amperage: amps,
        poles: kind.poles(),
        width: kind.width(),
        product_id: format!("rccb-{}a-{}ma-2p", amps, RESIDUAL_TRIP_MA),
        description: format!("2-pole residual current device {}mA, {}A", RESIDUAL_TRIP_MA, amps),
        residual_ma: Some(RESIDUAL_TRIP_MA),
        group_id: None,
    }
}

fn circuit_module(group: &LoadGroup, with_rcd: bool) -> Module {
    let amps = breaker_amperage(group.power_kw, group.category);
    let kind = if with_rcd {
        ModuleKind::Rcbo
    } else {
        ModuleKind::Mcb
    };

    let (product_id, description, residual_ma) = match kind {
        ModuleKind::Rcbo => (
            format!("rcbo-{}a-{}ma-c", amps, RESIDUAL_TRIP_MA),
            format!("RCBO {}mA, Type C, {}A", RESIDUAL_TRIP_MA, amps),
            Some(RESIDUAL_TRIP_MA),
        ),
        _ => (
            format!("mcb-{}a-1p-c", amps),
            format!("Type C, {}A", amps),
            None,
        ),
    };

    Module {
        kind,
        name: group.name.clone(),
        amperage: amps,
        poles: kind.poles(),
        width: kind.width(),
        product_id,
        description,
        residual_ma,
        group_id: Some(group.instance_id.clone()),
    }
}
