//! Plain-text single-line diagram.

use std::fmt::{self, Write};

use super::render_to_string;
use crate::panel::types::{Configuration, Module, ModuleKind};
use crate::panel::PanelReport;
use crate::sizing::{cable_size, SUPPLY_VOLTAGE};

/// Short device label used in the diagram and rail drawing.
pub fn kind_label(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Main => "MAIN",
        ModuleKind::Relay => "RELAY",
        ModuleKind::UpstreamRcd => "RCCB",
        ModuleKind::Mcb => "MCB",
        ModuleKind::Rcbo => "RCBO",
    }
}

/// Render the supply chain followed by one branch per circuit.
///
/// ```text
/// SUPPLY 230V 1P+N
///  |
///  +- MAIN   25A 2P  Main breaker
///  +- RELAY  40A 2P  Voltage relay
///  |
///  +-- MCB    10A  Living lighting        0.30 kW  1.5mm²
///  `-- RCBO   16A  Bathroom               2.00 kW  2.5mm²  30mA
/// ```
pub fn single_line_diagram(config: &Configuration, report: &PanelReport) -> String {
    render_to_string(|out| write_diagram(out, config, report))
}

fn write_diagram(out: &mut String, config: &Configuration, report: &PanelReport) -> fmt::Result {
    writeln!(out, "SUPPLY {:.0}V 1P+N", SUPPLY_VOLTAGE)?;
    writeln!(out, " |")?;

    let (upstream, circuits): (Vec<&Module>, Vec<&Module>) = report
        .modules
        .iter()
        .partition(|m| m.group_id.is_none());

    for module in &upstream {
        write!(
            out,
            " +- {:<6} {:>2}A {}P  {}",
            kind_label(module.kind),
            module.amperage,
            module.poles,
            module.name
        )?;
        if let Some(ma) = module.residual_ma {
            write!(out, "  {}mA", ma)?;
        }
        writeln!(out)?;
    }

    if circuits.is_empty() {
        writeln!(out, " `- (no circuits)")?;
        return Ok(());
    }

    writeln!(out, " |")?;
    let last = circuits.len() - 1;
    for (i, module) in circuits.iter().enumerate() {
        let branch = if i == last { " `--" } else { " +--" };
        let power_kw = module
            .group_id
            .as_deref()
            .and_then(|id| config.group(id))
            .map(|g| g.power_kw)
            .unwrap_or(0.0);

        write!(
            out,
            "{} {:<6} {:>2}A  {:<24} {:>6.2} kW  {}",
            branch,
            kind_label(module.kind),
            module.amperage,
            module.name,
            power_kw,
            cable_size(module.amperage)
        )?;
        if let Some(ma) = module.residual_ma {
            write!(out, "  {}mA", ma)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
