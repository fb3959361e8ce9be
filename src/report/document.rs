//! Printable panel document: summary, diagram, rail drawing and BOM.

use std::fmt::{self, Write};

use super::diagram::{kind_label, single_line_diagram};
use super::render_to_string;
use crate::panel::types::{BillOfMaterials, Configuration, RailLayout};
use crate::panel::PanelReport;
use crate::sizing::MAIN_RCD_MAX_AMPS;

/// Render the whole document. Reads `report` only; nothing is recomputed.
pub fn render_document(config: &Configuration, report: &PanelReport) -> String {
    render_to_string(|out| write_document(out, config, report))
}

/// Rail rows, one line per row, with used and free units.
pub fn render_rail(layout: &RailLayout) -> String {
    render_to_string(|out| write_rail(out, layout))
}

/// BOM table with the estimated total.
pub fn render_bom(bom: &BillOfMaterials) -> String {
    render_to_string(|out| write_bom(out, bom))
}

fn write_document(out: &mut String, config: &Configuration, report: &PanelReport) -> fmt::Result {
    let supply = &report.supply;

    writeln!(out, "DISTRIBUTION PANEL")?;
    writeln!(out, "==================")?;
    writeln!(out)?;
    writeln!(out, "Circuits:           {}", config.groups.len())?;
    writeln!(out, "Connected load:     {:.2} kW", supply.total_power_kw)?;
    writeln!(out, "Diversity factor:   {:.2}", supply.diversity_factor)?;
    writeln!(out, "Design current:     {:.1} A", supply.design_amps)?;
    writeln!(out, "Main breaker:       {} A", supply.main_amps)?;
    writeln!(out, "Protection:         {}", report.protection.effective)?;
    writeln!(out, "Modules:            {}", report.modules.len())?;
    writeln!(
        out,
        "Enclosure:          {} modules ({} used)",
        report.layout.enclosure_size, report.layout.total_width
    )?;

    if report.protection.fell_back() {
        writeln!(out)?;
        writeln!(
            out,
            "Note: {} was requested but is not available for a {} A main (limit {} A); \
             per-circuit RCD protection is used instead.",
            report.protection.requested, supply.main_amps, MAIN_RCD_MAX_AMPS
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Single-line diagram")?;
    writeln!(out, "-------------------")?;
    out.push_str(&single_line_diagram(config, report));

    writeln!(out)?;
    writeln!(out, "Rail layout")?;
    writeln!(out, "-----------")?;
    write_rail(out, &report.layout)?;

    writeln!(out)?;
    writeln!(out, "Bill of materials")?;
    writeln!(out, "-----------------")?;
    write_bom(out, &report.bom)
}

fn write_rail(out: &mut String, layout: &RailLayout) -> fmt::Result {
    if layout.rows.is_empty() {
        return writeln!(out, "(empty)");
    }
    for (i, row) in layout.rows.iter().enumerate() {
        let cells: Vec<String> = row
            .modules
            .iter()
            .map(|m| format!("{} {}A", kind_label(m.kind), m.amperage))
            .collect();
        writeln!(
            out,
            "Row {}: [{}]  {}/{} units, {} free",
            i + 1,
            cells.join(" | "),
            row.used_width,
            row.capacity,
            row.free_units()
        )?;
    }
    Ok(())
}

fn write_bom(out: &mut String, bom: &BillOfMaterials) -> fmt::Result {
    writeln!(
        out,
        "{:<24} {:<36} {:>4} {:>9} {:>10}",
        "Product", "Description", "Qty", "Unit", "Total"
    )?;
    for line in &bom.lines {
        writeln!(
            out,
            "{:<24} {:<36} {:>4} {:>9.2} {:>10.2}",
            line.product_id,
            line.description,
            line.quantity,
            line.unit_price,
            line.line_total()
        )?;
    }
    writeln!(
        out,
        "{:<24} {:<36} {:>4} {:>9} {:>10.2}",
        "TOTAL",
        "",
        bom.total_quantity(),
        "",
        bom.estimated_total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::panel::evaluate;
    use crate::panel::types::{LoadCategory, LoadGroup, PanelOptions, ProtectionMode};

    fn config(power_kw: f64, mode: ProtectionMode) -> Configuration {
        Configuration {
            groups: vec![LoadGroup {
                instance_id: "heater_00000001".to_string(),
                template_id: "heater".to_string(),
                name: "Heater".to_string(),
                power_kw,
                category: LoadCategory::Appliance,
                is_wet: false,
                is_dedicated: true,
                rcd_requested: false,
            }],
            rooms: Vec::new(),
            options: PanelOptions {
                include_relay: false,
                protection_mode: mode,
                ..PanelOptions::default()
            },
        }
    }

    #[test]
    fn test_document_sections() {
        let config = config(2.0, ProtectionMode::Standard);
        let report = evaluate(&config, &default_catalog().prices, 12);
        let doc = render_document(&config, &report);

        assert!(doc.contains("Main breaker:       25 A"));
        assert!(doc.contains("Single-line diagram"));
        assert!(doc.contains("Row 1: [MAIN 25A | MCB 10A]  3/12 units, 9 free"));
        assert!(doc.contains("main-mcb-25a-2p"));
        assert!(!doc.contains("Note:"));
    }

    #[test]
    fn test_document_notes_fallback() {
        // 12 kW * 0.8 -> ~41.7 A -> 50 A main, too large for a main RCBO
        let config = config(12.0, ProtectionMode::MainRcd);
        let report = evaluate(&config, &default_catalog().prices, 12);
        let doc = render_document(&config, &report);

        assert!(doc.contains("Note: main-rcd was requested"));
        assert!(doc.contains("Protection:         standard"));
    }

    #[test]
    fn test_bom_total_row() {
        let config = config(2.0, ProtectionMode::Standard);
        let report = evaluate(&config, &default_catalog().prices, 12);
        let table = render_bom(&report.bom);
        let total = table.lines().last().unwrap();

        assert!(total.starts_with("TOTAL"));
        assert!(total.ends_with("57.00"), "45 + 12: {}", total);
    }

    #[test]
    fn test_empty_rail() {
        let layout = RailLayout {
            rows: Vec::new(),
            total_width: 0,
            enclosure_size: 8,
        };
        assert_eq!(render_rail(&layout), "(empty)\n");
    }
}
