//! Panel model and the derivation pipeline.
//!
//! # Architecture
//!
//! - **types**: editable configuration (groups, rooms, options) and derived
//!   output (modules, rail rows, BOM lines)
//! - **generator**: configuration -> ordered module sequence
//! - **layout**: module sequence -> rail rows + enclosure size
//! - **bom**: module sequence -> aggregated bill of materials
//!
//! Layout and BOM read the same module sequence independently.
//!
//! # Example
//!
//! ```ignore
//! use panel_configurator::catalog::default_catalog;
//! use panel_configurator::panel::{evaluate, Configuration};
//!
//! let catalog = default_catalog();
//! let report = evaluate(&Configuration::default(), &catalog.prices, 12);
//! println!("{} modules, enclosure {}", report.modules.len(), report.layout.enclosure_size);
//! ```

pub mod bom;
pub mod generator;
pub mod layout;
pub mod types;

pub use bom::aggregate;
pub use generator::{generate, generate_modules, GeneratedPanel};
pub use layout::{layout, pack_rows, recommend_enclosure, DEFAULT_ROW_CAPACITY, ENCLOSURE_SERIES};
pub use types::*;

use serde::Serialize;

use crate::catalog::PriceTable;
use crate::sizing::{ProtectionPlan, SupplySizing};

/// Everything derived from one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelReport {
    pub supply: SupplySizing,
    pub protection: ProtectionPlan,
    pub modules: Vec<Module>,
    pub layout: RailLayout,
    pub bom: BillOfMaterials,
}

/// Run the whole pipeline for `config`.
pub fn evaluate(config: &Configuration, prices: &PriceTable, row_capacity: u32) -> PanelReport {
    let GeneratedPanel {
        supply,
        protection,
        modules,
    } = generate(&config.groups, &config.options);
    let layout = layout(&modules, row_capacity);
    let bom = aggregate(&modules, prices);

    PanelReport {
        supply,
        protection,
        modules,
        layout,
        bom,
    }
}
