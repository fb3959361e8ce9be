//! Rail packing and enclosure sizing.

use super::types::{Module, RailLayout, RailRow};

/// Rail units per row of a standard enclosure.
pub const DEFAULT_ROW_CAPACITY: u32 = 12;

/// Standard enclosure sizes in rail units.
pub const ENCLOSURE_SERIES: [u32; 7] = [8, 12, 18, 24, 36, 48, 72];

/// Greedy, order-preserving packing into rows of `capacity` units.
///
/// A row is closed only when the next module would overflow it and the row
/// already holds something, so a module wider than a row still gets a row
/// of its own. A capacity of zero means the default.
pub fn pack_rows(modules: &[Module], capacity: u32) -> Vec<RailRow> {
    let capacity = if capacity == 0 {
        DEFAULT_ROW_CAPACITY
    } else {
        capacity
    };

    let mut rows = Vec::new();
    let mut current: Vec<Module> = Vec::new();
    let mut used = 0;

    for module in modules {
        if used + module.width > capacity && !current.is_empty() {
            rows.push(RailRow {
                modules: std::mem::take(&mut current),
                used_width: used,
                capacity,
            });
            used = 0;
        }
        used += module.width;
        current.push(module.clone());
    }

    if !current.is_empty() {
        rows.push(RailRow {
            modules: current,
            used_width: used,
            capacity,
        });
    }

    rows
}

/// Smallest standard enclosure holding `total_width` units, or the largest.
pub fn recommend_enclosure(total_width: u32) -> u32 {
    ENCLOSURE_SERIES
        .iter()
        .copied()
        .find(|&s| s >= total_width)
        .unwrap_or(72)
}

/// Pack `modules` and pick an enclosure for them.
pub fn layout(modules: &[Module], capacity: u32) -> RailLayout {
    let total_width = modules.iter().map(|m| m.width).sum();
    RailLayout {
        rows: pack_rows(modules, capacity),
        total_width,
        enclosure_size: recommend_enclosure(total_width),
    }
}
