//! Bill-of-materials aggregation.

use std::collections::HashMap;

use super::types::{BillOfMaterials, BomLine, Module};
use crate::catalog::PriceTable;

/// Collapse modules into one line per product id.
///
/// Lines keep the order in which each product id first appears, and the
/// name and description of that first module.
pub fn aggregate(modules: &[Module], prices: &PriceTable) -> BillOfMaterials {
    let mut lines: Vec<BomLine> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for module in modules {
        match index.get(module.product_id.as_str()) {
            Some(&i) => lines[i].quantity += 1,
            None => {
                index.insert(module.product_id.as_str(), lines.len());
                lines.push(BomLine {
                    product_id: module.product_id.clone(),
                    kind: module.kind,
                    name: module.name.clone(),
                    description: module.description.clone(),
                    quantity: 1,
                    unit_price: prices.unit_price(module),
                });
            }
        }
    }

    BillOfMaterials { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::panel::generator::generate_modules;
    use crate::panel::types::{LoadCategory, LoadGroup, PanelOptions};

    fn socket(id: &str, name: &str) -> LoadGroup {
        LoadGroup {
            instance_id: id.to_string(),
            template_id: "socket".to_string(),
            name: name.to_string(),
            power_kw: 2.0,
            category: LoadCategory::Socket,
            is_wet: false,
            is_dedicated: false,
            rcd_requested: false,
        }
    }

    #[test]
    fn test_same_product_collapses() {
        let prices = default_catalog().prices;
        let groups = vec![
            socket("s1", "Living room sockets"),
            socket("s2", "Bedroom sockets"),
            socket("s3", "Hall sockets"),
        ];
        let modules = generate_modules(&groups, &PanelOptions::default());
        let bom = aggregate(&modules, &prices);

        assert_eq!(bom.lines.len(), 3, "main, relay, one MCB line");
        let mcb = &bom.lines[2];
        assert_eq!(mcb.product_id, "mcb-16a-1p-c");
        assert_eq!(mcb.quantity, 3);
        assert_eq!(mcb.name, "Living room sockets", "keeps first-seen name");
    }

    #[test]
    fn test_first_seen_order() {
        let prices = default_catalog().prices;
        let mut light = socket("l1", "Lights");
        light.category = LoadCategory::Lighting;
        light.power_kw = 0.1;
        let groups = vec![socket("s1", "A"), light, socket("s2", "B")];
        let modules = generate_modules(&groups, &PanelOptions::default());
        let bom = aggregate(&modules, &prices);

        let ids: Vec<_> = bom.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["main-mcb-25a-2p", "voltage-relay-40a", "mcb-16a-1p-c", "mcb-10a-1p-c"]
        );
    }

    #[test]
    fn test_quantity_sum_matches_module_count() {
        let prices = default_catalog().prices;
        for count in 0..20 {
            let groups: Vec<_> = (0..count)
                .map(|i| {
                    let mut g = socket(&format!("g{}", i), "G");
                    g.power_kw = 0.5 * f64::from(i % 7);
                    g.rcd_requested = i % 3 == 0;
                    g
                })
                .collect();
            let modules = generate_modules(&groups, &PanelOptions::default());
            let bom = aggregate(&modules, &prices);
            assert_eq!(bom.total_quantity() as usize, modules.len());
        }
    }

    #[test]
    fn test_unit_prices_applied() {
        let prices = default_catalog().prices;
        let groups = vec![socket("s1", "A")];
        let modules = generate_modules(&groups, &PanelOptions::default());
        let bom = aggregate(&modules, &prices);

        // main 45 + relay 85 + mcb 12
        assert_eq!(bom.estimated_total(), 142.0);
    }
}
