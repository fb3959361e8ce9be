//! Catalog definitions loaded from TOML.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::panel::types::{LoadCategory, Module, ModuleKind};

/// Root of `catalog.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Load points offered to the user, in display order
    pub templates: Vec<LoadTemplate>,
    pub prices: PriceTable,
    /// Product id -> external commerce line-item id
    #[serde(default)]
    pub commerce: CommerceMapping,
}

impl Catalog {
    pub fn template(&self, id: &str) -> Option<&LoadTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates selectable as appliances in the room wizard.
    pub fn appliances(&self) -> impl Iterator<Item = &LoadTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == LoadCategory::Appliance)
    }
}

/// A predefined load point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTemplate {
    pub id: String,
    pub name: String,
    /// Default rating in kW, editable after the group is created
    pub power_kw: f64,
    pub category: LoadCategory,
    pub is_wet: bool,
    pub is_dedicated: bool,
}

/// Flat unit price per device kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceTable {
    pub main: f64,
    pub main_rcd: f64,
    pub relay: f64,
    pub upstream_rcd: f64,
    pub mcb: f64,
    pub rcbo: f64,
}

impl PriceTable {
    pub fn unit_price(&self, module: &Module) -> f64 {
        match module.kind {
            ModuleKind::Main if module.has_rcd() => self.main_rcd,
            ModuleKind::Main => self.main,
            ModuleKind::Relay => self.relay,
            ModuleKind::UpstreamRcd => self.upstream_rcd,
            ModuleKind::Mcb => self.mcb,
            ModuleKind::Rcbo => self.rcbo,
        }
    }
}

/// Product id to commerce-system id lookup.
///
/// Entries with an empty value are placeholders for products that are not
/// listed in the store and behave as if they were missing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct CommerceMapping(HashMap<String, String>);

impl CommerceMapping {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self(entries)
    }

    pub fn lookup(&self, product_id: &str) -> Option<&str> {
        self.0
            .get(product_id)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for CommerceMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_deserialize() {
        let toml_str = r#"
            id = "oven"
            name = "Electric oven"
            power_kw = 3.0
            category = "appliance"
            is_wet = false
            is_dedicated = true
        "#;
        let template: LoadTemplate = toml::from_str(toml_str).unwrap();
        assert_eq!(template.id, "oven");
        assert_eq!(template.category, LoadCategory::Appliance);
        assert!(template.is_dedicated);
    }

    #[test]
    fn test_placeholder_commerce_entry_is_missing() {
        let mapping: CommerceMapping = [
            ("mcb-16a-1p-c".to_string(), "PWR-MCB1P-C16".to_string()),
            ("rccb-63a-30ma-2p".to_string(), "  ".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(mapping.lookup("mcb-16a-1p-c"), Some("PWR-MCB1P-C16"));
        assert_eq!(mapping.lookup("rccb-63a-30ma-2p"), None);
        assert_eq!(mapping.lookup("unknown"), None);
        assert_eq!(mapping.len(), 2);
    }
}
