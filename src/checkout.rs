//! Checkout: BOM -> commerce cart.
//!
//! Product ids are mapped through an injected [`CommerceMapping`]. Lines
//! without a mapping are dropped with a warning; a cart left empty is an
//! error rather than an empty submission.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::CommerceMapping;
use crate::panel::PanelReport;

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("nothing to check out: no product in the panel is available in the store")]
    NothingToCheckout,
}

/// One store line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub commerce_id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
}

/// Payload handed to the store redirect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    /// Product ids with no store listing
    pub dropped: Vec<String>,
    pub recommended_enclosure: u32,
    pub estimated_total: f64,
}

impl Cart {
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Pretty JSON for the operator console.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Store redirect target: `{store_base}/cart?items=ID:QTY,ID:QTY`.
    pub fn checkout_url(&self, store_base: &str) -> String {
        let items = self
            .lines
            .iter()
            .map(|l| format!("{}:{}", l.commerce_id, l.quantity))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/cart?items={}",
            store_base.trim_end_matches('/'),
            urlencoding::encode(&items)
        )
    }
}

/// Build the cart for an evaluated panel.
pub fn build_cart(report: &PanelReport, mapping: &CommerceMapping) -> Result<Cart, CheckoutError> {
    let mut lines: Vec<CartLine> = Vec::new();
    let mut dropped = Vec::new();

    for bom_line in &report.bom.lines {
        let Some(commerce_id) = mapping.lookup(&bom_line.product_id) else {
            warn!(
                "No store listing for '{}' (x{}), dropping from cart",
                bom_line.product_id, bom_line.quantity
            );
            dropped.push(bom_line.product_id.clone());
            continue;
        };

        match lines.iter_mut().find(|l| l.commerce_id == commerce_id) {
            Some(existing) => existing.quantity += bom_line.quantity,
            None => lines.push(CartLine {
                commerce_id: commerce_id.to_string(),
                product_id: bom_line.product_id.clone(),
                name: bom_line.name.clone(),
                quantity: bom_line.quantity,
            }),
        }
    }

    if lines.is_empty() {
        warn!("Checkout produced an empty cart ({} products dropped)", dropped.len());
        return Err(CheckoutError::NothingToCheckout);
    }

    let cart = Cart {
        lines,
        dropped,
        recommended_enclosure: report.layout.enclosure_size,
        estimated_total: report.bom.estimated_total(),
    };
    info!(
        "Built cart with {} items across {} lines ({} dropped)",
        cart.item_count(),
        cart.lines.len(),
        cart.dropped.len()
    );
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::panel::types::{Configuration, LoadCategory, LoadGroup, PanelOptions};
    use crate::panel::{evaluate, DEFAULT_ROW_CAPACITY};

    fn report_for(groups: Vec<LoadGroup>, include_relay: bool) -> PanelReport {
        let config = Configuration {
            groups,
            rooms: Vec::new(),
            options: PanelOptions {
                include_relay,
                ..PanelOptions::default()
            },
        };
        evaluate(&config, &default_catalog().prices, DEFAULT_ROW_CAPACITY)
    }

    fn group(id: &str, power_kw: f64, category: LoadCategory) -> LoadGroup {
        LoadGroup {
            instance_id: id.to_string(),
            template_id: id.to_string(),
            name: id.to_string(),
            power_kw,
            category,
            is_wet: false,
            is_dedicated: false,
            rcd_requested: false,
        }
    }

    #[test]
    fn test_mapped_cart() {
        let report = report_for(
            vec![
                group("sockets", 2.0, LoadCategory::Socket),
                group("more sockets", 2.0, LoadCategory::Socket),
            ],
            true,
        );
        let cart = build_cart(&report, &default_catalog().commerce).unwrap();

        let ids: Vec<_> = cart.lines.iter().map(|l| l.commerce_id.as_str()).collect();
        assert_eq!(ids, vec!["PWR-MCB2P-C25", "PWR-VR-40", "PWR-MCB1P-C16"]);
        assert_eq!(cart.lines[2].quantity, 2);
        assert!(cart.dropped.is_empty());
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.recommended_enclosure, 8);
    }

    #[test]
    fn test_unmapped_items_dropped() {
        // 40A MCB has a placeholder entry in the default catalog
        let report = report_for(vec![group("heater", 8.5, LoadCategory::Appliance)], false);
        let cart = build_cart(&report, &default_catalog().commerce).unwrap();

        assert_eq!(cart.dropped, vec!["mcb-40a-1p-c".to_string()]);
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn test_empty_cart_is_error() {
        let report = report_for(vec![group("a", 2.0, LoadCategory::Socket)], true);
        let result = build_cart(&report, &CommerceMapping::default());
        assert_eq!(result, Err(CheckoutError::NothingToCheckout));
    }

    #[test]
    fn test_shared_commerce_id_merges() {
        let report = report_for(
            vec![
                group("light", 0.1, LoadCategory::Lighting),
                group("socket", 2.0, LoadCategory::Socket),
            ],
            false,
        );
        let mapping: CommerceMapping = [
            ("mcb-10a-1p-c".to_string(), "GENERIC-MCB".to_string()),
            ("mcb-16a-1p-c".to_string(), "GENERIC-MCB".to_string()),
        ]
        .into_iter()
        .collect();
        let cart = build_cart(&report, &mapping).unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.dropped, vec!["main-mcb-25a-2p".to_string()]);
    }

    #[test]
    fn test_checkout_url() {
        let report = report_for(vec![group("a", 2.0, LoadCategory::Socket)], false);
        let cart = build_cart(&report, &default_catalog().commerce).unwrap();
        let url = cart.checkout_url("https://shop.example.com/");
        assert_eq!(
            url,
            "https://shop.example.com/cart?items=PWR-MCB2P-C25%3A1%2CPWR-MCB1P-C16%3A1"
        );
    }

    #[test]
    fn test_cart_json() {
        let report = report_for(vec![group("a", 2.0, LoadCategory::Socket)], false);
        let cart = build_cart(&report, &default_catalog().commerce).unwrap();
        let json = cart.to_json().unwrap();
        assert!(json.contains("\"commerce_id\""));
        assert!(json.contains("\"recommended_enclosure\": 8"));
    }
}
