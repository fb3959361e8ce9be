//! TOML catalog loading.
//!
//! Provides two loading methods:
//! - `default_catalog()` - Loads the catalog compiled into the binary
//! - `load_catalog(path)` - Loads a replacement catalog from a file path

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::types::Catalog;

/// Default catalog embedded at compile time from `config/catalog.toml`.
const DEFAULT_CATALOG: &str = include_str!("../../config/catalog.toml");

/// Load a catalog from a TOML file.
///
/// # Returns
/// * `Ok(Catalog)` - Parsed catalog
/// * `Err` - If the file cannot be read or the TOML is invalid
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {:?}", path))?;
    let catalog: Catalog =
        toml::from_str(&content).with_context(|| format!("Invalid catalog TOML in {:?}", path))?;
    info!(
        "Loaded catalog from {:?}: {} templates, {} commerce entries",
        path,
        catalog.templates.len(),
        catalog.commerce.len()
    );
    Ok(catalog)
}

/// Get the catalog embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_catalog() -> Catalog {
    toml::from_str(DEFAULT_CATALOG).expect("embedded catalog.toml must be valid TOML")
}

/// Load `path` when given, otherwise the embedded catalog.
pub fn resolve_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => load_catalog(p),
        None => Ok(default_catalog()),
    }
}
