//! Engine settings loaded from TOML.
//!
//! Resolution order: an explicit path, then
//! `<config dir>/panel-configurator/settings.toml`, then the embedded default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PanelError;
use crate::panel::types::DEFAULT_DIVERSITY_FACTOR;
use crate::panel::DEFAULT_ROW_CAPACITY;

const DEFAULT_SETTINGS: &str = include_str!("../config/settings.toml");

const APP_DIR: &str = "panel-configurator";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_row_capacity")]
    pub row_capacity: u32,
    #[serde(default = "default_diversity")]
    pub default_diversity_factor: f64,
    pub share_base_url: String,
    pub store_base_url: String,
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_row_capacity() -> u32 {
    DEFAULT_ROW_CAPACITY
}

fn default_diversity() -> f64 {
    DEFAULT_DIVERSITY_FACTOR
}

impl Settings {
    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<(), PanelError> {
        let diversity = self.default_diversity_factor;
        if !(diversity.is_finite() && diversity > 0.0 && diversity <= 1.0) {
            return Err(PanelError::Settings(format!(
                "default_diversity_factor {} outside (0, 1]",
                diversity
            )));
        }
        if self.share_base_url.trim().is_empty() {
            return Err(PanelError::Settings("share_base_url is empty".to_string()));
        }
        if self.store_base_url.trim().is_empty() {
            return Err(PanelError::Settings("store_base_url is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        default_settings()
    }
}

/// Settings embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_settings() -> Settings {
    toml::from_str(DEFAULT_SETTINGS).expect("embedded settings.toml must be valid TOML")
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {:?}", path))?;
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Invalid settings TOML in {:?}", path))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {:?}", path))?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Per-user settings location, if the platform has a config directory.
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(SETTINGS_FILE))
}

/// Resolve settings using the lookup order described above.
///
/// An explicit path that cannot be loaded is an error; a broken user file is
/// also reported rather than silently ignored.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings(path);
    }

    match user_settings_path() {
        Some(path) if path.exists() => load_settings(&path),
        Some(path) => {
            debug!("No user settings at {:?}, using defaults", path);
            Ok(default_settings())
        }
        None => Ok(default_settings()),
    }
}
