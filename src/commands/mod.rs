//! CLI command handlers.
//!
//! Each handler loads what it needs through [`Context`], runs the engine and
//! returns the text to print. Printing happens in [`execute`] so handlers stay
//! testable.

pub mod args;
mod catalog;
mod checkout;
mod panel;
mod share;
mod wizard;

use anyhow::{bail, Context as _, Result};
use std::path::Path;
use tracing::debug;

use crate::catalog::{resolve_catalog, Catalog};
use crate::panel::types::Configuration;
use crate::session::ConfiguratorSession;
use crate::settings::{resolve_settings, Settings};
use crate::snapshot;

pub use args::{Cli, Commands, InputArgs, ModeArg, OutputFormat};

/// Settings and catalog resolved for one invocation.
pub struct Context {
    pub settings: Settings,
    pub catalog: Catalog,
}

impl Context {
    /// `--catalog` wins over `catalog_path` from settings.
    pub fn load(settings_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<Self> {
        let settings = resolve_settings(settings_path)?;
        let catalog_path = catalog_path.or(settings.catalog_path.as_deref());
        let catalog = resolve_catalog(catalog_path)?;
        Ok(Self { settings, catalog })
    }

    /// Open a session over the configuration named by `input`.
    ///
    /// An explicit input that cannot be read is an error here, unlike the
    /// soft fallback of [`ConfiguratorSession::from_share_reference`].
    pub fn open_session(&self, input: &InputArgs) -> Result<ConfiguratorSession> {
        let mut session = match (&input.config, &input.token) {
            (Some(path), _) => {
                let config = read_configuration(path)?;
                ConfiguratorSession::with_configuration(self.catalog.clone(), &self.settings, config)
            }
            (None, Some(reference)) => {
                ConfiguratorSession::from_token(self.catalog.clone(), &self.settings, reference)
                    .context("Invalid configuration token")?
            }
            (None, None) => {
                debug!("No input configuration, starting empty");
                ConfiguratorSession::new(self.catalog.clone(), &self.settings)
            }
        };

        if input.no_relay {
            session.set_include_relay(false);
        }
        if let Some(factor) = input.diversity {
            if !session.set_diversity_factor(factor) {
                bail!("Diversity factor must be in (0, 1], got {}", factor);
            }
        }
        if let Some(mode) = input.mode {
            session.set_protection_mode(mode.into());
        }
        Ok(session)
    }
}

/// Read and validate a configuration JSON file.
pub fn read_configuration(path: &Path) -> Result<Configuration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {:?}", path))?;
    let config: Configuration = serde_json::from_str(&content)
        .with_context(|| format!("Invalid configuration JSON in {:?}", path))?;
    snapshot::validate(&config).with_context(|| format!("Invalid configuration in {:?}", path))?;
    Ok(config)
}

/// Run a parsed command and return its stdout text.
pub fn execute(cli: Cli) -> Result<String> {
    let ctx = Context::load(cli.settings.as_deref(), cli.catalog.as_deref())?;

    match cli.command {
        Commands::Report { input, format } => panel::report(&ctx, &input, format),
        Commands::Modules { input, format } => panel::modules(&ctx, &input, format),
        Commands::Bom { input, format } => panel::bom(&ctx, &input, format),
        Commands::Share {
            input,
            base_url,
            token_only,
        } => share::share(&ctx, &input, base_url.as_deref(), token_only),
        Commands::Checkout {
            input,
            store_url,
            json,
        } => checkout::checkout(&ctx, &input, store_url.as_deref(), json),
        Commands::Catalog { format } => catalog::list(&ctx, format),
        Commands::Wizard {
            input,
            rooms,
            output,
        } => wizard::wizard(&ctx, &input, &rooms, output.as_deref()),
    }
}
