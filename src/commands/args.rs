//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::panel::types::ProtectionMode;

#[derive(Debug, Parser)]
#[command(name = "panel-configurator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Size and lay out a residential distribution panel")]
pub struct Cli {
    /// Settings file (defaults to the per-user settings, then built-in values)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Catalog file replacing the built-in catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the full panel document (summary, diagram, rail, BOM)
    Report {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the generated modules in rail order
    Modules {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the bill of materials
    Bom {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print a share link for the configuration
    Share {
        #[command(flatten)]
        input: InputArgs,
        /// Link prefix (defaults to `share_base_url` from settings)
        #[arg(long)]
        base_url: Option<String>,
        /// Print only the token
        #[arg(long)]
        token_only: bool,
    },
    /// Build the store cart and print the checkout URL
    Checkout {
        #[command(flatten)]
        input: InputArgs,
        /// Store address (defaults to `store_base_url` from settings)
        #[arg(long)]
        store_url: Option<String>,
        /// Print the cart payload as JSON instead of the URL
        #[arg(long)]
        json: bool,
    },
    /// List the load templates of the active catalog
    Catalog {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Expand rooms into load groups and print the resulting configuration
    Wizard {
        #[command(flatten)]
        input: InputArgs,
        /// JSON file with an array of rooms
        #[arg(long)]
        rooms: PathBuf,
        /// Write the configuration here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where the configuration comes from, plus option overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Configuration JSON file
    #[arg(long, conflicts_with = "token")]
    pub config: Option<PathBuf>,

    /// Snapshot token or share link
    #[arg(long)]
    pub token: Option<String>,

    /// Leave out the voltage relay
    #[arg(long)]
    pub no_relay: bool,

    /// Diversity factor in (0, 1]
    #[arg(long)]
    pub diversity: Option<f64>,

    /// Leakage protection arrangement
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Standard,
    MainRcd,
    UpstreamRcd,
}

impl From<ModeArg> for ProtectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => ProtectionMode::Standard,
            ModeArg::MainRcd => ProtectionMode::MainRcd,
            ModeArg::UpstreamRcd => ProtectionMode::UpstreamRcd,
        }
    }
}
