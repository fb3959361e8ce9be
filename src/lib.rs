pub mod catalog;
pub mod checkout;
pub mod commands;
mod error;
pub mod panel;
pub mod report;
pub mod session;
pub mod settings;
pub mod sizing;
pub mod snapshot;
pub mod wizard;

pub use error::PanelError;
pub use panel::{evaluate, PanelReport};
pub use session::{ConfiguratorSession, GroupUpdate};

use clap::Parser;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = commands::Cli::parse();
    match commands::execute(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output.trim_end());
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
