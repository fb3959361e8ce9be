//! Load templates, unit prices and the commerce-id mapping.
//!
//! The catalog is read once at start-up and consulted only when groups are
//! created, when the BOM is priced, and at checkout. Sizing never reads it.

mod loader;
mod types;

pub use loader::{default_catalog, load_catalog, resolve_catalog};
pub use types::*;
