//! Plain-text rendering of an evaluated panel.
//!
//! Renderers only read a [`PanelReport`](crate::panel::PanelReport); they never
//! trigger recomputation.

mod diagram;
mod document;

pub use diagram::{kind_label, single_line_diagram};
pub use document::{render_bom, render_document, render_rail};

/// Run a writer against a fresh `String`.
pub(crate) fn render_to_string(write: impl FnOnce(&mut String) -> std::fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write(&mut out);
    out
}
