use anyhow::Result;
use std::fmt::Write;

use super::{Context, OutputFormat};

pub fn list(ctx: &Context, format: OutputFormat) -> Result<String> {
    let templates = &ctx.catalog.templates;
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(templates)?);
    }

    let mut out = String::new();
    for t in templates {
        let mut flags = Vec::new();
        if t.is_wet {
            flags.push("wet");
        }
        if t.is_dedicated {
            flags.push("dedicated");
        }
        writeln!(
            out,
            "{:<16} {:<20} {:<10} {:>5.2} kW  {}",
            t.id,
            t.name,
            t.category.as_str(),
            t.power_kw,
            flags.join(", ")
        )?;
    }
    Ok(out)
}
