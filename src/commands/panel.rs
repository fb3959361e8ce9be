use anyhow::Result;
use std::fmt::Write;

use super::{Context, InputArgs, OutputFormat};
use crate::report::{kind_label, render_bom, render_document};

pub fn report(ctx: &Context, input: &InputArgs, format: OutputFormat) -> Result<String> {
    let session = ctx.open_session(input)?;
    let report = session.evaluate();
    match format {
        OutputFormat::Text => Ok(render_document(session.configuration(), &report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    }
}

pub fn modules(ctx: &Context, input: &InputArgs, format: OutputFormat) -> Result<String> {
    let session = ctx.open_session(input)?;
    let report = session.evaluate();
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&report.modules)?);
    }

    let mut out = String::new();
    for (i, module) in report.modules.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<6} {:>2}A {}P  w{}  {:<24} {}",
            i + 1,
            kind_label(module.kind),
            module.amperage,
            module.poles,
            module.width,
            module.product_id,
            module.name
        )?;
    }
    Ok(out)
}

pub fn bom(ctx: &Context, input: &InputArgs, format: OutputFormat) -> Result<String> {
    let session = ctx.open_session(input)?;
    let report = session.evaluate();
    match format {
        OutputFormat::Text => Ok(render_bom(&report.bom)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.bom)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;
    use crate::panel::types::{Configuration, LoadCategory, LoadGroup};
    use crate::snapshot::encode;

    fn token() -> String {
        let mut config = Configuration::default();
        config.options.include_relay = false;
        config.groups.push(LoadGroup {
            instance_id: "socket_00000001".to_string(),
            template_id: "socket".to_string(),
            name: "Sockets (dry)".to_string(),
            power_kw: 2.0,
            category: LoadCategory::Socket,
            is_wet: false,
            is_dedicated: false,
            rcd_requested: false,
        });
        encode(&config)
    }

    fn input() -> InputArgs {
        InputArgs {
            token: Some(token()),
            ..InputArgs::default()
        }
    }

    #[test]
    fn test_modules_text() {
        let out = modules(&test_context(), &input(), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("main-mcb-25a-2p"));
        assert!(lines[1].contains("mcb-16a-1p-c"));
    }

    #[test]
    fn test_bom_json() {
        let out = bom(&test_context(), &input(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
        assert_eq!(value["lines"][1]["product_id"], "mcb-16a-1p-c");
    }

    #[test]
    fn test_report_json_has_layout() {
        let out = report(&test_context(), &input(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["layout"]["enclosure_size"], 8);
        assert_eq!(value["supply"]["main_amps"], 25);
    }
}
