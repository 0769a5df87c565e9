//! `kitpack layout`: print where each output file goes.

use serde_json::json;

use kitpack_core::{
    domain::{ENTRY_SCRIPT, OutputLayout, SHIM_SCRIPT},
    error::AdapterError,
};

use crate::{
    cli::{LayoutArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: LayoutArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.out.unwrap_or(config.adapter.output_dir);
    let layout = OutputLayout::try_new(root).map_err(AdapterError::from)?;

    if output.format() == OutputFormat::Json {
        output.json(&layout_json(&layout))?;
        return Ok(());
    }

    output.header("Output layout:")?;
    for (label, path) in rows(&layout) {
        output.print(&format!("  {label:<10} {path}"))?;
    }
    Ok(())
}

fn rows(layout: &OutputLayout) -> Vec<(&'static str, String)> {
    vec![
        ("root", layout.root().display().to_string()),
        ("static", layout.static_dir().display().to_string()),
        ("function", layout.lambda_dir().display().to_string()),
        ("bundle", layout.bundle_file().display().to_string()),
        ("manifest", layout.manifest_file().display().to_string()),
        ("routes", layout.routes_file().display().to_string()),
        ("entry", ENTRY_SCRIPT.to_owned()),
        ("shims", SHIM_SCRIPT.to_owned()),
    ]
}

pub(crate) fn layout_json(layout: &OutputLayout) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (label, path) in rows(layout) {
        map.insert(label.to_owned(), json!(path));
    }
    serde_json::Value::Object(map)
}
