//! `kitpack config`: inspect configuration values.

use std::path::Path;

use clap::ValueEnum;

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            // The project-local file wins when it exists.
            let local = Path::new(LOCAL_CONFIG_FILE);
            let path = if local.exists() {
                local.to_path_buf()
            } else {
                AppConfig::config_path()
            };
            if !path.exists() {
                output.warning("No configuration file found; built-in defaults are in use")?;
            }
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    fn path_or_empty(p: Option<&Path>) -> String {
        p.map(|p| p.display().to_string()).unwrap_or_default()
    }

    match key {
        "adapter.output_dir" => Ok(config.adapter.output_dir.display().to_string()),
        "adapter.files_dir" => Ok(path_or_empty(config.adapter.files_dir.as_deref())),
        "host.static_dir" => Ok(config.host.static_dir.display().to_string()),
        "host.client_dir" => Ok(config.host.client_dir.display().to_string()),
        "host.prerendered_dir" => Ok(config.host.prerendered_dir.display().to_string()),
        "host.prerender_command" => Ok(config.host.prerender_command.clone().unwrap_or_default()),
        "bundler.esbuild_path" => Ok(path_or_empty(config.bundler.esbuild_path.as_deref())),
        "bundler.options_file" => Ok(path_or_empty(config.bundler.options_file.as_deref())),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config
            .output
            .format
            .to_possible_value()
            .map(|v| v.get_name().to_owned())
            .unwrap_or_default()),
        _ => Err(CliError::UnknownConfigKey { key: key.into() }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
