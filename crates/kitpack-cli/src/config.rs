//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `KITPACK_<SECTION>__<KEY>`, e.g.
//!    `KITPACK_ADAPTER__OUTPUT_DIR=dist`
//! 3. Config file: `--config FILE`, or else `./kitpack.toml` over the user
//!    config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use kitpack_adapters::HostConfig;
use kitpack_core::domain::DEFAULT_OUTPUT_DIR;

use crate::cli::OutputFormat;

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "kitpack.toml";

const ENV_PREFIX: &str = "KITPACK";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where output goes and which templates are used.
    pub adapter: AdapterConfig,
    /// Where the framework build left its artifacts.
    pub host: HostConfig,
    /// Bundler settings.
    pub bundler: BundlerConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub output_dir: PathBuf,
    pub files_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    pub esbuild_path: Option<PathBuf>,
    /// Complete bundle options replacing the defaults.
    pub options_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            files_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file(s), then environment.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        builder = match config_file {
            Some(path) => builder.add_source(config::File::from(path.as_path()).required(true)),
            None => builder
                .add_source(config::File::from(Self::config_path()).required(false))
                .add_source(config::File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `kitpack.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "kitpack", "kitpack")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}
