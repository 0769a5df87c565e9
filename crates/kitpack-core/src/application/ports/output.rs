//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the adapter needs from the outside world.
//! The `kitpack-adapters` crate provides implementations.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::BundleConfig;
use crate::error::AdapterResult;

/// Severity tier for messages sent through [`Host::log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTier {
    /// Progress detail, hidden unless the user asked for verbose output.
    Minor,
    Info,
    Warn,
    Error,
    Success,
}

impl fmt::Display for LogTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minor => "minor",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Success => "success",
        })
    }
}

/// Port for the host build system's capabilities.
///
/// Implemented by:
/// - `kitpack_adapters::host::LocalHost` (production)
/// - `kitpack_adapters::host::MemoryHost` (testing)
///
/// ## Design Notes
///
/// - Relative paths resolve against the host's project directory
/// - Only `prerender` suspends; everything else is a plain call
#[async_trait]
pub trait Host: Send + Sync {
    /// Add patterns to the project's ignore files.
    fn update_ignores(&self, patterns: &[String]) -> AdapterResult<()>;

    /// Remove a directory and all contents. A missing path is not an error.
    fn rimraf(&self, path: &Path) -> AdapterResult<()>;

    /// Emit a progress message.
    fn log(&self, tier: LogTier, message: &str);

    /// Copy a file or directory tree, creating parents of `to`.
    fn copy(&self, from: &Path, to: &Path) -> AdapterResult<()>;

    /// Copy the project's static assets into `dest`.
    fn copy_static_files(&self, dest: &Path) -> AdapterResult<()>;

    /// Copy the framework's client build output into `dest`.
    fn copy_client_files(&self, dest: &Path) -> AdapterResult<()>;

    /// Prerender static pages into `dest`.
    async fn prerender(&self, dest: &Path) -> AdapterResult<()>;

    /// Write a text file, creating parent directories.
    fn write_file(&self, path: &Path, contents: &str) -> AdapterResult<()>;
}

/// Port for the bundler.
///
/// Implemented by:
/// - `kitpack_adapters::bundler::EsbuildBundler` (runs the esbuild CLI)
/// - `kitpack_adapters::bundler::RecordingBundler` (testing)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Compile according to `config`, writing the configured output file.
    async fn build(&self, config: &BundleConfig) -> AdapterResult<()>;
}

/// Caller hook that receives the default bundle options and returns the
/// options actually used.
///
/// The returned value is handed to the bundler verbatim. Nothing is merged
/// back from the defaults.
#[async_trait]
pub trait BundleOverride: Send + Sync {
    async fn transform(&self, defaults: BundleConfig) -> AdapterResult<BundleConfig>;
}

#[async_trait]
impl<F> BundleOverride for F
where
    F: Fn(BundleConfig) -> BundleConfig + Send + Sync,
{
    async fn transform(&self, defaults: BundleConfig) -> AdapterResult<BundleConfig> {
        Ok(self(defaults))
    }
}
