//! Recording bundler for testing.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use kitpack_core::{
    application::ports::Bundler,
    domain::BundleConfig,
    error::{AdapterError, AdapterResult},
};

use crate::host::MemoryHost;

/// Bundler that remembers every configuration it is given.
///
/// Optionally writes a placeholder bundle to the configured outfile on a
/// [`MemoryHost`], or fails every build.
#[derive(Debug, Clone, Default)]
pub struct RecordingBundler {
    configs: Arc<Mutex<Vec<BundleConfig>>>,
    output: Option<MemoryHost>,
    failure: Option<String>,
}

impl RecordingBundler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write each bundle's outfile into `host`.
    pub fn writing_into(mut self, host: MemoryHost) -> Self {
        self.output = Some(host);
        self
    }

    /// Fail every build with a bundler error carrying `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Configurations received so far.
    pub fn configs(&self) -> Vec<BundleConfig> {
        self.configs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_config(&self) -> Option<BundleConfig> {
        self.configs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl Bundler for RecordingBundler {
    async fn build(&self, config: &BundleConfig) -> AdapterResult<()> {
        self.configs
            .lock()
            .map_err(|_| AdapterError::Internal {
                message: "recording bundler lock poisoned".into(),
            })?
            .push(config.clone());

        if let Some(reason) = &self.failure {
            return Err(AdapterError::Bundler {
                reason: reason.clone(),
            });
        }

        if let (Some(host), Some(outfile)) = (&self.output, &config.outfile) {
            host.put_file(
                outfile.clone(),
                format!("// bundle of {}\n", config.entry_points.join(", ")),
            );
        }
        Ok(())
    }
}
