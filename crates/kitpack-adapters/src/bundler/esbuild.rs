//! esbuild adapter: runs the esbuild CLI as a child process.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use kitpack_core::{
    application::ports::Bundler,
    domain::BundleConfig,
    error::{AdapterError, AdapterResult},
};

use super::flags::to_cli_args;

const BINARY: &str = "esbuild";

/// Production bundler backed by the `esbuild` executable.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    binary: PathBuf,
    working_dir: PathBuf,
}

impl EsbuildBundler {
    /// Use the esbuild installed for the project at `working_dir`.
    ///
    /// Looks for `node_modules/.bin/esbuild` in `working_dir` and each of its
    /// parents, then falls back to `esbuild` on `PATH`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        let binary = find_local_binary(&working_dir).unwrap_or_else(|| PathBuf::from(BINARY));
        Self {
            binary,
            working_dir,
        }
    }

    /// Use an explicit esbuild executable.
    pub fn with_binary(binary: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

#[async_trait]
impl Bundler for EsbuildBundler {
    #[instrument(skip_all, fields(binary = %self.binary.display()))]
    async fn build(&self, config: &BundleConfig) -> AdapterResult<()> {
        let args = to_cli_args(config);
        debug!(?args, "Running esbuild");

        let output = tokio::process::Command::new(&self.binary)
            .args(&args)
            .current_dir(&self.working_dir)
            .output()
            .await
            .map_err(|e| AdapterError::Bundler {
                reason: format!("failed to run {}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut reason = format!("esbuild exited with status {}", output.status);
            if !stderr.is_empty() {
                reason.push('\n');
                reason.push_str(stderr.trim_end());
            }
            if !stdout.is_empty() {
                reason.push('\n');
                reason.push_str(stdout.trim_end());
            }
            return Err(AdapterError::Bundler { reason });
        }
        Ok(())
    }
}

/// Walk up from `start` looking for `node_modules/.bin/esbuild`.
fn find_local_binary(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("node_modules").join(".bin").join(BINARY))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prefers_project_local_binary() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("esbuild"), "").unwrap();
        let nested = dir.path().join("apps/web");
        fs::create_dir_all(&nested).unwrap();

        let bundler = EsbuildBundler::new(&nested);

        assert_eq!(bundler.binary(), bin.join("esbuild"));
        assert_eq!(bundler.working_dir(), nested);
    }

    #[test]
    fn falls_back_to_path() {
        let dir = TempDir::new().unwrap();
        let bundler = EsbuildBundler::new(dir.path());
        assert_eq!(bundler.binary(), Path::new("esbuild"));
    }

    #[tokio::test]
    async fn missing_binary_is_bundler_error() {
        let dir = TempDir::new().unwrap();
        let bundler =
            EsbuildBundler::with_binary(dir.path().join("no-such-esbuild"), dir.path());
        let err = bundler.build(&BundleConfig::default()).await.unwrap_err();
        assert!(matches!(err, AdapterError::Bundler { .. }));
    }

    // The fake bundlers are shell scripts run through `sh`, so the script
    // path travels as the first entry point.
    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("fake-esbuild.sh"),
            "echo 'Could not resolve \"x\"' >&2\nexit 1\n",
        )
        .unwrap();

        let config = BundleConfig {
            entry_points: vec!["fake-esbuild.sh".into()],
            ..BundleConfig::default()
        };
        let err = EsbuildBundler::with_binary("sh", dir.path())
            .build(&config)
            .await
            .unwrap_err();

        match err {
            AdapterError::Bundler { reason } => assert!(reason.contains("Could not resolve")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_converted_flags() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("fake-esbuild.sh"),
            "echo \"$@\" > args.txt\n",
        )
        .unwrap();

        let config = BundleConfig {
            entry_points: vec!["fake-esbuild.sh".into(), "entry.js".into()],
            outfile: Some(PathBuf::from("out/index.js")),
            bundle: true,
            ..BundleConfig::default()
        };
        EsbuildBundler::with_binary("sh", dir.path())
            .build(&config)
            .await
            .unwrap();

        let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(args.trim(), "entry.js --bundle --outfile=out/index.js");
    }
}
