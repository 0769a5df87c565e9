//! Local host adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use kitpack_core::{
    application::ports::{Host, LogTier},
    error::{AdapterError, AdapterResult},
};

/// Ignore files that receive the output directory pattern, when present.
pub const IGNORE_FILES: [&str; 3] = [".gitignore", ".prettierignore", ".eslintignore"];

/// Where the framework build left its artifacts, relative to the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Project-owned static assets.
    pub static_dir: PathBuf,
    /// Client bundle produced by the framework build.
    pub client_dir: PathBuf,
    /// Pages prerendered by the framework build.
    pub prerendered_dir: PathBuf,
    /// Shell command that prerenders into `{dest}`. Replaces the copy of
    /// `prerendered_dir` when set.
    pub prerender_command: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            client_dir: PathBuf::from(".svelte-kit/output/client"),
            prerendered_dir: PathBuf::from(".svelte-kit/output/prerendered"),
            prerender_command: None,
        }
    }
}

/// Production host rooted at a project directory.
#[derive(Debug, Clone)]
pub struct LocalHost {
    root: PathBuf,
    config: HostConfig,
}

impl LocalHost {
    /// Create a host for the project at `root` with default locations.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, HostConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: HostConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Resolve `path` against the project directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Copy `from` into `dest` if it exists; a missing source is skipped.
    fn copy_if_present(&self, from: &Path, dest: &Path, what: &str) -> AdapterResult<()> {
        let source = self.resolve(from);
        if !source.exists() {
            debug!(path = %source.display(), "No {what} to copy");
            return Ok(());
        }
        copy_tree(&source, &self.resolve(dest))
    }

    async fn run_prerender_command(&self, command: &str, dest: &Path) -> AdapterResult<()> {
        let script = dest_as_positional(command);
        debug!(%command, dest = %dest.display(), "Running prerender command");

        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&script)
            .arg("sh")
            .arg(dest)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| AdapterError::Prerender {
                reason: format!("failed to run '{command}': {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut reason = format!("'{command}' exited with status {}", output.status);
            if !stderr.is_empty() {
                reason.push('\n');
                reason.push_str(stderr.trim_end());
            }
            return Err(AdapterError::Prerender { reason });
        }
        Ok(())
    }
}

#[async_trait]
impl Host for LocalHost {
    fn update_ignores(&self, patterns: &[String]) -> AdapterResult<()> {
        for name in IGNORE_FILES {
            let path = self.root.join(name);
            if !path.exists() {
                continue;
            }

            let existing =
                std::fs::read_to_string(&path).map_err(|e| map_io_error(&path, e, "read"))?;
            let missing: Vec<&String> = patterns
                .iter()
                .filter(|p| !existing.lines().any(|line| line.trim() == p.as_str()))
                .collect();
            if missing.is_empty() {
                continue;
            }

            let mut updated = existing;
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            for pattern in missing {
                updated.push_str(pattern);
                updated.push('\n');
            }
            std::fs::write(&path, updated).map_err(|e| map_io_error(&path, e, "write"))?;
            debug!(file = name, "Ignore patterns added");
        }
        Ok(())
    }

    fn rimraf(&self, path: &Path) -> AdapterResult<()> {
        let target = self.resolve(path);
        let result = if target.is_dir() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(&target, e, "remove")),
        }
    }

    fn log(&self, tier: LogTier, message: &str) {
        match tier {
            LogTier::Minor => debug!("{message}"),
            LogTier::Info | LogTier::Success => info!("{message}"),
            LogTier::Warn => warn!("{message}"),
            LogTier::Error => error!("{message}"),
        }
    }

    fn copy(&self, from: &Path, to: &Path) -> AdapterResult<()> {
        copy_tree(&self.resolve(from), &self.resolve(to))
    }

    fn copy_static_files(&self, dest: &Path) -> AdapterResult<()> {
        self.copy_if_present(&self.config.static_dir, dest, "static files")
    }

    fn copy_client_files(&self, dest: &Path) -> AdapterResult<()> {
        self.copy_if_present(&self.config.client_dir, dest, "client files")
    }

    async fn prerender(&self, dest: &Path) -> AdapterResult<()> {
        match &self.config.prerender_command {
            Some(command) => self.run_prerender_command(command, dest).await,
            None => self.copy_if_present(&self.config.prerendered_dir, dest, "prerendered pages"),
        }
    }

    fn write_file(&self, path: &Path, contents: &str) -> AdapterResult<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::write(&target, contents).map_err(|e| map_io_error(&target, e, "write file"))
    }
}

/// Copy a file, or a directory tree, from `from` to `to`.
fn copy_tree(from: &Path, to: &Path) -> AdapterResult<()> {
    if from.is_file() {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::copy(from, to).map_err(|e| map_io_error(from, e, "copy"))?;
        return Ok(());
    }

    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| AdapterError::Filesystem {
            path: from.to_path_buf(),
            reason: format!("Failed to walk directory: {e}"),
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| AdapterError::Internal {
                message: format!("walked outside {}: {e}", from.display()),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| map_io_error(&target, e, "create directory"))?;
        } else {
            std::fs::copy(entry.path(), &target)
                .map_err(|e| map_io_error(entry.path(), e, "copy"))?;
        }
    }
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> AdapterError {
    AdapterError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
}

/// Point every `{dest}` placeholder at `$1`, which `sh -c` binds to the
/// destination path. A placeholder the user already quoted keeps one pair of
/// quotes.
fn dest_as_positional(command: &str) -> String {
    command
        .replace("\"{dest}\"", "\"$1\"")
        .replace("'{dest}'", "\"$1\"")
        .replace("{dest}", "\"$1\"")
}
