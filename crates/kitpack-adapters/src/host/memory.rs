//! In-memory host adapter for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;

use kitpack_core::{
    application::ports::{Host, LogTier},
    error::{AdapterError, AdapterResult},
};

/// One call received by a [`MemoryHost`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    UpdateIgnores(Vec<String>),
    Rimraf(PathBuf),
    Log(LogTier, String),
    Copy { from: PathBuf, to: PathBuf },
    CopyStaticFiles(PathBuf),
    CopyClientFiles(PathBuf),
    Prerender(PathBuf),
    WriteFile(PathBuf),
}

impl HostCall {
    /// Operation name, as accepted by [`MemoryHost::fail_on`].
    pub fn operation(&self) -> &'static str {
        match self {
            Self::UpdateIgnores(_) => "update_ignores",
            Self::Rimraf(_) => "rimraf",
            Self::Log(..) => "log",
            Self::Copy { .. } => "copy",
            Self::CopyStaticFiles(_) => "copy_static_files",
            Self::CopyClientFiles(_) => "copy_client_files",
            Self::Prerender(_) => "prerender",
            Self::WriteFile(_) => "write_file",
        }
    }
}

/// In-memory host for testing.
///
/// Files live in a flat path → contents map. Static assets are read from
/// `static/`, client assets from `.svelte-kit/output/client/`, and
/// prerendering writes the pages registered with
/// [`MemoryHost::with_prerendered_page`].
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    inner: Arc<RwLock<MemoryHostInner>>,
}

#[derive(Debug, Default)]
struct MemoryHostInner {
    files: BTreeMap<PathBuf, String>,
    calls: Vec<HostCall>,
    ignore_patterns: Vec<String>,
    prerendered: BTreeMap<PathBuf, String>,
    fail_on: Option<&'static str>,
}

const STATIC_SOURCE: &str = "static";
const CLIENT_SOURCE: &str = ".svelte-kit/output/client";

impl MemoryHost {
    /// Create a new empty memory host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page the prerender step will emit, relative to its destination.
    pub fn with_prerendered_page(self, path: impl Into<PathBuf>, html: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.prerendered.insert(path.into(), html.into());
        }
        self
    }

    /// Make every call to `operation` fail with a host error.
    pub fn fail_on(self, operation: &'static str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_on = Some(operation);
        }
        self
    }

    /// Put a file without recording a host call (what a bundler or the
    /// framework build would leave behind).
    pub fn put_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.files.insert(path.into(), contents.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.keys().any(|p| p.starts_with(path))
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.keys().cloned().collect()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<HostCall> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.calls.clone()
    }

    pub fn ignore_patterns(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.ignore_patterns.clone()
    }

    /// Record `call`, failing if it was configured to fail.
    fn record(&self, call: HostCall) -> AdapterResult<std::sync::RwLockWriteGuard<'_, MemoryHostInner>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| AdapterError::Internal {
                message: "memory host lock poisoned".into(),
            })?;
        let operation = call.operation();
        inner.calls.push(call);
        if inner.fail_on == Some(operation) {
            return Err(AdapterError::Host {
                operation,
                reason: "simulated failure".into(),
            });
        }
        Ok(inner)
    }
}

/// Copy every file under `from` (or `from` itself) to the matching path
/// under `to`. Returns how many files were copied.
fn copy_entries(files: &mut BTreeMap<PathBuf, String>, from: &Path, to: &Path) -> usize {
    let copies: Vec<(PathBuf, String)> = files
        .iter()
        .filter_map(|(path, contents)| {
            let relative = path.strip_prefix(from).ok()?;
            let target = if relative.as_os_str().is_empty() {
                to.to_path_buf()
            } else {
                to.join(relative)
            };
            Some((target, contents.clone()))
        })
        .collect();
    let count = copies.len();
    files.extend(copies);
    count
}

#[async_trait]
impl Host for MemoryHost {
    fn update_ignores(&self, patterns: &[String]) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::UpdateIgnores(patterns.to_vec()))?;
        for pattern in patterns {
            if !inner.ignore_patterns.contains(pattern) {
                inner.ignore_patterns.push(pattern.clone());
            }
        }
        Ok(())
    }

    fn rimraf(&self, path: &Path) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::Rimraf(path.to_path_buf()))?;
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn log(&self, tier: LogTier, message: &str) {
        drop(self.record(HostCall::Log(tier, message.to_string())));
    }

    fn copy(&self, from: &Path, to: &Path) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        })?;
        if copy_entries(&mut inner.files, from, to) == 0 {
            return Err(AdapterError::Filesystem {
                path: from.to_path_buf(),
                reason: "No such file or directory".into(),
            });
        }
        Ok(())
    }

    fn copy_static_files(&self, dest: &Path) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::CopyStaticFiles(dest.to_path_buf()))?;
        copy_entries(&mut inner.files, Path::new(STATIC_SOURCE), dest);
        Ok(())
    }

    fn copy_client_files(&self, dest: &Path) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::CopyClientFiles(dest.to_path_buf()))?;
        copy_entries(&mut inner.files, Path::new(CLIENT_SOURCE), dest);
        Ok(())
    }

    async fn prerender(&self, dest: &Path) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::Prerender(dest.to_path_buf()))?;
        let pages: Vec<(PathBuf, String)> = inner
            .prerendered
            .iter()
            .map(|(path, html)| (dest.join(path), html.clone()))
            .collect();
        inner.files.extend(pages);
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &str) -> AdapterResult<()> {
        let mut inner = self.record(HostCall::WriteFile(path.to_path_buf()))?;
        inner.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
