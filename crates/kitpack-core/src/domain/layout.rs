//! Output layout for Vercel's Build Output API (v1).
//!
//! ```text
//! <root>/
//! ├── static/                        prerendered pages, static and client assets
//! ├── functions/node/render/
//! │   ├── index.js                   bundled server entry point
//! │   └── package.json               {"type":"commonjs"}
//! └── config/routes.json             routing table
//! ```

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Default root of the build output.
pub const DEFAULT_OUTPUT_DIR: &str = ".vercel_build_output";

/// Scratch directory the entry script and shim are materialized into.
pub const SCRATCH_DIR: &str = ".svelte-kit/vercel";

/// Entry point handed to the bundler.
pub const ENTRY_SCRIPT: &str = ".svelte-kit/vercel/entry.js";

/// Materialized runtime shim injected into the bundle.
pub const SHIM_SCRIPT: &str = ".svelte-kit/vercel/shims.js";

const STATIC_DIR: &str = "static";
const LAMBDA_DIR: &str = "functions/node/render";
const ROUTES_FILE: &str = "config/routes.json";

/// Every path the adapter writes, derived from a single root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like [`OutputLayout::new`], but rejects an empty root, which would make
    /// the stale-output removal target the project directory itself.
    pub fn try_new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(DomainError::EmptyOutputDir);
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }

    /// Directory of the serverless render function.
    pub fn lambda_dir(&self) -> PathBuf {
        self.root.join(LAMBDA_DIR)
    }

    pub fn bundle_file(&self) -> PathBuf {
        self.lambda_dir().join("index.js")
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.lambda_dir().join("package.json")
    }

    pub fn routes_file(&self) -> PathBuf {
        self.root.join(ROUTES_FILE)
    }

    /// The ignore pattern registered with version control.
    pub fn ignore_pattern(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

/// The adapter's bundled template files, located under one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFiles {
    dir: PathBuf,
}

impl TemplateFiles {
    pub const ENTRY: &'static str = "entry.js";
    pub const SHIMS: &'static str = "shims.js";
    pub const ROUTES: &'static str = "routes.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry(&self) -> PathBuf {
        self.dir.join(Self::ENTRY)
    }

    pub fn shims(&self) -> PathBuf {
        self.dir.join(Self::SHIMS)
    }

    pub fn routes(&self) -> PathBuf {
        self.dir.join(Self::ROUTES)
    }
}
