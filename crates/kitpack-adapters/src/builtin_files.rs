//! Template files that ship with kitpack.
//!
//! The adapter copies `entry.js`, `shims.js` and `routes.json` from a
//! template directory. [`resolve_files_dir`] decides which directory that is.
//!
//! # Resolution order
//!
//! 1. **An explicit directory** (`--files` / `adapter.files_dir`).
//! 2. **`$KITPACK_FILES_DIR`**, an environment variable override.
//! 3. **The embedded copies**, installed into
//!    `<project>/.svelte-kit/kitpack/files` on every run so they always match
//!    the running binary.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use kitpack_core::{
    domain::TemplateFiles,
    error::{AdapterError, AdapterResult},
};

pub const ENTRY_JS: &str = include_str!("../files/entry.js");
pub const SHIMS_JS: &str = include_str!("../files/shims.js");
pub const ROUTES_JSON: &str = include_str!("../files/routes.json");

/// Environment variable naming a template directory.
pub const FILES_DIR_ENV: &str = "KITPACK_FILES_DIR";

/// Install location of the embedded templates, relative to the project.
pub const INSTALL_DIR: &str = ".svelte-kit/kitpack/files";

/// File name → contents for every embedded template.
pub fn all() -> [(&'static str, &'static str); 3] {
    [
        (TemplateFiles::ENTRY, ENTRY_JS),
        (TemplateFiles::SHIMS, SHIMS_JS),
        (TemplateFiles::ROUTES, ROUTES_JSON),
    ]
}

/// Write the embedded templates into `dir`, overwriting older copies.
pub fn install(dir: &Path) -> AdapterResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| AdapterError::Filesystem {
        path: dir.to_path_buf(),
        reason: format!("Failed to create directory: {e}"),
    })?;

    for (name, contents) in all() {
        let path = dir.join(name);
        std::fs::write(&path, contents).map_err(|e| AdapterError::Filesystem {
            path: path.clone(),
            reason: format!("Failed to write template: {e}"),
        })?;
    }
    debug!(dir = %dir.display(), "Embedded templates installed");
    Ok(dir.to_path_buf())
}

/// Pick the template directory for the project at `project_dir`.
#[instrument(skip_all)]
pub fn resolve_files_dir(explicit: Option<&Path>, project_dir: &Path) -> AdapterResult<PathBuf> {
    if let Some(dir) = explicit {
        info!(dir = %dir.display(), "Using template files from configuration");
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(FILES_DIR_ENV) {
        let dir = PathBuf::from(dir);
        info!(dir = %dir.display(), "Using template files from {FILES_DIR_ENV}");
        return Ok(dir);
    }

    install(&project_dir.join(INSTALL_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn routes_template_is_valid_json() {
        let routes: serde_json::Value = serde_json::from_str(ROUTES_JSON).unwrap();
        assert_eq!(routes[0]["handle"], "filesystem");
        assert_eq!(routes[1]["dest"], ".vercel/functions/render");
    }

    #[test]
    fn entry_imports_server_app() {
        assert!(ENTRY_JS.contains("../output/server/app.js"));
        assert!(SHIMS_JS.contains("fetch"));
    }

    #[test]
    fn install_writes_every_template() {
        let dir = TempDir::new().unwrap();
        let files = install(&dir.path().join("files")).unwrap();

        for (name, contents) in all() {
            assert_eq!(std::fs::read_to_string(files.join(name)).unwrap(), contents);
        }
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_files_dir(Some(Path::new("my/files")), dir.path()).unwrap();
        assert_eq!(resolved, PathBuf::from("my/files"));
        assert!(!dir.path().join(INSTALL_DIR).exists());
    }
}
