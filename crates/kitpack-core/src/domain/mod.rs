//! Core domain layer for kitpack.
//!
//! Pure values computed once per adapt run and then discarded. Nothing in
//! here touches the filesystem or spawns processes; that is what the ports in
//! `crate::application::ports` are for.
//!
//! - [`OutputLayout`]: every path the adapter writes, derived from one root
//! - [`BundleConfig`]: options handed to the bundler
//! - [`PackageManifest`]: the module-type declaration next to the bundle

pub mod bundle;
pub mod error;
pub mod layout;
pub mod manifest;

pub use bundle::{BundleConfig, Platform};
pub use error::{DomainError, ErrorCategory};
pub use layout::{
    DEFAULT_OUTPUT_DIR, ENTRY_SCRIPT, OutputLayout, SCRATCH_DIR, SHIM_SCRIPT, TemplateFiles,
};
pub use manifest::PackageManifest;
