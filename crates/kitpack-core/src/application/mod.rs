//! Application layer for kitpack.
//!
//! This layer contains:
//! - **Services**: the adapt use case ([`Adapter`])
//! - **Ports**: interface definitions (traits) for the host build system,
//!   the bundler, and caller-supplied bundle overrides
//!
//! The application layer sequences calls; paths and option shapes come from
//! `crate::domain`.

pub mod ports;
pub mod services;

pub use services::{AdaptReport, Adapter, AdapterBuilder};

pub use ports::{BundleOverride, Bundler, Host, LogTier};
