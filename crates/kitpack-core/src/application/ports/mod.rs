//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kitpack-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Host`: capabilities of the build system that runs the adapter
//!   - `Bundler`: compiles the server entry point into one file
//!   - `BundleOverride`: caller hook that replaces the default bundle options
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{BundleOverride, Bundler, Host, LogTier};

#[cfg(test)]
pub use output::MockBundler;
