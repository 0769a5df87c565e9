//! Infrastructure adapters for kitpack.
//!
//! This crate implements the ports defined in `kitpack-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_files;
pub mod bundler;
pub mod host;

// Re-export commonly used adapters
pub use bundler::{EsbuildBundler, RecordingBundler};
pub use host::{HostCall, HostConfig, LocalHost, MemoryHost};
