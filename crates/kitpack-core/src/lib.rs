//! Kitpack Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for kitpack, the
//! tool that turns a framework build into Vercel's Build Output layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           kitpack-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │               (Adapter)                 │
//! │       Orchestrates the adapt run        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Host, Bundler, BundleOverride)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kitpack-adapters (Infrastructure)    │
//! │  (LocalHost, MemoryHost, EsbuildBundler)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (OutputLayout, BundleConfig, Manifest)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kitpack_core::prelude::*;
//!
//! # async fn run(host: &dyn Host, bundler: Box<dyn Bundler>) -> AdapterResult<()> {
//! let adapter = Adapter::new("./files", bundler);
//! let report = adapter.adapt(host).await?;
//! println!("bundle written to {}", report.bundle_file.display());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AdaptReport, Adapter, AdapterBuilder,
        ports::{BundleOverride, Bundler, Host, LogTier},
    };
    pub use crate::domain::{BundleConfig, OutputLayout, PackageManifest, Platform};
    pub use crate::error::{AdapterError, AdapterResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
