//! Application services - orchestrate use cases.

pub mod adapter;

pub use adapter::{AdaptReport, Adapter, AdapterBuilder};
