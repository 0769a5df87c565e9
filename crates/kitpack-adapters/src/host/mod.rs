//! Host adapters.

mod local;
mod memory;

pub use local::{HostConfig, IGNORE_FILES, LocalHost};
pub use memory::{HostCall, MemoryHost};
