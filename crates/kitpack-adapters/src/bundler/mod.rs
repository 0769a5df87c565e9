//! Bundler adapters.

mod esbuild;
mod flags;
mod recording;

pub use esbuild::EsbuildBundler;
pub use flags::to_cli_args;
pub use recording::RecordingBundler;
