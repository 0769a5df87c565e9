//! Flags shared by every kitpack subcommand.
//!
//! Flattened into [`super::Cli`]; each one is also accepted after the
//! subcommand name (`kitpack adapt -vv`).

use clap::{Args, builder::FalseyValueParser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// How much of the adapt run to log on stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more of the adapt run (-v, -vv, -vvv)",
        long_help = "Log more of the adapt run on stderr:
    (none)  - warnings and failures only
    -v      - each adapt step as it starts
    -vv     - resolved paths, esbuild command lines, prerender commands
    -vvv    - everything, including host calls"
    )]
    pub verbose: u8,

    /// Only failures reach the terminal. JSON documents are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print failures only"
    )]
    pub quiet: bool,

    /// Plain glyphs, no ANSI styling. Any non-empty `NO_COLOR` other than
    /// `0`, `false`, `no` or `off` turns this on.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Read this kitpack.toml instead of the default locations.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Falls back to `output.format` from the configuration when `auto`.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How reports and layouts are printed"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// The format asked for on the command line, or `configured` when the
    /// flag was left at `auto`.
    pub fn requested_format(&self, configured: OutputFormat) -> OutputFormat {
        match self.output_format {
            OutputFormat::Auto => configured,
            explicit => explicit,
        }
    }
}

/// How reports, layouts and dry runs are rendered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Styled text with a progress spinner.
    Human,
    /// Unstyled text, one fact per line.
    Plain,
    /// A single JSON document on stdout.
    Json,
}
