//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kitpack",
    bin_name = "kitpack",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{25b2} Package a framework build for Vercel",
    long_about = "kitpack turns the output of a finished framework build into \
                  Vercel's Build Output layout: a bundled serverless render \
                  function, static assets, and a routing table.",
    after_help = "EXAMPLES:\n\
        \x20 kitpack adapt\n\
        \x20 kitpack adapt --project ./web --out .vercel_build_output\n\
        \x20 kitpack adapt --bundle-options esbuild.json\n\
        \x20 kitpack completions bash > /usr/share/bash-completion/completions/kitpack",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Package the current build for Vercel.
    #[command(
        visible_alias = "a",
        about = "Package the build output for Vercel",
        after_help = "EXAMPLES:\n\
            \x20 kitpack adapt\n\
            \x20 kitpack adapt --project ./web\n\
            \x20 kitpack adapt --esbuild ./node_modules/.bin/esbuild\n\
            \x20 kitpack adapt --dry-run --output-format json"
    )]
    Adapt(AdaptArgs),

    /// Show where every output file goes.
    #[command(
        about = "Print the output layout",
        after_help = "EXAMPLES:\n\
            \x20 kitpack layout\n\
            \x20 kitpack layout --out dist --output-format json"
    )]
    Layout(LayoutArgs),

    /// Initialise a kitpack configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kitpack init           # ./kitpack.toml\n\
            \x20 kitpack init --global  # user config directory\n\
            \x20 kitpack init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kitpack completions bash > ~/.local/share/bash-completion/completions/kitpack\n\
            \x20 kitpack completions zsh  > ~/.zfunc/_kitpack\n\
            \x20 kitpack completions fish > ~/.config/fish/completions/kitpack.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the kitpack configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kitpack config get adapter.output_dir\n\
            \x20 kitpack config list\n\
            \x20 kitpack config path"
    )]
    Config(ConfigCommands),
}

// ── adapt ─────────────────────────────────────────────────────────────────────

/// Arguments for `kitpack adapt`.
#[derive(Debug, Args)]
pub struct AdaptArgs {
    /// Project directory holding the finished framework build.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub project: PathBuf,

    /// Root of the build output, relative to the project.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (default: .vercel_build_output)"
    )]
    pub out: Option<PathBuf>,

    /// Directory holding entry.js, shims.js and routes.json.
    #[arg(
        long = "files",
        value_name = "DIR",
        env = "KITPACK_FILES_DIR",
        help = "Template files directory (default: embedded templates)"
    )]
    pub files: Option<PathBuf>,

    /// JSON file with complete bundle options; replaces the defaults verbatim.
    #[arg(
        long = "bundle-options",
        value_name = "FILE",
        help = "Bundle options file (replaces the defaults, no merging)"
    )]
    pub bundle_options: Option<PathBuf>,

    /// esbuild executable to run.
    #[arg(long = "esbuild", value_name = "PATH", help = "Path to the esbuild binary")]
    pub esbuild: Option<PathBuf>,

    /// Shell command that prerenders pages into `{dest}`.
    #[arg(
        long = "prerender",
        value_name = "CMD",
        help = "Prerender command ({dest} is replaced with the static directory)"
    )]
    pub prerender: Option<String>,

    /// Print the plan without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── layout ────────────────────────────────────────────────────────────────────

/// Arguments for `kitpack layout`.
#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Root of the build output.
    #[arg(short = 'o', long = "out", value_name = "DIR", help = "Output directory")]
    pub out: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kitpack init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user configuration directory instead of `./kitpack.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kitpack completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kitpack config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `adapter.output_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_adapt_defaults() {
        let cli = Cli::parse_from(["kitpack", "adapt"]);
        let Commands::Adapt(args) = cli.command else {
            panic!("expected Adapt command");
        };
        assert_eq!(args.project, PathBuf::from("."));
        assert!(args.out.is_none());
        assert!(args.bundle_options.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn parse_adapt_flags() {
        let cli = Cli::parse_from([
            "kitpack",
            "adapt",
            "--project",
            "web",
            "--out",
            "dist",
            "--bundle-options",
            "esbuild.json",
            "--esbuild",
            "/usr/bin/esbuild",
            "--prerender",
            "node prerender.js {dest}",
            "--dry-run",
        ]);
        let Commands::Adapt(args) = cli.command else {
            panic!("expected Adapt command");
        };
        assert_eq!(args.project, PathBuf::from("web"));
        assert_eq!(args.out, Some(PathBuf::from("dist")));
        assert_eq!(args.bundle_options, Some(PathBuf::from("esbuild.json")));
        assert_eq!(args.esbuild, Some(PathBuf::from("/usr/bin/esbuild")));
        assert_eq!(args.prerender.as_deref(), Some("node prerender.js {dest}"));
        assert!(args.dry_run);
    }

    #[test]
    fn adapt_alias() {
        let cli = Cli::parse_from(["kitpack", "a", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Adapt(_)));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["kitpack", "--quiet", "--verbose", "layout"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_get_requires_key() {
        assert!(Cli::try_parse_from(["kitpack", "config", "get"]).is_err());
        let cli = Cli::parse_from(["kitpack", "config", "get", "adapter.output_dir"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Get { ref key }) if key == "adapter.output_dir"
        ));
    }
}
