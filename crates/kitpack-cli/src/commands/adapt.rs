//! `kitpack adapt`: package a finished framework build for Vercel.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, instrument};

use kitpack_adapters::{EsbuildBundler, LocalHost, builtin_files};
use kitpack_core::{
    application::{AdaptReport, Adapter, ports::BundleOverride},
    domain::{BundleConfig, OutputLayout},
    error::{AdapterError, AdapterResult},
};

use crate::{
    cli::{AdaptArgs, OutputFormat},
    commands::layout::layout_json,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Bundle options read from a JSON file. The file's contents replace the
/// adapter's defaults wholesale.
#[derive(Debug, Clone)]
pub struct OptionsFile {
    path: PathBuf,
}

impl OptionsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BundleOverride for OptionsFile {
    async fn transform(&self, defaults: BundleConfig) -> AdapterResult<BundleConfig> {
        debug!(
            path = %self.path.display(),
            replaced_entry_points = ?defaults.entry_points,
            "Reading bundle options"
        );
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AdapterError::Override {
                reason: format!("cannot read {}: {e}", self.path.display()),
            })?;
        BundleConfig::from_json(&text).map_err(|e| AdapterError::Override {
            reason: format!("{}: {e}", self.path.display()),
        })
    }
}

/// Everything `adapt` needs, with flags merged over configuration.
#[derive(Debug)]
struct Plan {
    project: PathBuf,
    output_dir: PathBuf,
    files_dir: Option<PathBuf>,
    options_file: Option<PathBuf>,
    esbuild: Option<PathBuf>,
}

impl Plan {
    /// Flag paths are relative to the current directory; config paths are
    /// relative to the project.
    fn resolve(args: &AdaptArgs, config: &AppConfig) -> CliResult<Self> {
        let project = args.project.canonicalize().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CliError::ProjectNotFound {
                    path: args.project.clone(),
                }
            } else {
                CliError::IoError {
                    message: format!("Cannot access '{}'", args.project.display()),
                    source: e,
                }
            }
        })?;

        let from_config = |p: &Option<PathBuf>| p.as_ref().map(|p| project.join(p));

        Ok(Self {
            output_dir: args
                .out
                .clone()
                .unwrap_or_else(|| config.adapter.output_dir.clone()),
            files_dir: args
                .files
                .as_deref()
                .map(absolute_dir)
                .transpose()?
                .or_else(|| from_config(&config.adapter.files_dir)),
            options_file: args
                .bundle_options
                .clone()
                .or_else(|| from_config(&config.bundler.options_file)),
            esbuild: args
                .esbuild
                .as_deref()
                .map(absolute_program)
                .transpose()?
                .or_else(|| {
                    config.bundler.esbuild_path.as_ref().map(|p| {
                        if is_bare(p) { p.clone() } else { project.join(p) }
                    })
                }),
            project,
        })
    }

    fn bundler(&self) -> EsbuildBundler {
        match &self.esbuild {
            Some(binary) => EsbuildBundler::with_binary(binary, &self.project),
            None => EsbuildBundler::new(&self.project),
        }
    }

    fn build_adapter(&self, files_dir: &Path) -> CliResult<Adapter> {
        let mut builder = Adapter::builder()
            .output_dir(&self.output_dir)
            .files_dir(files_dir)
            .bundler(Box::new(self.bundler()));
        if let Some(path) = &self.options_file {
            builder = builder.bundle_override(OptionsFile::new(path));
        }
        Ok(builder.build()?)
    }
}

/// esbuild runs inside the project directory, so a relative program path
/// given on the command line must be pinned to the current directory first.
/// A bare name is left for `PATH` lookup.
fn absolute_program(path: &Path) -> CliResult<PathBuf> {
    if is_bare(path) {
        return Ok(path.to_path_buf());
    }
    absolute_dir(path)
}

fn absolute_dir(path: &Path) -> CliResult<PathBuf> {
    std::path::absolute(path).map_err(|e| CliError::IoError {
        message: format!("Cannot resolve '{}'", path.display()),
        source: e,
    })
}

fn is_bare(path: &Path) -> bool {
    path.components().count() < 2
}

#[instrument(skip_all, fields(project = %args.project.display()))]
pub async fn execute(args: AdaptArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let plan = Plan::resolve(&args, &config)?;
    debug!(?plan, "Resolved adapt plan");

    if args.dry_run {
        return dry_run(&plan, &output);
    }

    let mut host_config = config.host.clone();
    if let Some(cmd) = args.prerender {
        host_config.prerender_command = Some(cmd);
    }

    let files_dir = builtin_files::resolve_files_dir(plan.files_dir.as_deref(), &plan.project)
        .with_cli_context(|| "resolving template files")?;
    let adapter = plan.build_adapter(&files_dir)?;
    let host = LocalHost::with_config(&plan.project, host_config);

    let spinner = output.spinner("Adapting build output for Vercel...");
    let result = adapter.adapt(&host).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = result?;
    info!(output_dir = %report.output_dir.display(), "Build output written");

    print_report(&report, &output)
}

fn dry_run(plan: &Plan, output: &OutputManager) -> CliResult<()> {
    let files = plan
        .files_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<embedded>".into());
    let adapter = plan.build_adapter(Path::new(&files))?;
    let defaults = adapter.default_bundle_config();

    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "project": plan.project,
            "layout": layout_json(adapter.layout()),
            "filesDir": files,
            "bundleOptions": defaults,
            "bundleOptionsFile": plan.options_file,
            "esbuild": adapter_binary(plan),
        }))?;
        return Ok(());
    }

    output.header("Dry run: nothing will be written")?;
    output.print(&format!("  project       {}", plan.project.display()))?;
    print_layout(adapter.layout(), output)?;
    output.print(&format!("  templates     {files}"))?;
    output.print(&format!("  esbuild       {}", adapter_binary(plan)))?;
    match &plan.options_file {
        Some(path) => output.print(&format!(
            "  bundle opts   {} (replaces the defaults)",
            path.display()
        ))?,
        None => {
            let text = defaults.to_json_pretty().map_err(AdapterError::from)?;
            output.print("  bundle opts   defaults:")?;
            for line in text.lines() {
                output.print(&format!("    {line}"))?;
            }
        }
    }
    Ok(())
}

fn adapter_binary(plan: &Plan) -> String {
    plan.bundler().binary().display().to_string()
}

fn print_layout(layout: &OutputLayout, output: &OutputManager) -> CliResult<()> {
    output.print(&format!("  output        {}", layout.root().display()))?;
    output.print(&format!("  function      {}", layout.bundle_file().display()))?;
    output.print(&format!("  static        {}", layout.static_dir().display()))?;
    output.print(&format!("  routes        {}", layout.routes_file().display()))?;
    Ok(())
}

fn print_report(report: &AdaptReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "outputDir": report.output_dir,
            "bundleFile": report.bundle_file,
            "staticDir": report.static_dir,
            "routesFile": report.routes_file,
            "bundleOptions": report.bundle_config,
            "overrideApplied": report.override_applied,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Build output written to {}",
        report.output_dir.display()
    ))?;
    if report.override_applied {
        output.info("Bundled with custom bundle options")?;
    }
    Ok(())
}
