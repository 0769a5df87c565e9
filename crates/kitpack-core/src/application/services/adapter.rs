//! Adapter - the adapt use case.
//!
//! Turns a finished framework build into Vercel's Build Output layout:
//! 1. Register the output directory with the ignore files
//! 2. Remove stale output
//! 3. Materialize the entry script and runtime shim
//! 4. Bundle the render function (options optionally overridden)
//! 5. Write the function's `package.json`
//! 6. Prerender static pages
//! 7. Copy static and client assets
//! 8. Copy the routing table
//!
//! Steps run strictly in order. The first failure ends the run and is
//! returned unchanged; nothing is rolled back.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{BundleOverride, Bundler, Host, LogTier},
    domain::{
        BundleConfig, DEFAULT_OUTPUT_DIR, ENTRY_SCRIPT, OutputLayout, PackageManifest,
        SHIM_SCRIPT, TemplateFiles,
    },
    error::{AdapterError, AdapterResult},
};

/// What an adapt run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptReport {
    pub output_dir: PathBuf,
    /// Where the default options put the render function. An override may
    /// have sent it elsewhere.
    pub bundle_file: PathBuf,
    pub static_dir: PathBuf,
    pub routes_file: PathBuf,
    /// The options the bundler was actually invoked with.
    pub bundle_config: BundleConfig,
    pub override_applied: bool,
}

/// Packages a framework build for Vercel.
pub struct Adapter {
    layout: OutputLayout,
    files: TemplateFiles,
    bundler: Box<dyn Bundler>,
    bundle_override: Option<Box<dyn BundleOverride>>,
}

impl Adapter {
    pub const NAME: &'static str = "kitpack-vercel";

    /// Create an adapter with the default output directory and no override.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kitpack_core::application::{Adapter, ports::Bundler};
    ///
    /// # fn make(bundler: Box<dyn Bundler>) {
    /// let adapter = Adapter::new("./files", bundler);
    /// # }
    /// ```
    pub fn new(files_dir: impl Into<PathBuf>, bundler: Box<dyn Bundler>) -> Self {
        Self {
            layout: OutputLayout::default(),
            files: TemplateFiles::new(files_dir),
            bundler,
            bundle_override: None,
        }
    }

    pub fn builder() -> AdapterBuilder {
        AdapterBuilder::default()
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn files(&self) -> &TemplateFiles {
        &self.files
    }

    pub fn has_override(&self) -> bool {
        self.bundle_override.is_some()
    }

    /// Bundle options used when no override is configured.
    pub fn default_bundle_config(&self) -> BundleConfig {
        BundleConfig::for_render_function(
            ENTRY_SCRIPT,
            &self.layout.bundle_file(),
            Path::new(SHIM_SCRIPT),
        )
    }

    /// Run the adapt procedure against `host`.
    #[instrument(
        skip_all,
        fields(
            adapter = Self::NAME,
            output_dir = %self.layout.root().display()
        )
    )]
    pub async fn adapt(&self, host: &dyn Host) -> AdapterResult<AdaptReport> {
        let layout = &self.layout;
        info!("Adapting build output");

        // 1-2. Claim and clear the output directory
        host.update_ignores(&[layout.ignore_pattern()])?;
        host.rimraf(layout.root())?;
        debug!("Stale output removed");

        // 3. Materialize entry script and shim
        host.log(LogTier::Minor, "Generating serverless function...");
        host.copy(&self.files.entry(), Path::new(ENTRY_SCRIPT))?;
        host.copy(&self.files.shims(), Path::new(SHIM_SCRIPT))?;

        // 4. Bundle
        let defaults = self.default_bundle_config();
        let bundle_config = match &self.bundle_override {
            Some(hook) => hook.transform(defaults).await?,
            None => defaults,
        };
        debug!(
            entry_points = ?bundle_config.entry_points,
            outfile = ?bundle_config.outfile,
            overridden = self.bundle_override.is_some(),
            "Invoking bundler"
        );
        self.bundler.build(&bundle_config).await?;

        // 5. Module-type manifest
        host.write_file(
            &layout.manifest_file(),
            &PackageManifest::commonjs().to_json(),
        )?;

        // 6. Prerender
        host.log(LogTier::Minor, "Prerendering static pages...");
        host.prerender(&layout.static_dir()).await?;

        // 7. Assets
        host.log(LogTier::Minor, "Copying assets...");
        host.copy_static_files(&layout.static_dir())?;
        host.copy_client_files(&layout.static_dir())?;

        // 8. Routes
        host.log(LogTier::Minor, "Writing routes...");
        host.copy(&self.files.routes(), &layout.routes_file())?;

        info!("Adapt completed successfully");
        Ok(AdaptReport {
            output_dir: layout.root().to_path_buf(),
            bundle_file: layout.bundle_file(),
            static_dir: layout.static_dir(),
            routes_file: layout.routes_file(),
            bundle_config,
            override_applied: self.bundle_override.is_some(),
        })
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("layout", &self.layout)
            .field("files", &self.files)
            .field("has_override", &self.has_override())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Adapter`].
#[derive(Default)]
pub struct AdapterBuilder {
    output_dir: Option<PathBuf>,
    files_dir: Option<PathBuf>,
    bundler: Option<Box<dyn Bundler>>,
    bundle_override: Option<Box<dyn BundleOverride>>,
}

impl AdapterBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Directory holding `entry.js`, `shims.js` and `routes.json`.
    pub fn files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.files_dir = Some(dir.into());
        self
    }

    pub fn bundler(mut self, bundler: Box<dyn Bundler>) -> Self {
        self.bundler = Some(bundler);
        self
    }

    pub fn bundle_override(mut self, hook: impl BundleOverride + 'static) -> Self {
        self.bundle_override = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> AdapterResult<Adapter> {
        let layout = OutputLayout::try_new(
            self.output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        )?;
        let files_dir = self.files_dir.ok_or_else(|| AdapterError::Configuration {
            message: "template files directory not set".into(),
        })?;
        let bundler = self.bundler.ok_or_else(|| AdapterError::Configuration {
            message: "no bundler configured".into(),
        })?;

        Ok(Adapter {
            layout,
            files: TemplateFiles::new(files_dir),
            bundler,
            bundle_override: self.bundle_override,
        })
    }
}
