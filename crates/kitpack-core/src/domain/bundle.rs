//! Bundler options.
//!
//! Field names serialize to the bundler's own option names (`entryPoints`,
//! `outfile`, ...), so a JSON options file written for esbuild's JS API
//! deserializes into a [`BundleConfig`] unchanged. Options kitpack has no
//! typed field for land in [`BundleConfig::extra`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

// ── Platform ──────────────────────────────────────────────────────────────────

/// Runtime the bundle targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Server runtime; what Vercel's render function runs on.
    #[default]
    Node,
    Browser,
    Neutral,
}

impl Platform {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Browser => "browser",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "node" => Ok(Self::Node),
            "browser" => Ok(Self::Browser),
            "neutral" => Ok(Self::Neutral),
            other => Err(DomainError::UnknownPlatform {
                value: other.to_string(),
            }),
        }
    }
}

// ── BundleConfig ──────────────────────────────────────────────────────────────

/// Options for one bundler invocation.
///
/// Every field mirrors an optional bundler option; a config that omits
/// something the bundler needs is only caught by the bundler itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    #[serde(default)]
    pub entry_points: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfile: Option<PathBuf>,

    /// Inline every import into the output file.
    #[serde(default)]
    pub bundle: bool,

    /// Files whose exports are injected into every module.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inject: Vec<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Any other bundler option, keyed by its JS API name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BundleConfig {
    /// The configuration the adapter uses when nobody overrides it.
    pub fn for_render_function(entry: impl Into<String>, outfile: &Path, shim: &Path) -> Self {
        Self {
            entry_points: vec![entry.into()],
            outfile: Some(outfile.to_path_buf()),
            bundle: true,
            inject: vec![shim.to_path_buf()],
            platform: Some(Platform::Node),
            extra: BTreeMap::new(),
        }
    }

    /// Set an extra bundler option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Parse options from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text).map_err(|e| DomainError::InvalidBundleOptions {
            reason: e.to_string(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::InvalidBundleOptions {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> BundleConfig {
        BundleConfig::for_render_function(
            ".svelte-kit/vercel/entry.js",
            Path::new("out/functions/node/render/index.js"),
            Path::new(".svelte-kit/vercel/shims.js"),
        )
    }

    #[test]
    fn platform_parses() {
        assert_eq!("node".parse::<Platform>().unwrap(), Platform::Node);
        assert_eq!("Browser".parse::<Platform>().unwrap(), Platform::Browser);
        assert!(matches!(
            "deno".parse::<Platform>(),
            Err(DomainError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn serializes_with_bundler_option_names() {
        let value = serde_json::to_value(defaults()).unwrap();
        assert_eq!(
            value,
            json!({
                "entryPoints": [".svelte-kit/vercel/entry.js"],
                "outfile": "out/functions/node/render/index.js",
                "bundle": true,
                "inject": [".svelte-kit/vercel/shims.js"],
                "platform": "node"
            })
        );
    }

    #[test]
    fn unknown_options_are_kept() {
        let config = BundleConfig::from_json(
            r#"{"entryPoints":["a.js"],"outfile":"b.js","minify":true,"external":["fsevents"]}"#,
        )
        .unwrap();
        assert_eq!(config.entry_points, vec!["a.js".to_string()]);
        assert!(!config.bundle);
        assert_eq!(config.platform, None);
        assert_eq!(config.extra.get("minify"), Some(&json!(true)));
        assert_eq!(config.extra.get("external"), Some(&json!(["fsevents"])));
    }

    #[test]
    fn with_option_adds_extra() {
        let config = defaults().with_option("minify", true);
        assert_eq!(config.extra.get("minify"), Some(&json!(true)));
    }

    #[test]
    fn malformed_json_is_domain_error() {
        assert!(matches!(
            BundleConfig::from_json("not json"),
            Err(DomainError::InvalidBundleOptions { .. })
        ));
        assert!(matches!(
            BundleConfig::from_json(r#"{"bundle":"yes"}"#),
            Err(DomainError::InvalidBundleOptions { .. })
        ));
    }
}
