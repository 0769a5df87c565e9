use thiserror::Error;

/// Root domain error type.
///
/// Raised only when parsing values that arrive as text (config files, CLI
/// flags). The adapt run itself never produces a domain error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("unknown bundler platform '{value}'")]
    UnknownPlatform { value: String },

    #[error("output directory must not be empty")]
    EmptyOutputDir,

    #[error("invalid bundle options: {reason}")]
    InvalidBundleOptions { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownPlatform { value } => vec![
                format!("'{}' is not a bundler platform", value),
                "Supported platforms: node, browser, neutral".into(),
            ],
            Self::EmptyOutputDir => vec![
                "Pass a directory name with --out".into(),
                "Or remove adapter.output_dir from kitpack.toml to use the default".into(),
            ],
            Self::InvalidBundleOptions { reason } => vec![
                format!("Details: {}", reason),
                "Bundle options must be a JSON object with entryPoints and outfile".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownPlatform { .. } | Self::EmptyOutputDir => ErrorCategory::Validation,
            Self::InvalidBundleOptions { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
