//! Unified error handling for kitpack Core.
//!
//! The adapt run never classifies or wraps what a collaborator reports: a
//! host or bundler implementation builds one of these variants and the
//! adapter hands it back to its caller as is.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Root error type for kitpack Core operations.
#[derive(Debug, Error, Clone)]
pub enum AdapterError {
    /// Invalid values parsed from configuration or flags.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A host capability (ignore registration, copy, logging...) failed.
    #[error("Host operation '{operation}' failed: {reason}")]
    Host {
        operation: &'static str,
        reason: String,
    },

    /// A filesystem read or write failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// The bundler rejected the configuration or failed to compile.
    #[error("Bundler failed: {reason}")]
    Bundler { reason: String },

    /// Static prerendering failed.
    #[error("Prerendering failed: {reason}")]
    Prerender { reason: String },

    /// The caller's bundle-option override failed.
    #[error("Bundle option override failed: {reason}")]
    Override { reason: String },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl AdapterError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Host { operation, .. } => vec![
                format!("The '{}' step could not complete", operation),
                "Check that the framework build finished before adapting".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the template files directory exists".into(),
            ],
            Self::Bundler { .. } => vec![
                "Check the bundler output above for compile errors".into(),
                "Ensure esbuild is installed: npm install --save-dev esbuild".into(),
                "Or point at a binary with --esbuild <PATH>".into(),
            ],
            Self::Prerender { .. } => vec![
                "A page failed to prerender; see the output above".into(),
                "Check host.prerender_command in kitpack.toml".into(),
            ],
            Self::Override { .. } => vec![
                "The bundle options override returned an error".into(),
                "Bundle options must be a complete configuration; nothing is merged".into(),
            ],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in kitpack".into(),
                "Please report this issue at: https://github.com/cosecruz/kitpack/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Filesystem { .. } => ErrorCategory::NotFound,
            Self::Bundler { .. } | Self::Prerender { .. } => ErrorCategory::Build,
            Self::Override { .. } => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Host { .. } | Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Build,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type AdapterResult<T> = Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundler_error_is_build_category() {
        let err = AdapterError::Bundler {
            reason: "boom".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Build);
        assert!(err.suggestions().iter().any(|s| s.contains("esbuild")));
    }

    #[test]
    fn domain_errors_convert() {
        let err: AdapterError = DomainError::EmptyOutputDir.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("must not be empty"));
    }
}
