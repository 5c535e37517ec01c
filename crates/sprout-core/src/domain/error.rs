use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid project directory '{path}': {reason}")]
    InvalidTarget { path: String, reason: String },

    #[error("Invalid package.json: {reason}")]
    InvalidManifest { reason: String },

    #[error("Invalid package.json: top-level value must be an object, found {found}")]
    ManifestNotObject { found: &'static str },

    #[error("Invalid text pattern: {reason}")]
    InvalidPattern { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTarget { .. } => vec![
                "Pass a directory whose last component is a usable project name".into(),
                "Examples: my-app, ./apps/web, /tmp/demo".into(),
            ],
            Self::InvalidManifest { .. } | Self::ManifestNotObject { .. } => vec![
                "The template's package.json could not be rewritten".into(),
                "Check that the template repository contains a valid package.json".into(),
            ],
            Self::InvalidPattern { .. } => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTarget { .. }
            | Self::InvalidManifest { .. }
            | Self::ManifestNotObject { .. } => ErrorCategory::Validation,
            Self::InvalidPattern { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
