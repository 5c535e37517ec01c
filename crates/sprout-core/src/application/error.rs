//! Application layer errors.
//!
//! These errors represent failures of preconditions and collaborators, not
//! invalid data. Invalid data is `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target directory exists and already has entries.
    #[error("Directory {path} is not empty")]
    TargetNotEmpty { path: PathBuf },

    /// Target path exists but is not a directory.
    #[error("{path} exists and is not a directory")]
    TargetNotDirectory { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The version control collaborator failed.
    #[error("git {operation} failed: {reason}")]
    VersionControl {
        operation: &'static str,
        reason: String,
    },

    /// The package manager collaborator failed.
    #[error("{program} {operation} failed: {reason}")]
    PackageManager {
        program: String,
        operation: &'static str,
        reason: String,
    },

    /// A collaborator program could not be started at all.
    #[error("Could not run '{program}': {reason}")]
    ToolUnavailable { program: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetNotEmpty { path } => vec![
                format!("'{}' already contains files", path.display()),
                "Choose a new directory name, or empty the directory first".into(),
            ],
            Self::TargetNotDirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Choose a different project directory".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::VersionControl { operation, .. } => {
                let mut hints = vec![format!("The git {operation} step did not complete")];
                if *operation == "clone" {
                    hints.push("Check your network connection and the template URL".into());
                    hints.push("Remove any partially cloned directory before retrying".into());
                }
                hints
            }
            Self::PackageManager { program, .. } => vec![
                "The project was created but dependencies are not installed".into(),
                format!("Run '{program} install' inside the project to retry"),
            ],
            Self::ToolUnavailable { program, .. } => vec![
                format!("Ensure '{program}' is installed and in your PATH"),
                "Or point sprout at another executable in the config file".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetNotEmpty { .. } | Self::TargetNotDirectory { .. } => {
                ErrorCategory::Validation
            }
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::VersionControl { .. } | Self::PackageManager { .. } => ErrorCategory::External,
            Self::ToolUnavailable { .. } => ErrorCategory::NotFound,
        }
    }
}
