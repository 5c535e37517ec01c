//! Application layer for Sprout.
//!
//! This layer contains:
//! - **Services**: the initialization pipeline and its step catalogue
//! - **Ports**: Interface definitions (traits) for external collaborators
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences domain operations and collaborator calls;
//! text transformations themselves live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{FailurePolicy, InitPipeline, InitReport, StepKind, StepOutcome};

pub use ports::{
    Filesystem, PackageManager, ProgressReporter, Removal, SilentReporter, VersionControl,
};

pub use error::ApplicationError;
