//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `sprout-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::services::StepKind;
use crate::error::{SproutError, SproutResult};

/// Result of a removal that tolerates a missing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// Nothing existed at the path.
    Absent,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFilesystem` (production)
/// - `sprout_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths handed to this port are always absolute.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// `true` if the directory has no entries at all (hidden ones included).
    fn is_empty_dir(&self, path: &Path) -> SproutResult<bool>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> SproutResult<String>;

    /// Write content to a file, replacing it. The parent must exist.
    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()>;

    /// Remove a single file. A missing file is [`Removal::Absent`].
    fn remove_file(&self, path: &Path) -> SproutResult<Removal>;

    /// Remove a directory and all contents. A missing directory is
    /// [`Removal::Absent`].
    fn remove_dir_all(&self, path: &Path) -> SproutResult<Removal>;
}

/// Port for the version control system.
///
/// Implemented by `sprout_adapters::vcs::GitCli`.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Directory holding repository metadata, relative to the repository root.
    fn metadata_dir(&self) -> PathBuf;

    /// Clone `url` (with history) into `destination`.
    fn clone_repository(&self, url: &str, destination: &Path) -> SproutResult<()>;

    /// Create an empty repository at `path`.
    fn init_repository(&self, path: &Path) -> SproutResult<()>;
}

/// Port for the package manager.
///
/// Implemented by `sprout_adapters::package_manager::NodePackageManager`.
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager: Send + Sync {
    /// Install dependencies declared by the manifest in `project_root`,
    /// with `project_root` as the working directory.
    fn install(&self, project_root: &Path) -> SproutResult<()>;

    /// The command a user types to run `script`, e.g. `npm run dev`.
    fn run_invocation(&self, script: &str) -> String;
}

/// Receives per-step progress from the pipeline.
///
/// For every step exactly one of `step_succeeded`, `step_warned` or
/// `step_failed` follows `step_started`.
pub trait ProgressReporter {
    fn step_started(&self, step: StepKind);

    fn step_succeeded(&self, step: StepKind);

    fn step_warned(&self, step: StepKind, message: &str);

    fn step_failed(&self, step: StepKind, error: &SproutError);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step_started(&self, _step: StepKind) {}

    fn step_succeeded(&self, _step: StepKind) {}

    fn step_warned(&self, _step: StepKind, _message: &str) {}

    fn step_failed(&self, _step: StepKind, _error: &SproutError) {}
}
