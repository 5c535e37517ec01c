//! Infrastructure adapters for Sprout.
//!
//! This crate implements the ports defined in `sprout-core::application::ports`.
//! It contains all I/O: the filesystem and the external programs (git and the
//! Node package managers) the pipeline drives.

pub mod filesystem;
pub mod package_manager;
pub mod process;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use package_manager::{NodePackageManager, PackageManagerKind, UnknownPackageManager};
pub use process::{
    CommandOutput, CommandRunner, CommandSpec, ProcessError, RecordingRunner, SystemRunner,
};
pub use vcs::GitCli;
