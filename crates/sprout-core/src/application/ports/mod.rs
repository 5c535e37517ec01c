//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprout-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `VersionControl`: Clone and re-initialise repositories
//!   - `PackageManager`: Dependency installation
//!   - `ProgressReporter`: Per-step progress notifications

pub mod output;

pub use output::{
    Filesystem, PackageManager, ProgressReporter, Removal, SilentReporter, VersionControl,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageManager, MockVersionControl};
