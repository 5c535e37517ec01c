//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! project bootstrapper, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! │   (argument parsing, config, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (InitPipeline + StepKind catalogue)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, VersionControl, Package-   │
//! │  Manager, ProgressReporter)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sprout-adapters (Infrastructure)    │
//! │ (LocalFilesystem, GitCli, NodePackage-  │
//! │  Manager, MemoryFilesystem)             │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectTarget, Manifest, Blueprint,    │
//! │  LayoutPatch, RenderContext)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_core::prelude::*;
//!
//! let target = ProjectTarget::resolve("my-app", &std::env::current_dir()?)?;
//! let pipeline = InitPipeline::new(Blueprint::default(), filesystem, vcs, packages);
//! let report = pipeline.run(target, &SilentReporter)?;
//! println!("{}", report.project_name);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InitPipeline, InitReport, SilentReporter,
        ports::{Filesystem, PackageManager, ProgressReporter, Removal, VersionControl},
        services::{FailurePolicy, StepKind, StepOutcome},
    };
    pub use crate::domain::{
        Blueprint, LayoutPatch, Manifest, ProjectTarget, RenderContext, Script, ScriptSummary,
    };
    pub use crate::error::{SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
