//! Application services - orchestrate use cases.
//!
//! [`InitPipeline`] drives the ordered [`StepKind`] catalogue against the
//! ports.

pub mod init_pipeline;
pub mod steps;

pub use init_pipeline::{InitPipeline, InitReport};
pub use steps::{FailurePolicy, StepKind, StepOutcome};
