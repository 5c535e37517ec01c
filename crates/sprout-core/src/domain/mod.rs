//! Core domain layer for Sprout.
//!
//! This module contains pure logic with no I/O. Reading and writing files,
//! cloning, and installing are handled via ports (traits) defined in the
//! application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Text in, text out**: manifest rewriting and layout patching operate on
//!   strings so they are testable without a filesystem

pub mod entities;
pub mod error;
pub mod layout;
pub mod value_objects;

pub use entities::{
    blueprint::{Blueprint, Replacement},
    manifest::{Manifest, Script, ScriptSummary},
    target::ProjectTarget,
};

pub use error::{DomainError, ErrorCategory};

pub use layout::LayoutPatch;

pub use value_objects::RenderContext;
