pub mod blueprint;
pub mod manifest;
pub mod target;

pub use blueprint::{Blueprint, Replacement};
pub use manifest::{Manifest, Script, ScriptSummary};
pub use target::ProjectTarget;
