//! Package manager adapters.

mod node;

pub use node::{NodePackageManager, PackageManagerKind, UnknownPackageManager};
