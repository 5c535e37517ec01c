//! Node.js package managers (npm, pnpm, yarn, bun).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sprout_core::{
    application::{ApplicationError, ports::PackageManager},
    error::{SproutError, SproutResult},
};
use thiserror::Error;
use tracing::{info, instrument};

use crate::process::{CommandRunner, CommandSpec, ProcessError, SystemRunner};

/// Which Node package manager to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManagerKind {
    pub const ALL: [Self; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    /// Executable name.
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Arguments that run a manifest script, before the script name.
    const fn run_prefix(self) -> &'static [&'static str] {
        match self {
            Self::Npm | Self::Bun => &["run"],
            Self::Pnpm | Self::Yarn => &[],
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown package manager '{0}' (expected npm, pnpm, yarn or bun)")]
pub struct UnknownPackageManager(pub String);

impl FromStr for PackageManagerKind {
    type Err = UnknownPackageManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.program().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPackageManager(s.to_string()))
    }
}

/// [`PackageManager`] that shells out to a Node package manager.
#[derive(Debug, Clone)]
pub struct NodePackageManager<R = SystemRunner> {
    kind: PackageManagerKind,
    runner: R,
}

impl NodePackageManager<SystemRunner> {
    pub fn new(kind: PackageManagerKind) -> Self {
        Self::with_runner(kind, SystemRunner)
    }
}

impl<R: CommandRunner> NodePackageManager<R> {
    pub fn with_runner(kind: PackageManagerKind, runner: R) -> Self {
        Self { kind, runner }
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    fn map_error(&self, operation: &'static str, error: ProcessError) -> SproutError {
        let program = self.kind.program().to_string();
        match error {
            ProcessError::Spawn { source, .. } => ApplicationError::ToolUnavailable {
                program,
                reason: source.to_string(),
            }
            .into(),
            failed @ ProcessError::Failed { .. } => ApplicationError::PackageManager {
                program,
                operation,
                reason: failed.detail(),
            }
            .into(),
        }
    }
}

impl<R: CommandRunner> PackageManager for NodePackageManager<R> {
    #[instrument(skip(self), fields(program = self.kind.program(), root = %project_root.display()))]
    fn install(&self, project_root: &Path) -> SproutResult<()> {
        info!("Installing dependencies");
        let spec = CommandSpec::new(self.kind.program())
            .arg("install")
            .current_dir(project_root);
        self.runner
            .run_checked(&spec)
            .map(|_| ())
            .map_err(|e| self.map_error("install", e))
    }

    fn run_invocation(&self, script: &str) -> String {
        let mut parts = vec![self.kind.program()];
        parts.extend_from_slice(self.kind.run_prefix());
        parts.push(script);
        parts.join(" ")
    }
}
