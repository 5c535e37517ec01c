//! The step catalogue.

use std::fmt;

/// What happens to the run when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the run; no further step executes.
    Fatal,
    /// Record a warning and continue with the next step.
    Soft,
}

/// Result of a step that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// Finished, but something along the way went wrong.
    Warned(String),
}

/// Every pipeline step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    CheckTarget,
    CloneTemplate,
    PruneDirectories,
    RewriteManifest,
    CustomizeFiles,
    ResetHistory,
    InstallDependencies,
    SummarizeScripts,
}

impl StepKind {
    /// Execution order.
    pub const ALL: [StepKind; 8] = [
        StepKind::CheckTarget,
        StepKind::CloneTemplate,
        StepKind::PruneDirectories,
        StepKind::RewriteManifest,
        StepKind::CustomizeFiles,
        StepKind::ResetHistory,
        StepKind::InstallDependencies,
        StepKind::SummarizeScripts,
    ];

    pub fn policy(self) -> FailurePolicy {
        match self {
            StepKind::CheckTarget
            | StepKind::CloneTemplate
            | StepKind::RewriteManifest
            | StepKind::ResetHistory
            | StepKind::InstallDependencies => FailurePolicy::Fatal,
            StepKind::PruneDirectories | StepKind::CustomizeFiles | StepKind::SummarizeScripts => {
                FailurePolicy::Soft
            }
        }
    }

    /// Progress text shown while the step runs.
    pub fn label(self) -> &'static str {
        match self {
            StepKind::CheckTarget => "Checking project directory",
            StepKind::CloneTemplate => "Cloning template",
            StepKind::PruneDirectories => "Removing unused template directories",
            StepKind::RewriteManifest => "Updating package.json",
            StepKind::CustomizeFiles => "Customizing application files",
            StepKind::ResetHistory => "Initializing a fresh git repository",
            StepKind::InstallDependencies => "Installing dependencies",
            StepKind::SummarizeScripts => "Collecting available scripts",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_pipeline() {
        assert_eq!(StepKind::ALL.first(), Some(&StepKind::CheckTarget));
        assert_eq!(StepKind::ALL.last(), Some(&StepKind::SummarizeScripts));
        let clone = StepKind::ALL.iter().position(|s| *s == StepKind::CloneTemplate);
        let reset = StepKind::ALL.iter().position(|s| *s == StepKind::ResetHistory);
        assert!(clone < reset);
    }

    #[test]
    fn soft_steps() {
        let soft: Vec<_> = StepKind::ALL
            .into_iter()
            .filter(|s| s.policy() == FailurePolicy::Soft)
            .collect();
        assert_eq!(
            soft,
            [
                StepKind::PruneDirectories,
                StepKind::CustomizeFiles,
                StepKind::SummarizeScripts
            ]
        );
    }
}
