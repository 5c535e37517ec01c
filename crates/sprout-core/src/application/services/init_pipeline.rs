//! Init Pipeline - main application orchestrator.
//!
//! Turns an empty (or missing) directory into a ready-to-run project:
//! 1. Check the target directory
//! 2. Clone the template
//! 3. Prune template-only directories
//! 4. Rewrite package.json
//! 5. Customize application files
//! 6. Reset git history
//! 7. Install dependencies
//! 8. Summarize available scripts
//!
//! Fatal steps abort the run; soft steps record a warning and let the run
//! continue. Nothing is rolled back: a failed run leaves the directory as the
//! failing step left it.
//!
//! The emptiness check and the clone are not atomic. A directory populated
//! between the two is not detected here; `git clone` itself refuses a
//! non-empty destination in that case.

use std::path::PathBuf;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PackageManager, ProgressReporter, Removal, VersionControl},
        services::steps::{FailurePolicy, StepKind, StepOutcome},
    },
    domain::{
        Blueprint, LayoutPatch, Manifest, ProjectTarget, RenderContext, ScriptSummary,
        entities::Replacement,
    },
    error::{SproutError, SproutResult},
};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub run_id: Uuid,
    pub project_name: String,
    pub root: PathBuf,
    /// The manifest as written by the rewrite step.
    pub manifest: Manifest,
    /// Pruning-set directories that existed and were removed.
    pub pruned: Vec<PathBuf>,
    /// Soft-step warnings, in the order they occurred.
    pub warnings: Vec<String>,
    pub scripts: ScriptSummary,
}

/// State threaded through one run.
struct RunState {
    target: ProjectTarget,
    manifest: Option<Manifest>,
    pruned: Vec<PathBuf>,
    warnings: Vec<String>,
    scripts: Option<ScriptSummary>,
}

/// Project initialization service.
pub struct InitPipeline {
    blueprint: Blueprint,
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControl>,
    packages: Box<dyn PackageManager>,
}

impl InitPipeline {
    pub fn new(
        blueprint: Blueprint,
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
        packages: Box<dyn PackageManager>,
    ) -> Self {
        Self {
            blueprint,
            filesystem,
            vcs,
            packages,
        }
    }

    /// Run every step in order against `target`.
    ///
    /// Returns the first fatal error. Soft failures end up in
    /// [`InitReport::warnings`].
    #[instrument(
        skip_all,
        fields(run_id = tracing::field::Empty, project = %target.name(), root = %target)
    )]
    pub fn run(
        &self,
        target: ProjectTarget,
        reporter: &dyn ProgressReporter,
    ) -> SproutResult<InitReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!(template = %self.blueprint.template_url, "Initialization started");

        let mut state = RunState {
            target,
            manifest: None,
            pruned: Vec::new(),
            warnings: Vec::new(),
            scripts: None,
        };

        for step in StepKind::ALL {
            reporter.step_started(step);
            debug!(step = ?step, "Step started");

            match self.execute(step, &mut state) {
                Ok(StepOutcome::Completed) => reporter.step_succeeded(step),
                Ok(StepOutcome::Warned(message)) => {
                    warn!(step = ?step, %message, "Step finished with warnings");
                    reporter.step_warned(step, &message);
                    state.warnings.push(message);
                }
                Err(err) => match step.policy() {
                    FailurePolicy::Fatal => {
                        error!(step = ?step, error = %err, "Fatal step failed, aborting");
                        reporter.step_failed(step, &err);
                        return Err(err);
                    }
                    FailurePolicy::Soft => {
                        let message = err.to_string();
                        warn!(step = ?step, %message, "Soft step failed, continuing");
                        reporter.step_warned(step, &message);
                        state.warnings.push(message);
                    }
                },
            }
        }

        let manifest = state.manifest.ok_or_else(|| SproutError::Internal {
            message: "manifest missing after a successful run".into(),
        })?;

        info!(warnings = state.warnings.len(), "Initialization completed");

        Ok(InitReport {
            run_id,
            project_name: state.target.name().to_string(),
            root: state.target.root().to_path_buf(),
            manifest,
            pruned: state.pruned,
            warnings: state.warnings,
            scripts: state.scripts.unwrap_or(ScriptSummary::Unavailable),
        })
    }

    fn execute(&self, step: StepKind, state: &mut RunState) -> SproutResult<StepOutcome> {
        match step {
            StepKind::CheckTarget => self.check_target(&state.target),
            StepKind::CloneTemplate => self.clone_template(&state.target),
            StepKind::PruneDirectories => self.prune_directories(state),
            StepKind::RewriteManifest => self.rewrite_manifest(state),
            StepKind::CustomizeFiles => Ok(self.customize_files(&state.target)),
            StepKind::ResetHistory => self.reset_history(&state.target),
            StepKind::InstallDependencies => self.install_dependencies(&state.target),
            StepKind::SummarizeScripts => {
                state.scripts = Some(self.summarize_scripts(&state.target));
                Ok(StepOutcome::Completed)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn check_target(&self, target: &ProjectTarget) -> SproutResult<StepOutcome> {
        let root = target.root();
        if !self.filesystem.exists(root) {
            debug!("Target does not exist yet");
            return Ok(StepOutcome::Completed);
        }
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::TargetNotDirectory {
                path: root.to_path_buf(),
            }
            .into());
        }
        if !self.filesystem.is_empty_dir(root)? {
            return Err(ApplicationError::TargetNotEmpty {
                path: root.to_path_buf(),
            }
            .into());
        }
        Ok(StepOutcome::Completed)
    }

    fn clone_template(&self, target: &ProjectTarget) -> SproutResult<StepOutcome> {
        self.vcs
            .clone_repository(&self.blueprint.template_url, target.root())?;
        Ok(StepOutcome::Completed)
    }

    fn prune_directories(&self, state: &mut RunState) -> SproutResult<StepOutcome> {
        let mut failed = Vec::new();

        for dir in &self.blueprint.pruned_dirs {
            let path = state.target.join(dir);
            match self.filesystem.remove_dir_all(&path) {
                Ok(Removal::Removed) => state.pruned.push(dir.clone()),
                Ok(Removal::Absent) => debug!(dir = %dir.display(), "Already absent"),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Could not remove directory");
                    failed.push(dir.display().to_string());
                }
            }
        }

        if failed.is_empty() {
            Ok(StepOutcome::Completed)
        } else {
            Ok(StepOutcome::Warned(format!(
                "Could not remove: {}",
                failed.join(", ")
            )))
        }
    }

    fn rewrite_manifest(&self, state: &mut RunState) -> SproutResult<StepOutcome> {
        let path = state.target.join(&self.blueprint.manifest_file);

        let text = self.filesystem.read_to_string(&path)?;
        let mut manifest = Manifest::parse(&text)?;
        manifest.apply_project_identity(state.target.name());
        self.filesystem
            .write_file(&path, &manifest.to_pretty_string()?)?;

        state.manifest = Some(manifest);
        Ok(StepOutcome::Completed)
    }

    /// Every sub-operation runs regardless of the others; failures are only
    /// logged.
    fn customize_files(&self, target: &ProjectTarget) -> StepOutcome {
        let ctx = RenderContext::new(target.name());

        let results = [
            (
                "stylesheet",
                self.replace_file(target, &self.blueprint.stylesheet, &ctx),
            ),
            ("components", self.remove_components(target)),
            ("layout", self.patch_layout(target)),
            ("page", self.replace_file(target, &self.blueprint.page, &ctx)),
        ];

        for (part, result) in results {
            if let Err(e) = result {
                debug!(part, error = %e, "Customization skipped");
            }
        }

        StepOutcome::Completed
    }

    fn reset_history(&self, target: &ProjectTarget) -> SproutResult<StepOutcome> {
        let metadata = target.join(self.vcs.metadata_dir());
        self.filesystem.remove_dir_all(&metadata)?;
        self.vcs.init_repository(target.root())?;
        Ok(StepOutcome::Completed)
    }

    fn install_dependencies(&self, target: &ProjectTarget) -> SproutResult<StepOutcome> {
        self.packages.install(target.root())?;
        Ok(StepOutcome::Completed)
    }

    /// Reads the manifest back from disk rather than trusting the in-memory
    /// copy: install scripts may have changed it.
    fn summarize_scripts(&self, target: &ProjectTarget) -> ScriptSummary {
        let path = target.join(&self.blueprint.manifest_file);
        let manifest = self
            .filesystem
            .read_to_string(&path)
            .and_then(|text| Manifest::parse(&text).map_err(SproutError::from));

        match manifest {
            Ok(manifest) => ScriptSummary::from_scripts(manifest.scripts(), |name| {
                self.packages.run_invocation(name)
            }),
            Err(e) => {
                debug!(error = %e, "Could not re-read manifest");
                ScriptSummary::Unavailable
            }
        }
    }

    // -------------------------------------------------------------------------
    // Customization helpers
    // -------------------------------------------------------------------------

    fn replace_file(
        &self,
        target: &ProjectTarget,
        replacement: &Replacement,
        ctx: &RenderContext,
    ) -> SproutResult<()> {
        let path = target.join(&replacement.path);
        self.filesystem
            .write_file(&path, &ctx.render(&replacement.content))
    }

    fn remove_components(&self, target: &ProjectTarget) -> SproutResult<()> {
        let mut last_error = None;
        for file in &self.blueprint.removed_files {
            if let Err(e) = self.filesystem.remove_file(&target.join(file)) {
                debug!(file = %file.display(), error = %e, "Could not remove component");
                last_error = Some(e);
            }
        }
        last_error.map_or(Ok(()), Err)
    }

    fn patch_layout(&self, target: &ProjectTarget) -> SproutResult<()> {
        let path = target.join(&self.blueprint.layout_file);
        if !self.filesystem.exists(&path) {
            debug!("No layout file, skipping patch");
            return Ok(());
        }

        let source = self.filesystem.read_to_string(&path)?;
        let patched = LayoutPatch::new(&self.blueprint.layout_symbols)?.apply(&source);
        if patched != source {
            self.filesystem.write_file(&path, &patched)?;
        }
        Ok(())
    }
}
