//! Implementation of `sprout <project-directory>`.
//!
//! Responsibility: resolve the target, wire the production adapters into the
//! core pipeline, and display results. No business logic lives here.

use std::path::Path;

use tracing::{info, instrument};

use sprout_adapters::{GitCli, LocalFilesystem, NodePackageManager, SystemRunner};
use sprout_core::{
    application::{InitPipeline, InitReport},
    domain::{Blueprint, ProjectTarget},
    error::SproutError,
};

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
    progress::StepProgress,
};

/// Create a project in `directory`.
///
/// Dispatch sequence:
/// 1. Resolve the directory against the current working directory
/// 2. Build the pipeline from config (template URL, git, package manager)
/// 3. Run it with a spinner per step
/// 4. Print the scripts summary and next steps
#[instrument(skip_all, fields(directory = %directory.display()))]
pub fn execute(directory: &Path, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;
    let target = ProjectTarget::resolve(directory, &cwd).map_err(SproutError::from)?;

    let pipeline = build_pipeline(config);

    output.header(&format!(
        "Creating '{}' in {}",
        target.name(),
        target.root().display()
    ))?;

    let report = {
        let progress = StepProgress::new(output);
        pipeline.run(target, &progress)?
    };

    info!(run_id = %report.run_id, project = %report.project_name, "Project created");

    print_summary(&report, directory, output)?;
    Ok(())
}

fn build_pipeline(config: &AppConfig) -> InitPipeline {
    let blueprint = Blueprint::default().with_template_url(config.template.url.clone());

    InitPipeline::new(
        blueprint,
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::with_runner(config.tools.git.clone(), SystemRunner)),
        Box::new(NodePackageManager::new(config.tools.package_manager)),
    )
}

fn print_summary(report: &InitReport, directory: &Path, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.success(&format!("Project '{}' is ready!", report.project_name))?;
    if !report.warnings.is_empty() {
        output.info(&format!(
            "Finished with {} warning(s); see above",
            report.warnings.len()
        ))?;
    }

    output.print("")?;
    output.print("Available scripts:")?;
    output.boxed(&report.scripts.lines())?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", directory.display()))?;
    Ok(())
}
