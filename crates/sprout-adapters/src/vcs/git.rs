//! Git driven through its command-line interface.

use std::path::{Path, PathBuf};

use sprout_core::{
    application::{ApplicationError, ports::VersionControl},
    error::{SproutError, SproutResult},
};
use tracing::{info, instrument};

use crate::process::{CommandRunner, CommandSpec, ProcessError, SystemRunner};

const DEFAULT_PROGRAM: &str = "git";

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli<R = SystemRunner> {
    program: String,
    runner: R,
}

impl GitCli<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(DEFAULT_PROGRAM, SystemRunner)
    }
}

impl Default for GitCli<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> GitCli<R> {
    /// Use `program` as the git executable, spawned through `runner`.
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    fn run(&self, operation: &'static str, spec: CommandSpec) -> SproutResult<()> {
        self.runner
            .run_checked(&spec)
            .map(|_| ())
            .map_err(|e| self.map_error(operation, e))
    }

    fn map_error(&self, operation: &'static str, error: ProcessError) -> SproutError {
        match error {
            ProcessError::Spawn { source, .. } => ApplicationError::ToolUnavailable {
                program: self.program.clone(),
                reason: source.to_string(),
            }
            .into(),
            failed @ ProcessError::Failed { .. } => ApplicationError::VersionControl {
                operation,
                reason: failed.detail(),
            }
            .into(),
        }
    }
}

impl<R: CommandRunner> VersionControl for GitCli<R> {
    fn metadata_dir(&self) -> PathBuf {
        PathBuf::from(".git")
    }

    #[instrument(skip(self), fields(destination = %destination.display()))]
    fn clone_repository(&self, url: &str, destination: &Path) -> SproutResult<()> {
        info!(url, "Cloning template");
        // `--` keeps a URL that starts with a dash from being read as an option.
        let spec = CommandSpec::new(&self.program)
            .args(["clone", "--", url])
            .arg(destination);
        self.run("clone", spec)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn init_repository(&self, path: &Path) -> SproutResult<()> {
        info!("Initializing fresh repository");
        let spec = CommandSpec::new(&self.program)
            .arg("init")
            .current_dir(path);
        self.run("init", spec)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::process::{CommandOutput, RecordingRunner};

    #[test]
    fn clone_passes_url_and_destination() {
        let runner = RecordingRunner::succeeding();
        let git = GitCli::with_runner("git", runner.clone());

        git.clone_repository("https://example.com/t.git", Path::new("/work/my-app"))
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "git");
        assert_eq!(
            calls[0].args,
            ["clone", "--", "https://example.com/t.git", "/work/my-app"]
        );
        assert_eq!(calls[0].cwd, None);
    }

    #[test]
    fn dash_prefixed_url_stays_an_operand() {
        let runner = RecordingRunner::succeeding();
        let git = GitCli::with_runner("git", runner.clone());

        git.clone_repository("--upload-pack=touch", Path::new("/work/a"))
            .unwrap();

        let calls = runner.calls();
        let args = &calls[0].args;
        assert_eq!(args[1], "--");
        assert_eq!(args[2], "--upload-pack=touch");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_destination_is_passed_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let runner = RecordingRunner::succeeding();
        let git = GitCli::with_runner("git", runner.clone());
        let destination = Path::new(OsStr::from_bytes(b"/work/caf\xe9/app"));

        git.clone_repository("https://example.com/t.git", destination)
            .unwrap();

        assert_eq!(
            runner.calls()[0].args.last().map(|a| a.as_os_str()),
            Some(destination.as_os_str())
        );
    }

    #[test]
    fn init_runs_inside_the_project() {
        let runner = RecordingRunner::succeeding();
        let git = GitCli::with_runner("git", runner.clone());

        git.init_repository(Path::new("/work/my-app")).unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].args, ["init"]);
        assert_eq!(calls[0].cwd.as_deref(), Some(Path::new("/work/my-app")));
    }

    #[test]
    fn non_zero_exit_is_a_version_control_error() {
        let runner = RecordingRunner::with_handler(|_| {
            Ok(CommandOutput::failed(
                128,
                "fatal: repository 'x' not found\n",
            ))
        });
        let git = GitCli::with_runner("git", runner);

        let err = git
            .clone_repository("x", Path::new("/work/a"))
            .unwrap_err();
        match err {
            SproutError::Application(ApplicationError::VersionControl { operation, reason }) => {
                assert_eq!(operation, "clone");
                assert_eq!(reason, "fatal: repository 'x' not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_binary_is_tool_unavailable() {
        let runner = RecordingRunner::with_handler(|_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
        });
        let git = GitCli::with_runner("my-git", runner);

        let err = git.init_repository(Path::new("/work/a")).unwrap_err();
        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::ToolUnavailable { ref program, .. })
                if program == "my-git"
        ));
    }

    #[test]
    fn metadata_lives_in_dot_git() {
        assert_eq!(GitCli::new().metadata_dir(), PathBuf::from(".git"));
    }
}
