//! Running external programs.
//!
//! Every child process is described by a [`CommandSpec`] that names the
//! program, its arguments and its working directory explicitly. Nothing here
//! changes or depends on the current process's working directory.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, instrument, trace};

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
    /// Working directory; `None` inherits the caller's.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Arguments are kept as OS strings so paths reach the child unaltered.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Why a checked command did not succeed.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}: {detail}")]
    Failed {
        command: String,
        status: String,
        detail: String,
    },
}

impl ProcessError {
    /// The most useful one-line explanation for a user.
    pub fn detail(&self) -> String {
        match self {
            Self::Spawn { source, .. } => source.to_string(),
            Self::Failed { detail, .. } => detail.clone(),
        }
    }
}

/// Executes external commands.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;

    /// Run and treat a non-zero exit as an error.
    fn run_checked(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let output = self.run(spec).map_err(|source| ProcessError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

        if output.success {
            return Ok(output);
        }

        let stderr = output.stderr.trim();
        Err(ProcessError::Failed {
            command: spec.to_string(),
            status: output
                .code
                .map_or_else(|| "a signal".to_string(), |c| format!("status {c}")),
            detail: if stderr.is_empty() {
                "no error output".to_string()
            } else {
                last_lines(stderr, 5)
            },
        })
    }
}

fn last_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    lines[lines.len().saturating_sub(n)..].join("\n")
}

/// Runs commands as real child processes, capturing their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %spec))]
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args).stdin(Stdio::null());
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }

        debug!(cwd = ?spec.cwd, "Spawning");
        let output = command.output()?;

        let result = CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(stdout = %result.stdout, stderr = %result.stderr, "Process output");
        debug!(success = result.success, code = ?result.code, "Process finished");
        Ok(result)
    }
}

type Handler = dyn Fn(&CommandSpec) -> io::Result<CommandOutput> + Send + Sync;

/// Records every command and answers with a scripted handler.
///
/// Clones share the call log. The handler can simulate side effects (for
/// example populating a [`crate::MemoryFilesystem`] on `git clone`).
#[derive(Clone)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    handler: Arc<Handler>,
}

impl RecordingRunner {
    /// Every command succeeds with empty output.
    pub fn succeeding() -> Self {
        Self::with_handler(|_| Ok(CommandOutput::ok()))
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> io::Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            handler: Arc::new(handler),
        }
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(spec.clone());
        (self.handler)(spec)
    }
}
