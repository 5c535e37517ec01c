//! Spinner-based step progress.

use std::cell::RefCell;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use sprout_core::{
    application::{ports::ProgressReporter, services::StepKind},
    error::SproutError,
};

use crate::output::OutputManager;

const TICK: Duration = Duration::from_millis(80);

/// Shows a spinner while a step runs, then a ✓/⚠/✗ line for it.
///
/// indicatif hides the spinner by itself when stderr is not a terminal; the
/// result lines still go through [`OutputManager`].
pub struct StepProgress<'a> {
    output: &'a OutputManager,
    current: RefCell<Option<ProgressBar>>,
}

impl<'a> StepProgress<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self {
            output,
            current: RefCell::new(None),
        }
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if self.output.is_quiet() {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner().with_style(style);
        bar.set_message(message);
        bar.enable_steady_tick(TICK);
        bar
    }

    fn finish(&self) {
        if let Some(bar) = self.current.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

// Terminal write failures are not worth aborting a run over.
impl ProgressReporter for StepProgress<'_> {
    fn step_started(&self, step: StepKind) {
        self.finish();
        *self.current.borrow_mut() = Some(self.spinner(step.label()));
    }

    fn step_succeeded(&self, step: StepKind) {
        self.finish();
        let _ = self.output.success(step.label());
    }

    fn step_warned(&self, step: StepKind, message: &str) {
        self.finish();
        let _ = self.output.warning(&format!("{}: {message}", step.label()));
    }

    fn step_failed(&self, step: StepKind, _error: &SproutError) {
        self.finish();
        let _ = self.output.error(step.label());
    }
}

impl Drop for StepProgress<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
