//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps terminal state so application services can emit progress events
//! without depending on any presentation type directly. On a TTY the step
//! stream drives a spinner; success and warning events print above it.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, Styles, progress};

/// Terminal progress reporter.
///
/// - `step()` updates the spinner message (or prints `"  → {message}"`
///   without a TTY; suppressed when quiet)
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ⚠ {message}"`
pub struct TerminalReporter {
    quiet: bool,
    styles: Styles,
    spinner: Option<ProgressBar>,
}

impl TerminalReporter {
    /// Create a reporter for the given output context. A spinner is shown
    /// only when the context allows progress indicators.
    #[must_use]
    pub fn new(ctx: &OutputContext) -> Self {
        let spinner = ctx.show_progress().then(|| progress::spinner("starting..."));
        Self {
            quiet: ctx.quiet,
            styles: ctx.styles.clone(),
            spinner,
        }
    }

    /// Stop the spinner, leaving the final message on screen.
    pub fn finish(&self, msg: &str) {
        if let Some(pb) = &self.spinner {
            progress::finish_ok(pb, msg);
        }
    }

    /// Stop the spinner and erase it.
    pub fn clear(&self) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }

    fn println(&self, line: String) {
        match &self.spinner {
            Some(pb) => pb.println(line),
            None => {
                if !self.quiet {
                    println!("{line}");
                }
            }
        }
    }
}

impl ProgressReporter for TerminalReporter {
    fn step(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => {
                if !self.quiet {
                    println!("  {} {message}", "→".style(self.styles.info));
                }
            }
        }
    }

    fn success(&self, message: &str) {
        self.println(format!("  {} {message}", "✓".style(self.styles.success)));
    }

    fn warn(&self, message: &str) {
        self.println(format!("  {} {message}", "⚠".style(self.styles.warning)));
    }
}
