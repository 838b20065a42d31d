//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` so application services can emit progress
//! events without depending on any presentation type directly.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".green());
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".yellow());
        }
    }
}

/// Spinner-backed reporter for long waits (the batch job poll).
///
/// Steps update the spinner message in place; successes and warnings are
/// printed above the spinner line.
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    #[must_use]
    pub fn new(msg: &str) -> Self {
        Self {
            pb: progress::spinner(msg),
        }
    }

    /// Stop the spinner with a final success line.
    pub fn finish(self, msg: &str) {
        progress::finish_ok(&self.pb, msg);
    }

    /// Remove the spinner without printing anything (error paths — the
    /// error itself is reported by the caller).
    pub fn clear(self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn success(&self, message: &str) {
        self.pb.println(format!("  {} {message}", "✓".green()));
    }

    fn warn(&self, message: &str) {
        self.pb.println(format!("  {} {message}", "!".yellow()));
    }
}
