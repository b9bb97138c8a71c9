// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal and quiet (cron) output modes.

use std::fmt::Display;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Reports and errors only
    Quiet,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a multi-line report, always.
    pub fn report(&self, report: &impl Display) {
        println!("{report}");
        println!();
    }

    /// Print a success message, with timing in normal mode.
    pub fn success(&self, message: &str) {
        let elapsed = self.elapsed_secs();
        if self.mode == OutputMode::Normal && elapsed > 0.0 {
            println!("{message} ({:.1}s)", elapsed);
        } else {
            println!("{message}");
        }
    }

    /// Print a non-fatal warning (suppressed in quiet mode).
    pub fn warning(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            eprintln!("Warning: {message}");
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}

/// Render container names as `[a, b]`.
pub fn name_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    format!("[{}]", names.into_iter().collect::<Vec<_>>().join(", "))
}
