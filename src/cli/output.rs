//! Output formatting and progress indicators
//!
//! Provides the spinner shown during the long dependency build, status
//! glyphs, and formatted messages. Quiet/JSON flags are applied once at
//! startup and consulted by every command.

use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Output configuration derived from global CLI flags
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Suppress all output except errors
    pub quiet: bool,
    /// Emit machine-readable JSON where supported
    pub json: bool,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Apply this configuration for the rest of the process
    pub fn apply_global(self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }
}

/// Whether quiet mode is active
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether JSON output mode is active
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_quiet() || is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print an informational message
pub fn print_info(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::INFO);
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::WARNING);
    }
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    if !is_quiet() && !is_json() {
        println!("  {message}");
    }
}

/// Display an error to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
