//! Pure formatting functions for UI output.
//!
//! All display logic lives here, separated from user interaction. The
//! styling mirrors the prompt palette: green for success, red for errors,
//! yellow for warnings, dim for hints.

use console::style;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a non-fatal warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), message);
}

/// Print an informational message.
pub fn display_info(message: &str) {
    println!("{} {}", style("ℹ").magenta(), message);
}

/// Print dimmed help/hint text.
pub fn display_help(message: &str) {
    println!("{}", style(message).dim());
}
