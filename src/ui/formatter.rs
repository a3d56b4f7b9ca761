//! Formatting functions for terminal output.
//!
//! Colors come from `console`, which drops styling when the stream is not a
//! terminal.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the captured stdout of a git command, indented and in green.
///
/// Blank output prints nothing.
pub fn display_command_output(output: &str) {
    for line in format_command_output(output) {
        println!("  {}", style(line).green());
    }
}

/// Lines of command output worth showing (trailing blank lines dropped)
pub fn format_command_output(output: &str) -> Vec<&str> {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().collect()
}
