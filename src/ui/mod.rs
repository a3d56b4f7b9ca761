//! User interface module.
//!
//! The workflow never prompts; everything here writes to stdout/stderr.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_command_output, display_error, display_status,
    display_success,
};
