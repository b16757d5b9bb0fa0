//! User interface module - terminal output for the release binary.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_configured_hooks, display_error, display_release_error,
    display_release_summary, display_status, display_success,
};
