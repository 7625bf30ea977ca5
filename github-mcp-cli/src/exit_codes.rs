//! Exit code constants for CLI commands
//!
//! These constants define the standard exit codes used throughout the application:
//! - 0: Success
//! - 1: The server failed while running
//! - 2: Configuration errors or other startup failures

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// The server stopped abnormally
pub const EXIT_WARNING: i32 = 1;

/// Startup failed, e.g. because the token is missing
pub const EXIT_ERROR: i32 = 2;
