//! Error types and handling infrastructure for pingmon.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! The rendering core itself is total: formatting a snapshot cannot fail. Errors
//! only arise at the terminal boundary (writing output, querying the screen size),
//! and those abort the render session after the cleanup path has run.

use std::io;
use thiserror::Error;

/// The main error type for pingmon operations.
#[derive(Error, Debug)]
pub enum PingmonError {
    /// Writing rendered output to the terminal failed
    #[error("Output write failed: {message}")]
    OutputError {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Querying the terminal (size, capabilities) failed
    #[error("Terminal query failed: {message}")]
    TerminalError {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for pingmon operations.
pub type Result<T> = std::result::Result<T, PingmonError>;

impl PingmonError {
    /// Create a TerminalError from an io::Error with additional context
    pub fn terminal(message: impl Into<String>, source: io::Error) -> Self {
        Self::TerminalError {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error for the render loop's write path
impl From<io::Error> for PingmonError {
    fn from(err: io::Error) -> Self {
        Self::OutputError {
            message: "IO operation failed".to_string(),
            source: err,
        }
    }
}
