//! Error types for syncroot-exec
//!
//! A command that fails is not an error here: its exit code and output are
//! returned as data. Only setting up the runner itself can fail.

/// Errors that can occur while constructing a runner
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start process runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type alias for syncroot-exec operations
pub type Result<T> = std::result::Result<T, Error>;
