//! Error types for syncroot-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from syncroot-core
    #[error(transparent)]
    Core(#[from] syncroot_core::Error),

    /// Error from syncroot-fs
    #[error(transparent)]
    Fs(#[from] syncroot_fs::Error),

    /// Error from syncroot-exec
    #[error(transparent)]
    Exec(#[from] syncroot_exec::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
