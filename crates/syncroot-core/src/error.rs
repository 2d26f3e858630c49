//! Error types for syncroot-core

/// Result type for syncroot-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in syncroot-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `/regex/` strip_component that does not compile
    #[error("invalid strip_component pattern {pattern}: {source}")]
    InvalidStripPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The global tracing subscriber could not be installed
    #[error("failed to initialize logging: {message}")]
    Logging { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from syncroot-fs
    #[error(transparent)]
    Fs(#[from] syncroot_fs::Error),

    /// Runner construction error from syncroot-exec
    #[error(transparent)]
    Exec(#[from] syncroot_exec::Error),
}

impl Error {
    /// Whether a validation run should collect this error instead of aborting.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::InvalidStripPattern { .. } => true,
            Self::Fs(e) => e.is_configuration(),
            Self::Logging { .. } | Self::Exec(_) => false,
        }
    }
}
