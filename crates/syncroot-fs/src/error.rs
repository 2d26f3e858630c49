//! Error types for syncroot-fs

use std::path::PathBuf;

/// Result type for syncroot-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in syncroot-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dir setting '{label}' missing")]
    MissingDirectorySetting { label: String },

    #[error("failed to create directory {path} for {label}: {source}")]
    CreateDirectory {
        path: PathBuf,
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} exists, but is not a directory ({label})")]
    NotADirectory { path: PathBuf, label: String },

    #[error("{path} exists, but is not writable ({label})")]
    NotWritable { path: PathBuf, label: String },

    #[error("promoting {source_path} to {dest_path} failed to {step}: {cause}")]
    Promote {
        step: &'static str,
        source_path: PathBuf,
        dest_path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error describes a broken directory setting.
    ///
    /// These are the errors a validation run collects instead of aborting on.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingDirectorySetting { .. }
                | Self::CreateDirectory { .. }
                | Self::NotADirectory { .. }
                | Self::NotWritable { .. }
                | Self::ConfigParse { .. }
                | Self::UnsupportedFormat { .. }
        )
    }
}
