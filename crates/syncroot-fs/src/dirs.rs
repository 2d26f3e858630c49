//! Directory lifecycle management
//!
//! Two ways of bringing a target directory into a known state:
//!
//! - [`DirectoryManager::ensure_directory`] validates or creates a directory
//!   that will be updated incrementally. Problems are fatal configuration
//!   errors handed back to the caller.
//! - [`DirectoryManager::purge_and_recreate`] throws the old content away for a
//!   full re-materialization. Removal problems are logged and the run goes on.
//!
//! Neither operation locks the path. Callers must not run two operations on
//! the same directory concurrently.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::{Error, NormalizedPath, Result};

/// What a purge did to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purge {
    /// Nothing existed; the directory was created.
    Created,
    /// The old entry was removed and an empty directory created in its place.
    Recreated,
    /// The old entry was removed and nothing recreated.
    Removed,
    /// Nothing existed and nothing was requested.
    Absent,
    /// Removal or recreation failed; the path may hold stale content.
    Failed,
    /// Dry-run: no filesystem access happened.
    Skipped,
}

/// Creates, validates and purges target directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryManager {
    dry_run: bool,
}

impl DirectoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager that plans without touching the filesystem.
    pub fn with_dry_run(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Make sure `path` is an existing, writable directory and return its
    /// normalized form.
    ///
    /// Missing directories are created together with their ancestors. An
    /// empty path means the setting named by `label` was never configured.
    ///
    /// # Errors
    ///
    /// [`Error::MissingDirectorySetting`], [`Error::CreateDirectory`],
    /// [`Error::NotADirectory`] or [`Error::NotWritable`].
    pub fn ensure_directory(&self, path: impl AsRef<Path>, label: &str) -> Result<NormalizedPath> {
        let raw = path.as_ref();
        if raw.as_os_str().is_empty() {
            return Err(Error::MissingDirectorySetting {
                label: label.to_string(),
            });
        }

        let dir = NormalizedPath::new(raw);
        if !self.dry_run {
            if !dir.exists() {
                create_dir(&dir.to_native()).map_err(|source| Error::CreateDirectory {
                    path: dir.to_native(),
                    label: label.to_string(),
                    source,
                })?;
            } else if !dir.is_dir() {
                return Err(Error::NotADirectory {
                    path: dir.to_native(),
                    label: label.to_string(),
                });
            } else if !dir.is_writable() {
                return Err(Error::NotWritable {
                    path: dir.to_native(),
                    label: label.to_string(),
                });
            }
        }

        debug!(label, path = %dir, "using directory");
        Ok(dir)
    }

    /// Remove whatever is at `path` and leave an empty directory behind.
    pub fn purge_and_recreate(&self, path: &NormalizedPath, caller: &str) -> Purge {
        if self.dry_run {
            debug!(path = %path, caller, "dry-run: not purging");
            return Purge::Skipped;
        }

        let existed = path.exists();
        if existed {
            debug!(path = %path, caller, "removing");
            if let Err(e) = remove_entry(&path.to_native()) {
                warn!(path = %path, caller, error = %e, "removing directory failed");
                return Purge::Failed;
            }
        }

        debug!(path = %path, caller, "creating directory");
        if let Err(e) = create_dir(&path.to_native()) {
            warn!(path = %path, caller, error = %e, "creating directory failed");
            return Purge::Failed;
        }

        if existed { Purge::Recreated } else { Purge::Created }
    }

    /// Remove whatever is at `path` without recreating it.
    pub fn purge_only(&self, path: &NormalizedPath, caller: &str) -> Purge {
        if self.dry_run {
            debug!(path = %path, caller, "dry-run: not purging");
            return Purge::Skipped;
        }

        if !path.exists() {
            debug!(path = %path, caller, "nothing to remove, path does not exist");
            return Purge::Absent;
        }

        debug!(path = %path, caller, "removing");
        match remove_entry(&path.to_native()) {
            Ok(()) => Purge::Removed,
            Err(e) => {
                warn!(path = %path, caller, error = %e, "removing path failed");
                Purge::Failed
            }
        }
    }
}

/// Remove a single entry. Links and files are unlinked, real directories are
/// removed recursively. A link to a directory never has its target touched.
fn remove_entry(path: &Path) -> std::io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn create_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path)
}
