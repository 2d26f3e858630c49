//! Promotion of staged files to their final location
//!
//! When the source may go away, a same-filesystem rename is tried first so the
//! destination appears atomically. Across filesystems the bytes are copied,
//! the copy is verified by checksum, and only then is the source removed.
//! The copy path is not atomic: an interrupted copy leaves a partial
//! destination, but the source is never removed before the copy is verified.

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::{Error, Result, checksum};

/// How a file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// Moved with a single rename.
    Renamed,
    /// Copied and verified; `bytes` were written.
    Copied { bytes: u64 },
}

/// Move or copy `source` to `dest`.
///
/// With `delete_source` the source path no longer exists after success.
/// Without it the source is left untouched. Promoting a file onto itself is
/// refused before anything is opened.
///
/// # Errors
///
/// Returns [`Error::Promote`] naming the failed step, or
/// [`Error::ChecksumMismatch`] if the copy does not match the source. Neither
/// is fatal on its own; the caller decides whether to retry or give up.
pub fn promote(source: &Path, dest: &Path, delete_source: bool) -> Result<Promotion> {
    if same_file(source, dest) {
        let cause = io::Error::new(
            ErrorKind::InvalidInput,
            "source and destination are the same file",
        );
        return Err(step_error("same file", source, dest, cause));
    }

    if !delete_source {
        let bytes = copy_verified(source, dest)?;
        return Ok(Promotion::Copied { bytes });
    }

    match fs::rename(source, dest) {
        Ok(()) => {
            debug!(source = %source.display(), dest = %dest.display(), "renamed");
            Ok(Promotion::Renamed)
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!(
                source = %source.display(),
                dest = %dest.display(),
                "rename crosses filesystems, copying instead"
            );
            let bytes = copy_then_remove(source, dest, copy_verified)?;
            Ok(Promotion::Copied { bytes })
        }
        Err(e) => Err(step_error("rename", source, dest, e)),
    }
}

/// Whether both paths resolve to one file. A missing path matches nothing.
#[cfg(unix)]
fn same_file(source: &Path, dest: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(source), fs::metadata(dest)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(source: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy with `copy`, then remove the source. The source stays when the copy
/// or its verification fails.
fn copy_then_remove(
    source: &Path,
    dest: &Path,
    copy: impl FnOnce(&Path, &Path) -> Result<u64>,
) -> Result<u64> {
    let bytes = copy(source, dest)?;
    fs::remove_file(source).map_err(|e| step_error("remove source", source, dest, e))?;
    Ok(bytes)
}

fn copy_verified(source: &Path, dest: &Path) -> Result<u64> {
    let mut input = File::open(source).map_err(|e| step_error("open source", source, dest, e))?;
    let mut output =
        File::create(dest).map_err(|e| step_error("create destination", source, dest, e))?;

    let bytes =
        io::copy(&mut input, &mut output).map_err(|e| step_error("copy", source, dest, e))?;
    output
        .sync_all()
        .map_err(|e| step_error("flush destination", source, dest, e))?;
    drop(output);

    verify_copy(source, dest)?;
    debug!(source = %source.display(), dest = %dest.display(), bytes, "copied");
    Ok(bytes)
}

fn verify_copy(source: &Path, dest: &Path) -> Result<()> {
    let expected = checksum::file_checksum(source)?;
    let actual = checksum::file_checksum(dest)?;
    if expected != actual {
        return Err(Error::ChecksumMismatch {
            path: dest.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn step_error(step: &'static str, source: &Path, dest: &Path, cause: io::Error) -> Error {
    Error::Promote {
        step,
        source_path: source.to_path_buf(),
        dest_path: dest.to_path_buf(),
        cause,
    }
}
