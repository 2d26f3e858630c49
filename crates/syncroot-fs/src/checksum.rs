//! SHA-256 content checksums
//!
//! The lowercase hex digest produced here is the identity key for cached
//! content: two files with the same bytes get the same key regardless of
//! where they live.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Read buffer size used while streaming files through the hasher
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 checksum of in-memory content as lowercase hex.
pub fn content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Stream a file through SHA-256 and return the lowercase hex digest.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read. A caller
/// asking for a checksum already believes the file is there, so this is
/// normally treated as fatal.
pub fn file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buffer).map_err(|e| Error::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
