use std::io::Write;
use std::path::Path;

use syncroot_fs::file_checksum;

use crate::error::Result;

/// Print `<sha256>  <file>` in the same layout as `sha256sum`.
pub fn run_checksum(file: &Path, out: &mut impl Write) -> Result<i32> {
    let checksum = file_checksum(file)?;
    writeln!(out, "{}  {}", checksum, file.display())?;
    Ok(0)
}
