//! Promote command implementation

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use syncroot_fs::{Promotion, promote};

use crate::context::Context;
use crate::error::Result;

/// Move (or with `keep_source`, copy) `source` to `dest`.
pub fn run_promote(
    ctx: &Context,
    source: &Path,
    dest: &Path,
    keep_source: bool,
    out: &mut impl Write,
) -> Result<i32> {
    if ctx.dry_run {
        let verb = if keep_source { "copy" } else { "move" };
        writeln!(
            out,
            "{} would {} {} to {}",
            "dry-run:".yellow(),
            verb,
            source.display(),
            dest.display()
        )?;
        return Ok(0);
    }

    match promote(source, dest, !keep_source)? {
        Promotion::Renamed => {
            writeln!(out, "{} {} -> {}", "renamed".green(), source.display(), dest.display())?;
        }
        Promotion::Copied { bytes } => {
            writeln!(
                out,
                "{} {} -> {} ({} bytes, verified)",
                "copied".green(),
                source.display(),
                dest.display(),
                bytes
            )?;
        }
    }
    Ok(0)
}
