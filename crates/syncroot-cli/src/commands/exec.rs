//! Exec command implementation

use std::io::Write;

use syncroot_exec::ProcessRunner;

use crate::context::Context;
use crate::error::Result;

/// Run `command` and mirror its output and exit status.
///
/// Without `--timeout` the configured timeout applies.
pub fn run_exec(
    ctx: &Context,
    command: &str,
    timeout: Option<u64>,
    allow_failure: bool,
    out: &mut impl Write,
) -> Result<i32> {
    let settings = ctx.settings()?;
    let runner = ProcessRunner::new(settings.use_cache_fallback)?;
    let result = runner.execute(command, timeout.unwrap_or(settings.timeout), allow_failure);

    write!(out, "{}", result.output)?;
    if !result.output.is_empty() && !result.output.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(result.exit_code)
}
