//! Postrun command implementation

use std::io::Write;

use colored::Colorize;
use syncroot_core::{ChangeTracker, PostRunHook};
use syncroot_exec::ProcessRunner;

use crate::context::Context;
use crate::error::Result;

/// Render and run the post-run command for the given changes.
///
/// The exit status is the hook's. With `--dry-run` the rendered command is
/// printed instead.
pub fn run_postrun(
    ctx: &Context,
    dirs: &[String],
    envs: &[String],
    branch: &str,
    template: Option<&str>,
    out: &mut impl Write,
) -> Result<i32> {
    let settings = ctx.settings()?;
    let hook = PostRunHook::new(
        template
            .map(str::to_string)
            .unwrap_or_else(|| settings.postrun_template()),
    );

    if hook.is_empty() {
        writeln!(out, "{}", "No post-run command configured".dimmed())?;
        return Ok(0);
    }

    let tracker = ChangeTracker::new();
    for dir in dirs {
        tracker.record_directory(dir.as_str());
    }
    for env in envs {
        tracker.record_environment(env.as_str());
    }
    let changes = tracker.snapshot();

    if ctx.dry_run {
        writeln!(out, "{} {}", "dry-run:".yellow(), hook.render(&changes, branch))?;
        return Ok(0);
    }

    let runner = ProcessRunner::new(settings.use_cache_fallback)?;
    match hook.run(&runner, &changes, branch, settings.timeout) {
        Some(result) => {
            write!(out, "{}", result.output)?;
            Ok(result.exit_code)
        }
        None => Ok(0),
    }
}
