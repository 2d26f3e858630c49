//! Check command implementation

use std::io::Write;

use syncroot_core::{FatalReporter, Preparation, RunOptions, SyncRun, strip_component};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Validate the settings file and every directory it names.
///
/// Problems are collected rather than aborting, so one pass lists all of
/// them. Missing directories are created unless `--dry-run` is given.
pub fn run_check(ctx: &Context, out: &mut impl Write) -> Result<i32> {
    let settings = match ctx.settings() {
        Ok(settings) => settings,
        Err(CliError::Core(e)) if e.is_configuration() => {
            let mut reporter = FatalReporter::new(true);
            reporter.report(e)?;
            return Ok(reporter.finish(out)?);
        }
        Err(e) => return Err(e),
    };

    let options = RunOptions {
        dry_run: ctx.dry_run,
        validate: true,
    };
    let run = SyncRun::new(settings.clone(), options)?;

    for (label, path) in settings.directory_settings() {
        run.prepare_target(path, &label, Preparation::Reuse)?;
    }

    for source in settings.sources.values() {
        if let Some(component) = &source.strip_component
            && let Err(e) = strip_component(component, "")
        {
            run.report(e)?;
        }
    }

    Ok(run.finish_validation(out)?)
}
