//! Status command implementation

use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use syncroot_core::DeployResultStore;
use syncroot_fs::NormalizedPath;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Print the deploy-result file at `file`, or the configured one.
pub fn run_status(
    ctx: &Context,
    file: Option<&Path>,
    json: bool,
    out: &mut impl Write,
) -> Result<i32> {
    let file = match file {
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(ctx.settings()?.deploy_result_file),
    };
    if !file.exists() {
        return Err(CliError::user(format!(
            "no deploy result at {}",
            file.display()
        )));
    }

    let result = DeployResultStore::new()
        .try_read(&NormalizedPath::new(&file))
        .map_err(CliError::Core)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        return Ok(0);
    }

    writeln!(out, "{}", "Deploy Result".bold())?;
    writeln!(out)?;
    writeln!(out, "{}:   {}", "File".dimmed(), file.display())?;
    writeln!(out)?;

    if result.is_empty() {
        writeln!(out, "  {}", "No environments recorded".dimmed())?;
        return Ok(0);
    }

    for env in result.iter() {
        let outcome = if env.deploy_success {
            "ok".green()
        } else {
            "failed".red()
        };
        writeln!(
            out,
            "  {} {} ({}) at {} [{}]",
            "+".green(),
            env.name.cyan(),
            env.signature,
            env.finished_at.to_rfc3339(),
            outcome
        )?;
        for (name, module) in &env.modules {
            let cache = if module.cache_hit { " (cached)" } else { "" };
            writeln!(out, "      {} {}{}", name, module.version.dimmed(), cache)?;
        }
    }

    Ok(0)
}
