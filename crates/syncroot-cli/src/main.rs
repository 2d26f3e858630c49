//! syncroot CLI
//!
//! Thin command surface over the syncroot crates.

mod cli;
mod commands;
mod context;
mod error;

use std::io::Write;

use clap::Parser;
use colored::Colorize;
use syncroot_core::{Verbosity, logging};

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(Verbosity::from_occurrences(cli.verbose)) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(command = ?cli.command, "starting");

    let ctx = Context::new(cli.config, cli.dry_run);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let code = execute_command(&ctx, cli.command, &mut out)?;
    out.flush()?;
    Ok(code)
}

fn execute_command(ctx: &Context, cmd: Commands, out: &mut impl Write) -> Result<i32> {
    match cmd {
        Commands::Check => commands::run_check(ctx, out),
        Commands::Checksum { file } => commands::run_checksum(&file, out),
        Commands::Promote {
            source,
            dest,
            keep_source,
        } => commands::run_promote(ctx, &source, &dest, keep_source, out),
        Commands::Exec {
            command,
            timeout,
            allow_failure,
        } => commands::run_exec(ctx, &command, timeout, allow_failure, out),
        Commands::Status { file, json } => {
            commands::run_status(ctx, file.as_deref(), json, out)
        }
        Commands::Postrun {
            dirs,
            envs,
            branch,
            template,
        } => commands::run_postrun(ctx, &dirs, &envs, &branch, template.as_deref(), out),
    }
}
