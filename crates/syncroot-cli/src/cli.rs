//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// syncroot - prepare, verify and record content deployments
#[derive(Parser, Debug)]
#[command(name = "syncroot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase diagnostic output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Settings file (.toml, .json, .yaml or .yml)
    #[arg(short, long, global = true, env = "SYNCROOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Plan without touching the filesystem or running hooks
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate every configured directory and report all problems at once
    Check,

    /// Print the SHA-256 checksum of a file
    Checksum {
        /// File to hash
        file: PathBuf,
    },

    /// Move or copy a staged file to its final location
    Promote {
        /// Staged file
        source: PathBuf,

        /// Final location
        dest: PathBuf,

        /// Copy instead of move, leaving the source in place
        #[arg(long)]
        keep_source: bool,
    },

    /// Run a command line with the configured timeout
    ///
    /// The exit status mirrors the command's.
    Exec {
        /// Program and arguments as one string, e.g. "git fetch --prune"
        command: String,

        /// Seconds before the command is killed (0 disables the limit)
        #[arg(long)]
        timeout: Option<u64>,

        /// Log a failure at debug level instead of info
        #[arg(long)]
        allow_failure: bool,
    },

    /// Show a deploy-result file
    Status {
        /// Deploy-result file (defaults to the configured deploy_result_file)
        file: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Fire the post-run command for the given changes
    Postrun {
        /// Modified directory (repeatable)
        #[arg(long = "dir")]
        dirs: Vec<String>,

        /// Modified environment (repeatable)
        #[arg(long = "env")]
        envs: Vec<String>,

        /// Value substituted for $branchparam
        #[arg(long, default_value = "")]
        branch: String,

        /// Command template overriding the configured postrun
        #[arg(long)]
        template: Option<String>,
    },
}
