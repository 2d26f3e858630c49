//! External tool execution for syncroot
//!
//! Fetchers shell out to tools like `git` or `curl`. [`ProcessRunner`] runs
//! one such command line to completion (or to its timeout) and hands back an
//! [`ExecutionResult`]. Whether a failed command is fatal is left entirely to
//! the caller.

pub mod command;
pub mod error;
pub mod result;
pub mod runner;

pub use command::CommandLine;
pub use error::{Error, Result};
pub use result::ExecutionResult;
pub use runner::ProcessRunner;
