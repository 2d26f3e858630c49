//! Fatal configuration-error reporting
//!
//! In a normal run the first configuration error ends the run. In validation
//! mode every error is collected so one pass reports all of them, and the
//! exit status is decided at the end by [`FatalReporter::finish`].

use std::io::Write;

use colored::Colorize;
use tracing::debug;

use crate::{Error, Result};

/// Message printed when a validation pass finds nothing wrong.
pub const VALIDATION_SUCCESS: &str = "Configuration successfully parsed.";

/// Abort-or-collect handling for configuration errors, scoped to one run.
#[derive(Debug, Default)]
pub struct FatalReporter {
    validate: bool,
    messages: Vec<String>,
}

impl FatalReporter {
    pub fn new(validate: bool) -> Self {
        Self {
            validate,
            messages: Vec::new(),
        }
    }

    /// Hand an error to the reporter.
    ///
    /// Returns the error back in a normal run. In validation mode the message
    /// is kept and `Ok(())` is returned so the caller can move on.
    pub fn report(&mut self, error: Error) -> Result<()> {
        if !self.validate {
            return Err(error);
        }
        debug!(error = %error, "collected configuration error");
        self.messages.push(error.to_string());
        Ok(())
    }

    /// Unwrap `result`, routing an error through [`FatalReporter::report`].
    pub fn check<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) => self.report(error).map(|()| None),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Print the outcome of a validation pass and return the exit status.
    ///
    /// Collected messages are printed in red and yield status 1. A clean
    /// validation pass prints the success line in green. Outside validation
    /// mode nothing is printed.
    pub fn finish(&self, out: &mut impl Write) -> std::io::Result<i32> {
        if self.has_errors() {
            for message in &self.messages {
                writeln!(out, "{}", message.red())?;
            }
            return Ok(1);
        }
        if self.validate {
            writeln!(out, "{}", VALIDATION_SUCCESS.green())?;
        }
        Ok(0)
    }
}
