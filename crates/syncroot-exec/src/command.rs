//! Command-line splitting

use tracing::debug;

/// A program and its arguments, split from a single command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Split `line` at the first space into program and argument string, then
    /// split the argument string with shell quoting rules.
    ///
    /// Returns `None` for a blank line. An argument string with unbalanced
    /// quotes yields no arguments rather than an error.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (program, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args = shlex::split(rest).unwrap_or_else(|| {
            debug!(program, arguments = rest, "unbalanced quoting, running without arguments");
            Vec::new()
        });

        Some(Self {
            program: program.to_string(),
            args,
        })
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", shlex::try_quote(arg).unwrap_or_else(|_| arg.into()))?;
        }
        Ok(())
    }
}
