use std::time::Duration;

/// Outcome of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit status of the child, or 1 if it did not exit normally.
    pub exit_code: i32,
    /// Standard output and standard error, merged in arrival order.
    pub output: String,
    /// The child was killed because the timeout elapsed.
    pub timed_out: bool,
    /// Wall-clock time from spawn to reap.
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }

    /// A result for an invocation that did not end in a normal exit.
    ///
    /// `description` is placed ahead of whatever output was captured.
    pub(crate) fn failed(description: String, captured: &str, timed_out: bool) -> Self {
        let output = if captured.is_empty() {
            description
        } else {
            format!("{description}\n{captured}")
        };
        Self {
            exit_code: 1,
            output,
            timed_out,
            duration: Duration::ZERO,
        }
    }
}
