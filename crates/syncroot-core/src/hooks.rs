//! Post-run hook
//!
//! After every target is done, one user-configured command is fired with the
//! run's change set substituted into it. Supported variables:
//!
//! - `$modifieddirs`: modified directories, sorted, joined by single spaces
//! - `$modifiedenvs`: modified environments, sorted, joined by single spaces
//! - `$branchparam`: the branch selector the run was invoked with
//!
//! Substitution is a single pass, so values that themselves contain a
//! variable name are not expanded again.

use syncroot_exec::{ExecutionResult, ProcessRunner};
use tracing::{info, warn};

use crate::ChangeSet;

const MODIFIED_DIRS: &str = "$modifieddirs";
const MODIFIED_ENVS: &str = "$modifiedenvs";
const BRANCH_PARAM: &str = "$branchparam";

/// A post-run command template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRunHook {
    template: String,
}

impl PostRunHook {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.template.trim().is_empty()
    }

    /// Substitute the change set and branch into the template.
    pub fn render(&self, changes: &ChangeSet, branch_param: &str) -> String {
        let values = [
            (MODIFIED_DIRS, changes.joined_directories()),
            (MODIFIED_ENVS, changes.joined_environments()),
            (BRANCH_PARAM, branch_param.to_string()),
        ];

        let mut rendered = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(idx) = rest.find('$') {
            rendered.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            match values.iter().find(|(name, _)| tail.starts_with(name)) {
                Some((name, value)) => {
                    rendered.push_str(value);
                    rest = &tail[name.len()..];
                }
                None => {
                    rendered.push('$');
                    rest = &tail[1..];
                }
            }
        }
        rendered.push_str(rest);
        rendered
    }

    /// Render and execute the hook.
    ///
    /// Returns `None` without running anything when the template is empty.
    /// A failing hook is logged and its result returned; it never aborts
    /// the run.
    pub fn run(
        &self,
        runner: &ProcessRunner,
        changes: &ChangeSet,
        branch_param: &str,
        timeout_secs: u64,
    ) -> Option<ExecutionResult> {
        if self.is_empty() {
            return None;
        }

        let command = self.render(changes, branch_param);
        info!(command = %command, "running post-run command");
        let result = runner.execute(&command, timeout_secs, true);
        if !result.success() {
            warn!(
                command = %command,
                exit_code = result.exit_code,
                output = %result.output.trim_end(),
                "post-run command failed"
            );
        }
        Some(result)
    }
}
