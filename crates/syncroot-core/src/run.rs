//! One synchronization run
//!
//! [`SyncRun`] is shared by reference between worker threads while targets
//! are prepared and fetched, and [`SyncRun::finish`] is called once after the
//! workers are joined.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use syncroot_exec::{ExecutionResult, ProcessRunner};
use syncroot_fs::{DirectoryManager, NormalizedPath, Purge};
use tracing::{debug, info, warn};

use crate::{
    ChangeSet, ChangeTracker, DeployResult, DeployResultStore, Error, FatalReporter, PostRunHook,
    Result, RunOptions, Settings, strip_component,
};

/// How a target directory is brought into a known state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preparation {
    /// Create it if needed and keep existing content.
    Reuse,
    /// Throw existing content away and start from an empty directory.
    Purge,
}

/// What [`SyncRun::finish`] did.
#[derive(Debug, Clone, Default)]
pub struct Finish {
    /// Where the deploy result was written, if it was.
    pub deploy_result: Option<NormalizedPath>,
    /// Outcome of the post-run hook, if one ran.
    pub hook: Option<ExecutionResult>,
    pub changes: ChangeSet,
}

/// Shared state of one run.
#[derive(Debug)]
pub struct SyncRun {
    settings: Settings,
    options: RunOptions,
    directories: DirectoryManager,
    runner: ProcessRunner,
    changes: ChangeTracker,
    reporter: Mutex<FatalReporter>,
    deploy_results: DeployResultStore,
}

impl SyncRun {
    pub fn new(settings: Settings, options: RunOptions) -> Result<Self> {
        let runner = ProcessRunner::new(settings.use_cache_fallback)?;
        Ok(Self {
            directories: DirectoryManager::with_dry_run(options.dry_run),
            reporter: Mutex::new(FatalReporter::new(options.validate)),
            changes: ChangeTracker::new(),
            deploy_results: DeployResultStore::new(),
            runner,
            settings,
            options,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Route a configuration error through the run's reporter.
    pub fn report(&self, error: Error) -> Result<()> {
        self.reporter
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .report(error)
    }

    /// Bring `path` into the requested state and record it as modified.
    ///
    /// Returns `Ok(None)` when a configuration error was collected in
    /// validation mode, or when a purge failed and the target was skipped.
    pub fn prepare_target(
        &self,
        path: impl AsRef<Path>,
        label: &str,
        preparation: Preparation,
    ) -> Result<Option<NormalizedPath>> {
        let dir = match preparation {
            Preparation::Reuse => match self.directories.ensure_directory(path, label) {
                Ok(dir) => dir,
                Err(e) => return self.report(e.into()).map(|()| None),
            },
            Preparation::Purge => {
                let raw = path.as_ref();
                if raw.as_os_str().is_empty() {
                    let missing = syncroot_fs::Error::MissingDirectorySetting {
                        label: label.to_string(),
                    };
                    return self.report(missing.into()).map(|()| None);
                }
                let dir = NormalizedPath::new(raw);
                if self.directories.purge_and_recreate(&dir, label) == Purge::Failed {
                    return Ok(None);
                }
                dir
            }
        };

        self.changes.record_directory(dir.clone());
        Ok(Some(dir))
    }

    /// Record a modified environment, stripped by its source's
    /// `strip_component` if one is configured. Returns the recorded name.
    pub fn record_environment(&self, source: Option<&str>, environment: &str) -> Result<String> {
        let component = source
            .and_then(|name| self.settings.sources.get(name))
            .and_then(|s| s.strip_component.as_deref());

        let name = match component {
            Some(component) => match strip_component(component, environment) {
                Ok(name) => name,
                Err(e) => {
                    self.report(e)?;
                    environment.to_string()
                }
            },
            None => environment.to_string(),
        };

        self.changes.record_environment(name.clone());
        Ok(name)
    }

    /// Run a fetch command with the configured timeout.
    pub fn fetch(&self, command: &str, allow_failure: bool) -> ExecutionResult {
        self.runner
            .execute(command, self.settings.timeout, allow_failure)
    }

    /// Persist `record` into `location` and fire the post-run hook.
    ///
    /// A failed write is logged and does not stop the hook. In dry-run mode
    /// nothing is written and no hook runs.
    pub fn finish(
        &self,
        location: &NormalizedPath,
        record: &DeployResult,
        branch_param: &str,
    ) -> Finish {
        let changes = self.changes.snapshot();
        if self.options.dry_run {
            info!(
                directories = changes.directories.len(),
                environments = changes.environments.len(),
                "dry-run: skipping deploy result and post-run command"
            );
            return Finish {
                changes,
                ..Finish::default()
            };
        }

        let path = location.join(&self.settings.deploy_result_file);
        let deploy_result = match self.deploy_results.write(&path, record) {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(path = %path, error = %e, "could not write deploy result");
                None
            }
        };

        let hook = PostRunHook::new(self.settings.postrun_template()).run(
            &self.runner,
            &changes,
            branch_param,
            self.settings.timeout,
        );
        debug!(hook_ran = hook.is_some(), "run finished");

        Finish {
            deploy_result,
            hook,
            changes,
        }
    }

    /// Print the reporter's verdict and return the process exit status.
    pub fn finish_validation(&self, out: &mut impl Write) -> std::io::Result<i32> {
        self.reporter
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .finish(out)
    }
}
