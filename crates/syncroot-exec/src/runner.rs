//! Bounded execution of a single command line
//!
//! The runner owns a small tokio runtime and exposes a blocking
//! [`ProcessRunner::execute`], so worker threads can call it directly. Each
//! call spawns one child, drains stdout and stderr into a shared buffer, and
//! waits for exit under an optional timeout.

use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{CommandLine, Error, ExecutionResult, Result};

/// How long output is still collected after the child has exited.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Runs external commands and classifies their outcome.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    runtime: Arc<Runtime>,
    use_cache_fallback: bool,
}

impl ProcessRunner {
    /// Create a runner.
    ///
    /// With `use_cache_fallback` set, failed commands are logged at debug
    /// level because the caller is expected to fall back to cached content.
    pub fn new(use_cache_fallback: bool) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("syncroot-exec")
            .enable_io()
            .enable_time()
            .build()
            .map_err(Error::Runtime)?;

        Ok(Self {
            runtime: Arc::new(runtime),
            use_cache_fallback,
        })
    }

    /// Run `command_line` and wait for it.
    ///
    /// `timeout_secs == 0` waits indefinitely. On timeout the child is killed
    /// and reaped before returning. Must not be called from inside an async
    /// context.
    pub fn execute(
        &self,
        command_line: &str,
        timeout_secs: u64,
        allow_failure: bool,
    ) -> ExecutionResult {
        let started = Instant::now();

        let mut result = match CommandLine::parse(command_line) {
            Some(command) => self.runtime.block_on(run(&command, timeout_secs)),
            None => ExecutionResult::failed("empty command line".to_string(), "", false),
        };
        result.duration = started.elapsed();

        let duration_ms = result.duration.as_millis() as u64;
        if !result.success() && (allow_failure || self.use_cache_fallback) {
            debug!(
                command = command_line,
                exit_code = result.exit_code,
                timed_out = result.timed_out,
                duration_ms,
                "command failed, caller tolerates failure"
            );
        } else {
            info!(
                command = command_line,
                exit_code = result.exit_code,
                timed_out = result.timed_out,
                duration_ms,
                "executed command"
            );
        }

        result
    }
}

async fn run(command: &CommandLine, timeout_secs: u64) -> ExecutionResult {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    // Own process group, so a timeout can take down the whole tree
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return ExecutionResult::failed(
                format!("failed to execute '{command}': {e}"),
                "",
                false,
            );
        }
    };

    let sink = Arc::new(Mutex::new(Vec::new()));
    let mut stdout_task = tokio::spawn(drain(child.stdout.take(), Arc::clone(&sink)));
    let mut stderr_task = tokio::spawn(drain(child.stderr.take(), Arc::clone(&sink)));

    let waited = if timeout_secs == 0 {
        Some(child.wait().await)
    } else {
        tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait())
            .await
            .ok()
    };

    let Some(waited) = waited else {
        kill_tree(&mut child);
        let _ = child.wait().await;
        settle(&mut stdout_task, &mut stderr_task).await;
        return ExecutionResult::failed(
            format!("'{command}' timed out after {timeout_secs}s and was killed"),
            &collected(&sink),
            true,
        );
    };

    // Background processes may keep the pipes open after the child exits
    settle(&mut stdout_task, &mut stderr_task).await;
    let captured = collected(&sink);
    match waited {
        Ok(status) => classify(command, status, captured),
        Err(e) => ExecutionResult::failed(
            format!("failed waiting for '{command}': {e}"),
            &captured,
            false,
        ),
    }
}

/// SIGKILL the child's process group, then the child itself.
fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        // SAFETY: killpg only sends a signal; the group id is the child's pid
        // because it was spawned with process_group(0).
        unsafe {
            libc::killpg(pid as libc::pid_t, libc::SIGKILL);
        }
    }
    let _ = child.start_kill();
}

/// Give the output drains a short grace period, then stop them.
async fn settle(stdout_task: &mut JoinHandle<()>, stderr_task: &mut JoinHandle<()>) {
    let drained = tokio::time::timeout(DRAIN_GRACE, async {
        let _ = (&mut *stdout_task).await;
        let _ = (&mut *stderr_task).await;
    })
    .await;
    if drained.is_err() {
        debug!("output pipes still open after exit, dropping remaining output");
        stdout_task.abort();
        stderr_task.abort();
    }
}

fn classify(command: &CommandLine, status: ExitStatus, captured: String) -> ExecutionResult {
    match status.code() {
        Some(exit_code) => ExecutionResult {
            exit_code,
            output: captured,
            timed_out: false,
            duration: Duration::ZERO,
        },
        None => ExecutionResult::failed(
            format!("'{command}' did not exit normally ({status})"),
            &captured,
            false,
        ),
    }
}

async fn drain<R: AsyncRead + Unpin>(reader: Option<R>, sink: Arc<Mutex<Vec<u8>>>) {
    let Some(mut reader) = reader else {
        return;
    };
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let mut buffer = sink.lock().unwrap_or_else(|e| e.into_inner());
                buffer.extend_from_slice(&chunk[..n]);
            }
        }
    }
}

fn collected(sink: &Mutex<Vec<u8>>) -> String {
    let bytes = sink.lock().unwrap_or_else(|e| e.into_inner());
    String::from_utf8_lossy(&bytes).into_owned()
}
