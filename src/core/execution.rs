//! # Run Supervision Module / 运行监督模块
//!
//! [`UnixBenchGenerator`] is the one-shot handle that supervises a single
//! UnixBench execution. Its lifecycle is
//!
//! ```text
//! idle -> running -> { succeeded | failed | stopped | error }
//! ```
//!
//! Terminal states are final. Spawn and runtime problems are recorded in the
//! [`RunResult`] instead of being returned as errors.
//!
//! [`UnixBenchGenerator`] 是监督单次 UnixBench 执行的一次性句柄。
//! 终止状态是最终的。派生和运行时问题会记录在 [`RunResult`] 中，而不是作为错误返回。

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::core::command::{build_command, format_command_line};
use crate::core::config::RunConfig;
use crate::core::models::{RunOutcome, RunResult, RunStatus, StopReason};
use crate::infra::fs::{self, LauncherIssue};
use crate::infra::process::{self, MergedLines};

/// How long a stopped launcher may take to exit before it is killed.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Upper bound on collecting output still buffered after a forced stop.
/// Workers that escaped the process group could otherwise hold the pipes open.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Misuse of a run handle. Runtime failures are never reported this way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("this generator has already been started; create a new one for another run")]
    AlreadyStarted,
}

/// Internal lifecycle state published through a watch channel so that
/// `stop` can observe the run reaching a terminal state.
#[derive(Debug, Clone)]
enum RunState {
    Idle,
    Running,
    Finished(RunResult),
}

/// How the drain loop ended.
enum Drained {
    Exited(std::io::Result<std::process::ExitStatus>),
    Stop(StopReason),
}

/// Supervises one UnixBench run.
///
/// Share it behind an `Arc` when one task drives [`run`](Self::run) and
/// another may call [`stop`](Self::stop).
///
/// 监督一次 UnixBench 运行。
/// 当一个任务驱动 `run` 而另一个任务可能调用 `stop` 时，请通过 `Arc` 共享。
#[derive(Debug)]
pub struct UnixBenchGenerator {
    name: String,
    config: RunConfig,
    grace_period: Duration,
    state: watch::Sender<RunState>,
    cancel: CancellationToken,
}

impl UnixBenchGenerator {
    pub const DEFAULT_NAME: &'static str = "UnixBenchGenerator";

    pub fn new(config: RunConfig) -> Self {
        Self::with_name(config, Self::DEFAULT_NAME)
    }

    pub fn with_name(config: RunConfig, name: impl Into<String>) -> Self {
        let (state, _) = watch::channel(RunState::Idle);
        Self {
            name: name.into(),
            config,
            grace_period: DEFAULT_GRACE_PERIOD,
            state,
            cancel: CancellationToken::new(),
        }
    }

    /// Overrides how long a stop request waits before escalating to SIGKILL.
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The command line this generator runs.
    pub fn command(&self) -> Vec<String> {
        build_command(&self.config)
    }

    pub fn status(&self) -> RunStatus {
        match &*self.state.borrow() {
            RunState::Idle => RunStatus::Idle,
            RunState::Running => RunStatus::Running,
            RunState::Finished(result) => result.status(),
        }
    }

    /// The result record, once the run has reached a terminal state.
    pub fn result(&self) -> Option<RunResult> {
        match &*self.state.borrow() {
            RunState::Finished(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Checks that the working directory holds an executable `Run` launcher.
    ///
    /// Never fails past this boundary: problems are logged and reported as
    /// `false`. Callers should not call [`run`](Self::run) when this is false.
    pub fn validate_environment(&self) -> bool {
        let launcher = self.config.launcher_path();
        match fs::check_launcher(&launcher) {
            Ok(()) => true,
            Err(LauncherIssue::Missing) => {
                error!(path = %launcher.display(), "UnixBench Run script not found");
                false
            }
            Err(LauncherIssue::NotExecutable) => {
                error!(path = %launcher.display(), "UnixBench Run script is not executable");
                false
            }
        }
    }

    /// Runs UnixBench, echoing every output line to this process's stdout.
    ///
    /// See [`run_with_sink`](Self::run_with_sink).
    pub async fn run(&self) -> Result<RunResult, ExecutionError> {
        self.run_with_sink(tokio::io::stdout()).await
    }

    /// Runs UnixBench, echoing every output line to `sink` as it arrives while
    /// also accumulating it for the result.
    ///
    /// Blocks until the launcher exits or is stopped. Only the first call on a
    /// handle runs anything; later calls return [`ExecutionError::AlreadyStarted`].
    ///
    /// 运行 UnixBench，在每行输出到达时回显到 `sink`，同时累积到结果中。
    pub async fn run_with_sink<W>(&self, sink: W) -> Result<RunResult, ExecutionError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let started = self.state.send_if_modified(|state| {
            if matches!(state, RunState::Idle) {
                *state = RunState::Running;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(ExecutionError::AlreadyStarted);
        }

        let _abandoned = AbandonGuard::new(self);
        let result = self.execute(sink).await;
        self.state.send_replace(RunState::Finished(result.clone()));
        Ok(result)
    }

    /// Requests early termination of a live run and waits until it is over.
    ///
    /// The launcher's process group gets SIGTERM, then SIGKILL if it is still
    /// alive after the grace period. Calling this when nothing is running is a
    /// no-op.
    ///
    /// 请求提前终止正在进行的运行，并等待其结束。没有运行时调用此方法不做任何事。
    pub async fn stop(&self) {
        let running = matches!(*self.state.borrow(), RunState::Running);
        if !running {
            debug!(generator = %self.name, "stop requested with no active run");
            return;
        }

        info!(generator = %self.name, "stopping UnixBench");
        let mut finished = self.state.subscribe();
        self.cancel.cancel();
        let _ = finished
            .wait_for(|state| matches!(state, RunState::Finished(_)))
            .await;
    }

    async fn execute<W>(&self, mut sink: W) -> RunResult
    where
        W: AsyncWrite + Unpin + Send,
    {
        let command = build_command(&self.config);
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            workdir = %self.config.workdir.display(),
            command = %format_command_line(&command),
            "running UnixBench"
        );

        let (mut child, mut lines) = match self.spawn(&command) {
            Ok(spawned) => spawned,
            Err(e) => {
                error!(error = %e, "failed to launch UnixBench");
                return RunResult {
                    command,
                    output: String::new(),
                    outcome: RunOutcome::Error {
                        message: e.to_string(),
                    },
                    started_at,
                    duration: start.elapsed(),
                };
            }
        };

        let deadline = self.config.timeout();
        let timeout = async move {
            match deadline {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(timeout);

        let mut output = String::new();
        let mut streams_closed = false;
        let drained = loop {
            tokio::select! {
                line = lines.next(), if !streams_closed => match line {
                    Some(line) => echo_and_collect(&mut sink, &mut output, line).await,
                    None => streams_closed = true,
                },
                status = child.wait(), if streams_closed => break Drained::Exited(status),
                () = self.cancel.cancelled() => break Drained::Stop(StopReason::Requested),
                () = &mut timeout => break Drained::Stop(StopReason::TimedOut),
            }
        };

        let outcome = match drained {
            Drained::Exited(Ok(status)) if status.success() => RunOutcome::Succeeded,
            Drained::Exited(Ok(status)) => {
                log_failure(status.code(), &output);
                RunOutcome::Failed {
                    exit_code: status.code(),
                }
            }
            Drained::Exited(Err(e)) => {
                error!(error = %e, "failed to wait for UnixBench");
                RunOutcome::Error {
                    message: e.to_string(),
                }
            }
            Drained::Stop(reason) => {
                if reason == StopReason::TimedOut {
                    warn!(
                        timeout_secs = self.config.timeout_secs.unwrap_or_default(),
                        "UnixBench exceeded its time limit; stopping"
                    );
                }
                let status = process::terminate(&mut child, self.grace_period).await;
                drain_remaining(&mut lines, &mut sink, &mut output).await;
                match status {
                    Ok(status) => RunOutcome::Stopped {
                        reason,
                        exit_code: status.code(),
                    },
                    Err(e) => {
                        error!(error = %e, "failed to terminate UnixBench");
                        RunOutcome::Error {
                            message: e.to_string(),
                        }
                    }
                }
            }
        };

        if let Err(e) = sink.flush().await {
            debug!(error = %e, "failed to flush UnixBench output");
        }

        RunResult {
            command,
            output,
            outcome,
            started_at,
            duration: start.elapsed(),
        }
    }

    fn spawn(&self, command: &[String]) -> std::io::Result<(tokio::process::Child, MergedLines)> {
        let mut argv = command.to_vec();
        // Relative programs combined with a working directory resolve
        // differently across platforms.
        if let Some(program) = argv.first_mut() {
            let absolute = fs::absolute_path(Path::new(program.as_str()))?;
            *program = absolute.display().to_string();
        }
        process::spawn_merged(&argv, &self.config.workdir)
    }
}

/// Publishes a terminal `Error` state if the run future is dropped while the
/// handle is still `Running` (caller-side timeout, aborted task, lost
/// `select!`). The child itself is reaped by `kill_on_drop`.
struct AbandonGuard<'a> {
    generator: &'a UnixBenchGenerator,
    started_at: DateTime<Utc>,
    start: Instant,
}

impl<'a> AbandonGuard<'a> {
    fn new(generator: &'a UnixBenchGenerator) -> Self {
        Self {
            generator,
            started_at: Utc::now(),
            start: Instant::now(),
        }
    }
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        let generator = self.generator;
        let started_at = self.started_at;
        let duration = self.start.elapsed();
        let abandoned = generator.state.send_if_modified(|state| {
            if !matches!(state, RunState::Running) {
                return false;
            }
            *state = RunState::Finished(RunResult {
                command: build_command(&generator.config),
                output: String::new(),
                outcome: RunOutcome::Error {
                    message: "run was abandoned before it finished".to_string(),
                },
                started_at,
                duration,
            });
            true
        });
        if abandoned {
            warn!(generator = %generator.name, "UnixBench run dropped before completion");
        }
    }
}

/// Writes `line` to the pass-through sink and appends it to the transcript.
async fn echo_and_collect<W>(sink: &mut W, output: &mut String, line: String)
where
    W: AsyncWrite + Unpin + Send,
{
    let mut echoed = line;
    echoed.push('\n');
    if let Err(e) = sink.write_all(echoed.as_bytes()).await {
        debug!(error = %e, "failed to echo UnixBench output");
    }
    output.push_str(&echoed);
}

/// Collects whatever output is still buffered after the launcher was stopped.
async fn drain_remaining<W>(lines: &mut MergedLines, sink: &mut W, output: &mut String)
where
    W: AsyncWrite + Unpin + Send,
{
    let drain = async {
        while let Some(line) = lines.next().await {
            echo_and_collect(sink, output, line).await;
        }
    };
    if tokio::time::timeout(DRAIN_TIMEOUT, drain).await.is_err() {
        warn!("output pipes still open after stop; dropping the rest");
    }
}

fn log_failure(exit_code: Option<i32>, output: &str) {
    let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
    if output.trim().is_empty() {
        warn!(exit_code = %code, "UnixBench failed");
    } else {
        warn!(exit_code = %code, output = %output.trim_end(), "UnixBench failed");
    }
}
