//! # Child Process Module / 子进程模块
//!
//! Spawns a command with stdout and stderr merged into one line stream and
//! terminates it gracefully (SIGTERM to the process group, then SIGKILL
//! after a grace period).
//!
//! 派生一个命令，将 stdout 和 stderr 合并为一个行流，
//! 并优雅地终止它（先向进程组发送 SIGTERM，宽限期后发送 SIGKILL）。

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, warn};

/// Stream of output lines from both stdout and stderr, in arrival order.
/// It ends once both pipes are closed.
pub type MergedLines = UnboundedReceiverStream<String>;

/// Spawns `argv` rooted at `workdir` with both output pipes feeding a single
/// line stream.
///
/// On Unix the child leads a new process group so that termination reaches
/// every worker it forks.
///
/// # Arguments
/// * `argv` - Program followed by its arguments; must not be empty
/// * `workdir` - Working directory of the child
///
/// # Returns
/// The child handle and its merged output stream
pub fn spawn_merged(argv: &[String], workdir: &Path) -> std::io::Result<(Child, MergedLines)> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"))?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn()?;

    let (tx, rx) = mpsc::unbounded_channel();
    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, tx.clone(), "stdout");
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, tx, "stderr");
    }

    Ok((child, UnboundedReceiverStream::new(rx)))
}

/// Reads `reader` line by line and forwards each line, without its line
/// terminator, into `tx`. Invalid UTF-8 is replaced rather than dropped.
fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>, source: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                        if buf.last() == Some(&b'\r') {
                            buf.pop();
                        }
                    }
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    debug!(source, error = %e, "output pipe read failed");
                    break;
                }
            }
        }
    });
}

/// Terminates `child`, first politely and then by force.
///
/// Sends SIGTERM to the child's process group and waits up to `grace` for it
/// to exit. If it is still alive afterwards, SIGKILL is sent and the exit is
/// awaited. A child that already exited is simply reaped.
///
/// # Returns
/// The exit status of the child
pub async fn terminate(child: &mut Child, grace: Duration) -> std::io::Result<ExitStatus> {
    if let Some(status) = child.try_wait()? {
        return Ok(status);
    }

    request_exit(child);

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(status) => status,
        Err(_) => {
            warn!(
                grace_ms = grace.as_millis() as u64,
                "process ignored termination request; killing"
            );
            force_kill(child);
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "kill request failed");
            }
            child.wait().await
        }
    }
}

#[cfg(unix)]
fn request_exit(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            debug!(pid, error = %e, "SIGTERM to process group failed");
        }
    }
}

#[cfg(not(unix))]
fn request_exit(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        debug!(error = %e, "termination request failed");
    }
}

/// Kills the whole process group; `Child::kill` alone only reaches the leader.
#[cfg(unix)]
fn force_kill(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            debug!(pid, error = %e, "SIGKILL to process group failed");
        }
    }
}

#[cfg(not(unix))]
fn force_kill(_child: &mut Child) {}
