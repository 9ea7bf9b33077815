//! # Data Models Module / 数据模型模块
//!
//! This module defines the result record of a UnixBench run and the
//! status values a run handle moves through.
//!
//! 此模块定义 UnixBench 运行的结果记录以及运行句柄经历的状态值。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::infra::t;

/// Why a run was brought down before it finished on its own.
/// 运行在自行结束之前被终止的原因。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The supervisor called `stop`.
    /// 监督者调用了 `stop`。
    Requested,
    /// The configured wall-clock limit elapsed.
    /// 配置的运行时间上限已到。
    TimedOut,
}

/// Terminal outcome of a run.
///
/// Runtime problems never surface as errors; they are folded into one of
/// these variants so a supervisor only ever has to inspect data.
///
/// 运行的最终结果。运行时问题不会以错误形式抛出，而是归入以下变体之一。
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The launcher exited with code 0.
    /// 启动脚本以退出码 0 退出。
    Succeeded,
    /// The launcher exited on its own with a non-zero code, or was killed by
    /// a signal the runner did not send (`exit_code` is then `None`).
    /// 启动脚本自行以非零退出码退出，或被非运行器发送的信号终止。
    Failed { exit_code: Option<i32> },
    /// The runner terminated the launcher.
    /// 运行器终止了启动脚本。
    Stopped {
        reason: StopReason,
        exit_code: Option<i32>,
    },
    /// The launcher could not be spawned or supervised.
    /// 无法派生或监督启动脚本。
    Error { message: String },
}

/// The record produced once per run handle.
/// 每个运行句柄产生一次的结果记录。
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// The exact argument vector that was executed / 实际执行的参数向量
    pub command: Vec<String>,
    /// Everything the launcher wrote to stdout and stderr, one line per `\n`
    /// 启动脚本写到 stdout 和 stderr 的全部内容
    pub output: String,
    /// How the run ended / 运行如何结束
    #[serde(flatten)]
    pub outcome: RunOutcome,
    /// When the run was started / 运行开始的时间
    pub started_at: DateTime<Utc>,
    /// Wall-clock time from spawn to terminal state / 从派生到终止状态的时间
    pub duration: Duration,
}

impl RunResult {
    /// The launcher's exit code, when it exited with one.
    pub fn exit_code(&self) -> Option<i32> {
        match &self.outcome {
            RunOutcome::Succeeded => Some(0),
            RunOutcome::Failed { exit_code } | RunOutcome::Stopped { exit_code, .. } => *exit_code,
            RunOutcome::Error { .. } => None,
        }
    }

    /// The error description for runs that could not be launched or completed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RunOutcome::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Succeeded)
    }

    pub fn status(&self) -> RunStatus {
        match self.outcome {
            RunOutcome::Succeeded => RunStatus::Succeeded,
            RunOutcome::Failed { .. } => RunStatus::Failed,
            RunOutcome::Stopped { .. } => RunStatus::Stopped,
            RunOutcome::Error { .. } => RunStatus::Error,
        }
    }
}

/// Where a run handle is in its lifecycle.
/// 运行句柄在其生命周期中所处的位置。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
    Stopped,
    Error,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Idle | RunStatus::Running)
    }

    /// Gets the localized label of the status for display.
    /// 获取状态的本地化标签以供显示。
    pub fn label(&self) -> String {
        match self {
            RunStatus::Idle => t!("status.idle").to_string(),
            RunStatus::Running => t!("status.running").to_string(),
            RunStatus::Succeeded => t!("status.succeeded").to_string(),
            RunStatus::Failed => t!("status.failed").to_string(),
            RunStatus::Stopped => t!("status.stopped").to_string(),
            RunStatus::Error => t!("status.error").to_string(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
