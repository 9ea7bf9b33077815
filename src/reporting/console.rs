//! # Console Reporting Module / 控制台报告模块
//!
//! Renders a [`RunResult`] as a short, colored summary block.
//!
//! 将 [`RunResult`] 渲染为简短的彩色摘要块。

use colored::*;

use crate::core::command::format_command_line;
use crate::core::models::{RunOutcome, RunResult, RunStatus, StopReason};
use crate::infra::t;

/// Builds the summary text for a finished run.
///
/// # Output Format / 输出格式
/// ```text
/// --- UnixBench Summary ---
///   - Status    | Succeeded
///   - Exit code | 0
///   - Duration  | 1.23s
///   - Command   | /opt/UnixBench/Run -c 1 -i 1
/// ```
pub fn format_summary(result: &RunResult) -> String {
    let status = result.status();
    let label = status.label();
    let status_colored = match status {
        RunStatus::Succeeded => label.green(),
        RunStatus::Stopped => label.yellow(),
        _ => label.red(),
    };

    let detail = match &result.outcome {
        RunOutcome::Stopped {
            reason: StopReason::TimedOut,
            ..
        } => format!(" ({})", t!("summary.reason_timed_out")),
        RunOutcome::Stopped {
            reason: StopReason::Requested,
            ..
        } => format!(" ({})", t!("summary.reason_requested")),
        _ => String::new(),
    };

    let exit_code = result
        .exit_code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![
        format!("\n{}", t!("summary.banner").bold()),
        format!("  - {:<10} | {}{}", t!("summary.status"), status_colored, detail),
        format!("  - {:<10} | {}", t!("summary.exit_code"), exit_code),
        format!("  - {:<10} | {:.2?}", t!("summary.duration"), result.duration),
        format!(
            "  - {:<10} | {}",
            t!("summary.command"),
            format_command_line(&result.command)
        ),
    ];
    if let Some(message) = result.error() {
        lines.push(format!("  - {:<10} | {}", t!("summary.error"), message.red()));
    }
    lines.join("\n")
}

/// Prints the summary of a finished run to stdout.
/// 将已完成运行的摘要打印到 stdout。
pub fn print_summary(result: &RunResult) {
    println!("{}", format_summary(result));
}
