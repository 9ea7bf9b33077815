//! # Models Module Unit Tests / Models 模块单元测试
//!
//! Covers the result record accessors, status mapping, the JSON shape of
//! a result and the console summary built from it.
//!
//! 测试结果记录的访问器、状态映射、结果的 JSON 形式以及由其生成的控制台摘要。

use chrono::Utc;
use std::time::Duration;
use unixbench_runner::reporting::format_summary;
use unixbench_runner::{RunOutcome, RunResult, RunStatus, StopReason};

/// Helper function to create a result / 创建结果的辅助函数
fn result_with(outcome: RunOutcome) -> RunResult {
    RunResult {
        command: vec![
            "/opt/UnixBench/Run".to_string(),
            "-c".to_string(),
            "1".to_string(),
            "-i".to_string(),
            "1".to_string(),
        ],
        output: "line one\nline two\n".to_string(),
        outcome,
        started_at: Utc::now(),
        duration: Duration::from_millis(1500),
    }
}

mod run_result_tests {
    use super::*;

    #[test]
    fn test_succeeded_result() {
        let result = result_with(RunOutcome::Succeeded);
        assert!(result.is_success());
        assert_eq!(result.exit_code(), Some(0));
        assert_eq!(result.error(), None);
        assert_eq!(result.status(), RunStatus::Succeeded);
    }

    #[test]
    fn test_failed_result_keeps_exit_code() {
        let result = result_with(RunOutcome::Failed { exit_code: Some(2) });
        assert!(!result.is_success());
        assert_eq!(result.exit_code(), Some(2));
        assert_eq!(result.status(), RunStatus::Failed);
    }

    #[test]
    fn test_failed_by_signal_has_no_exit_code() {
        let result = result_with(RunOutcome::Failed { exit_code: None });
        assert_eq!(result.exit_code(), None);
    }

    #[test]
    fn test_stopped_result() {
        let result = result_with(RunOutcome::Stopped {
            reason: StopReason::Requested,
            exit_code: None,
        });
        assert!(!result.is_success());
        assert_eq!(result.status(), RunStatus::Stopped);
    }

    #[test]
    fn test_error_result() {
        let result = result_with(RunOutcome::Error {
            message: "No such file or directory".to_string(),
        });
        assert_eq!(result.error(), Some("No such file or directory"));
        assert_eq!(result.exit_code(), None);
        assert_eq!(result.status(), RunStatus::Error);
    }
}

mod run_status_tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RunStatus::Idle.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        for status in [
            RunStatus::Succeeded,
            RunStatus::Failed,
            RunStatus::Stopped,
            RunStatus::Error,
        ] {
            assert!(status.is_terminal(), "{status} should be terminal");
        }
    }
}

mod serialization_tests {
    use super::*;

    #[test]
    fn test_stopped_result_json_shape() {
        let result = result_with(RunOutcome::Stopped {
            reason: StopReason::TimedOut,
            exit_code: Some(143),
        });
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "stopped");
        assert_eq!(json["reason"], "timed_out");
        assert_eq!(json["exit_code"], 143);
        assert_eq!(json["output"], "line one\nline two\n");
    }

    #[test]
    fn test_result_json_deserializes_back() {
        let result = result_with(RunOutcome::Error {
            message: "boom".to_string(),
        });
        let json = serde_json::to_string(&result).unwrap();
        let parsed: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}

mod summary_tests {
    use super::*;

    #[test]
    fn test_summary_lists_command_and_exit_code() {
        unixbench_runner::init(Some("en"));
        let summary = format_summary(&result_with(RunOutcome::Failed { exit_code: Some(7) }));

        assert!(summary.contains("UnixBench Summary"));
        assert!(summary.contains("/opt/UnixBench/Run -c 1 -i 1"));
        assert!(summary.contains("| 7"));
    }

    #[test]
    fn test_summary_shows_error_and_missing_exit_code() {
        unixbench_runner::init(Some("en"));
        let summary = format_summary(&result_with(RunOutcome::Error {
            message: "spawn failed".to_string(),
        }));

        assert!(summary.contains("N/A"));
        assert!(summary.contains("spawn failed"));
    }

    #[test]
    fn test_summary_names_stop_reason() {
        unixbench_runner::init(Some("en"));
        let summary = format_summary(&result_with(RunOutcome::Stopped {
            reason: StopReason::TimedOut,
            exit_code: None,
        }));

        assert!(summary.contains("time limit reached"));
    }
}
