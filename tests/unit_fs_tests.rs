//! # File System Helpers Unit Tests / 文件系统辅助函数单元测试
//!
//! Launcher checks, path expansion and absolute path resolution.

mod common;

use std::path::Path;
use tempfile::tempdir;
use unixbench_runner::ConfigError;
use unixbench_runner::infra::fs::{LauncherIssue, absolute_path, check_launcher, expand_path};

mod check_launcher_tests {
    use super::*;

    #[test]
    fn test_missing_launcher() {
        let dir = tempdir().unwrap();
        assert_eq!(
            check_launcher(&dir.path().join("Run")),
            Err(LauncherIssue::Missing)
        );
    }

    #[test]
    fn test_directory_is_not_a_launcher() {
        let dir = tempdir().unwrap();
        assert_eq!(check_launcher(dir.path()), Err(LauncherIssue::NotExecutable));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_launcher() {
        let dir = tempdir().unwrap();
        let launcher = common::write_launcher(dir.path(), "echo hi", false);
        assert_eq!(check_launcher(&launcher), Err(LauncherIssue::NotExecutable));
    }

    #[test]
    fn test_executable_launcher() {
        let dir = common::setup_workdir("echo hi");
        assert_eq!(check_launcher(&dir.path().join("Run")), Ok(()));
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(LauncherIssue::Missing.to_string(), "not found");
        assert_eq!(LauncherIssue::NotExecutable.to_string(), "not executable");
    }
}

mod path_tests {
    use super::*;

    #[test]
    fn test_plain_path_is_unchanged() {
        assert_eq!(
            expand_path(Path::new("/opt/UnixBench")).unwrap(),
            Path::new("/opt/UnixBench")
        );
    }

    #[test]
    fn test_undefined_variable_is_rejected() {
        let err = expand_path(Path::new("$UNIXBENCH_RUNNER_SURELY_UNSET/ub")).unwrap_err();
        assert!(matches!(err, ConfigError::Expand { .. }));
    }

    #[test]
    fn test_absolute_path_resolves_relative() {
        let resolved = absolute_path(Path::new("UnixBench/Run")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("UnixBench/Run"));
    }
}
