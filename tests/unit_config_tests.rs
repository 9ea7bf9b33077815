//! # Config Module Unit Tests / 配置模块单元测试
//!
//! Construction-time validation, TOML loading and defaults of `RunConfig`.

mod common;

use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;
use unixbench_runner::{ConfigError, RunConfig};

#[test]
fn test_zero_threads_is_rejected() {
    let err = RunConfig::new(0, 1).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroThreads));
}

#[test]
fn test_zero_iterations_is_rejected() {
    let err = RunConfig::new(1, 0).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroIterations));
}

#[test]
fn test_new_keeps_defaults_for_other_fields() {
    let cfg = RunConfig::new(4, 2).unwrap();
    assert_eq!(cfg.threads.get(), 4);
    assert_eq!(cfg.iterations.get(), 2);
    assert!(cfg.tests.is_empty());
    assert!(cfg.extra_args.is_empty());
    assert!(!cfg.verbose);
    assert_eq!(cfg.workdir, PathBuf::from("/opt/UnixBench"));
    assert_eq!(cfg.timeout_secs, None);
}

#[test]
fn test_empty_toml_yields_defaults() {
    let cfg = RunConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, RunConfig::default());
}

#[test]
fn test_full_toml() {
    let cfg = RunConfig::from_toml_str(
        r#"
threads = 8
iterations = 2
tests = ["dhry2reg", "whetstone-double"]
workdir = "/srv/UnixBench"
extra_args = ["--foo"]
verbose = true
timeout_secs = 300
"#,
    )
    .unwrap();

    assert_eq!(cfg.threads.get(), 8);
    assert_eq!(cfg.iterations.get(), 2);
    assert_eq!(cfg.tests, vec!["dhry2reg", "whetstone-double"]);
    assert_eq!(cfg.workdir, PathBuf::from("/srv/UnixBench"));
    assert_eq!(cfg.extra_args, vec!["--foo"]);
    assert!(cfg.verbose);
    assert_eq!(cfg.timeout(), Some(Duration::from_secs(300)));
}

#[test]
fn test_debug_is_an_alias_for_verbose() {
    let cfg = RunConfig::from_toml_str("debug = true").unwrap();
    assert!(cfg.verbose);
}

#[test]
fn test_zero_counts_in_toml_are_rejected() {
    assert!(matches!(
        RunConfig::from_toml_str("threads = 0"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        RunConfig::from_toml_str("iterations = 0"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_negative_counts_in_toml_are_rejected() {
    assert!(RunConfig::from_toml_str("threads = -1").is_err());
}

#[test]
fn test_invalid_toml_is_rejected() {
    assert!(matches!(
        RunConfig::from_toml_str("threads = [unclosed"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_undefined_variable_in_workdir_is_rejected() {
    let err = RunConfig::from_toml_str(r#"workdir = "$UNIXBENCH_RUNNER_SURELY_UNDEFINED_VAR/x""#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Expand { .. }));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = common::write_config(dir.path(), "threads = 3\ntests = [\"pipe\"]\n");
    let cfg = RunConfig::load(&path).unwrap();
    assert_eq!(cfg.threads.get(), 3);
    assert_eq!(cfg.tests, vec!["pipe"]);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = RunConfig::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_toml_round_trip() {
    let cfg = RunConfig::new(2, 5)
        .unwrap()
        .with_tests(["execl"])
        .with_workdir("/tmp/ub")
        .with_extra_args(["--x"])
        .with_verbose(true)
        .with_timeout(Some(Duration::from_secs(42)));
    let text = cfg.to_toml_string().unwrap();
    assert_eq!(RunConfig::from_toml_str(&text).unwrap(), cfg);
}

#[test]
fn test_launcher_path() {
    let cfg = RunConfig::default().with_workdir("/srv/ub");
    assert_eq!(cfg.launcher_path(), PathBuf::from("/srv/ub/Run"));
}

#[test]
fn test_recommended_timeout() {
    // Short runs get the two-minute floor plus the buffer.
    assert_eq!(
        RunConfig::new(1, 1).unwrap().recommended_timeout(),
        Duration::from_secs(130)
    );
    // Longer runs scale with the iteration count.
    assert_eq!(
        RunConfig::new(1, 5).unwrap().recommended_timeout(),
        Duration::from_secs(310)
    );
}
