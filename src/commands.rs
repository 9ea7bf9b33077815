//! # Commands Module / 命令模块
//!
//! Handlers behind each CLI subcommand plus the helpers they share.
//!
//! 每个 CLI 子命令背后的处理程序及其共享的辅助函数。

pub mod check;
pub mod init;
pub mod presets;
pub mod run;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::config::RunConfig;
use crate::core::presets::WorkloadIntensity;
use crate::infra::fs::{LauncherIssue, expand_path};
use crate::infra::t;

/// Loads the base configuration: the given file, else the preset, else defaults.
/// A preset given together with a file overrides the file's counts.
pub(crate) fn load_base_config(
    config: Option<&Path>,
    preset: Option<WorkloadIntensity>,
) -> Result<RunConfig> {
    let mut base = match config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(level) = preset {
        let preset = level.config();
        base.threads = preset.threads;
        base.iterations = preset.iterations;
    }
    Ok(base)
}

/// Applies a `--workdir` override, expanding `~` and environment variables.
pub(crate) fn apply_workdir(config: &mut RunConfig, workdir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = workdir {
        config.workdir = expand_path(&dir)?;
    }
    Ok(())
}

/// Localized description of a launcher problem.
pub(crate) fn describe_issue(issue: LauncherIssue) -> String {
    match issue {
        LauncherIssue::Missing => t!("issue.missing").to_string(),
        LauncherIssue::NotExecutable => t!("issue.not_executable").to_string(),
    }
}
