//! # Check Command Module / 检查命令模块
//!
//! Implements `check`: environment validation without running anything.

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use super::{apply_workdir, describe_issue, load_base_config};
use crate::core::execution::UnixBenchGenerator;
use crate::infra::{fs, t};

/// Exits with success only when the launcher exists and is executable.
pub fn execute(config: Option<PathBuf>, workdir: Option<PathBuf>) -> Result<ExitCode> {
    let mut run_config = load_base_config(config.as_deref(), None)?;
    apply_workdir(&mut run_config, workdir)?;

    let launcher = run_config.launcher_path();
    let generator = UnixBenchGenerator::new(run_config);
    if generator.validate_environment() {
        println!(
            "{}",
            t!("check.ok", path = launcher.display()).green()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let issue = fs::check_launcher(&launcher)
        .err()
        .map(describe_issue)
        .unwrap_or_default();
    println!(
        "{}",
        t!("check.failed", path = launcher.display(), issue = issue).red()
    );
    Ok(ExitCode::FAILURE)
}
