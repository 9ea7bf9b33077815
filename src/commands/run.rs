//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which executes UnixBench once
//! according to the resolved configuration, forwards Ctrl-C as a stop
//! request and reports the result.
//!
//! 此模块实现 `run` 命令：根据解析后的配置执行一次 UnixBench，
//! 将 Ctrl-C 转发为停止请求并报告结果。

use anyhow::{Context, Result};
use colored::*;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

use super::{apply_workdir, describe_issue, load_base_config};
use crate::core::command::format_command_line;
use crate::core::config::RunConfig;
use crate::core::execution::UnixBenchGenerator;
use crate::core::models::{RunOutcome, RunResult};
use crate::core::presets::WorkloadIntensity;
use crate::infra::{fs, t};
use crate::reporting::print_summary;

/// Options collected from the `run` subcommand.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub preset: Option<WorkloadIntensity>,
    pub threads: Option<NonZeroU32>,
    pub iterations: Option<NonZeroU32>,
    pub workdir: Option<PathBuf>,
    pub tests: Vec<String>,
    pub verbose: bool,
    pub timeout_secs: Option<u64>,
    pub grace_secs: u64,
    pub json: Option<PathBuf>,
    pub skip_check: bool,
    pub extra_args: Vec<String>,
}

/// Resolves the effective configuration. Precedence, lowest first:
/// defaults, config file, preset, individual flags.
pub fn resolve_config(args: &RunArgs) -> Result<RunConfig> {
    let mut config = load_base_config(args.config.as_deref(), args.preset)?;
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    apply_workdir(&mut config, args.workdir.clone())?;
    if !args.tests.is_empty() {
        config.tests = args.tests.clone();
    }
    if args.verbose {
        config.verbose = true;
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }
    if !args.extra_args.is_empty() {
        config.extra_args = args.extra_args.clone();
    }
    Ok(config)
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// The launcher's exit code when it exited on its own, `1` otherwise,
/// or `2` when the environment check refused to start the run
pub async fn execute(args: RunArgs) -> Result<ExitCode> {
    let config = resolve_config(&args)?;
    let generator = Arc::new(
        UnixBenchGenerator::new(config).with_grace_period(Duration::from_secs(args.grace_secs)),
    );

    if !args.skip_check && !generator.validate_environment() {
        let launcher = generator.config().launcher_path();
        let issue = fs::check_launcher(&launcher)
            .err()
            .map(describe_issue)
            .unwrap_or_default();
        eprintln!(
            "{}",
            t!("run.environment_invalid", path = launcher.display(), issue = issue).red()
        );
        return Ok(ExitCode::from(2));
    }

    println!(
        "{}",
        t!("run.starting", workdir = generator.config().workdir.display()).blue()
    );
    println!(
        "{} {}",
        t!("run.command_prefix").blue(),
        format_command_line(&generator.command())
    );

    let mut runner = {
        let generator = Arc::clone(&generator);
        tokio::spawn(async move { generator.run().await })
    };

    let joined = tokio::select! {
        joined = &mut runner => joined,
        Ok(()) = signal::ctrl_c() => {
            println!("\n{}", t!("run.stopping").yellow());
            generator.stop().await;
            runner.await
        }
    };
    let result = joined.context("UnixBench run task failed")??;

    print_summary(&result);

    if let Some(path) = &args.json {
        write_json(&result, path)?;
        println!("{}", t!("run.result_written", path = path.display()));
    }

    Ok(exit_code_for(&result))
}

fn write_json(result: &RunResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize run result")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run result to {}", path.display()))
}

/// Maps a result onto the process exit code.
pub fn exit_code_for(result: &RunResult) -> ExitCode {
    match &result.outcome {
        RunOutcome::Succeeded => ExitCode::SUCCESS,
        RunOutcome::Failed {
            exit_code: Some(code),
        } => ExitCode::from(u8::try_from(*code).unwrap_or(1)),
        _ => ExitCode::FAILURE,
    }
}
