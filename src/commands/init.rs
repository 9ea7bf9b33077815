//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module writes a `UnixBench.toml` configuration, either straight from
//! the defaults or through an interactive command-line wizard.
//!
//! 此模块写入 `UnixBench.toml` 配置，可以直接使用默认值，也可以通过交互式命令行向导。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for counts, directory, sub-tests and flags
//! - **Time Limit Suggestion**: Offers a limit derived from the iteration count
//! - **Overwrite Protection**: Confirmation prompt before replacing a file
//!
//! - **交互式向导**: 提示输入次数、目录、子测试和标志
//! - **时间上限建议**: 根据迭代次数提供建议的时间上限
//! - **覆盖保护**: 替换文件前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::RunConfig;
use crate::infra::fs::expand_path;
use crate::infra::t;

/// File name `init` writes by default.
pub const DEFAULT_CONFIG_FILE: &str = "UnixBench.toml";

/// Sub-tests shipped with UnixBench's `Run` script, offered by the wizard.
pub const KNOWN_TESTS: &[&str] = &[
    "dhry2reg",
    "whetstone-double",
    "execl",
    "fstime",
    "fsbuffer",
    "fsdisk",
    "pipe",
    "context1",
    "spawn",
    "syscall",
    "shell1",
    "shell8",
];

/// Runs the wizard (or writes defaults when `non_interactive`) and saves
/// the configuration to `output`.
///
/// 运行向导（或在 `non_interactive` 时直接写入默认值），并将配置保存到 `output`。
pub fn run_init_wizard(output: &Path, language: &str, non_interactive: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if non_interactive {
        return write_config(output, &RunConfig::default());
    }

    println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
    println!("{}", t!("init.description", locale = language));

    if output.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = output.display()))
            .default(false)
            .interact()
            .context(t!("init.user_input_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let defaults = RunConfig::default();

    let threads: u32 = Input::with_theme(&theme)
        .with_prompt(t!("init.threads_prompt", locale = language))
        .default(defaults.threads.get())
        .validate_with(|value: &u32| -> Result<(), &'static str> {
            if *value > 0 { Ok(()) } else { Err("must be greater than zero") }
        })
        .interact_text()
        .context(t!("init.user_input_failed", locale = language).to_string())?;

    let iterations: u32 = Input::with_theme(&theme)
        .with_prompt(t!("init.iterations_prompt", locale = language))
        .default(defaults.iterations.get())
        .validate_with(|value: &u32| -> Result<(), &'static str> {
            if *value > 0 { Ok(()) } else { Err("must be greater than zero") }
        })
        .interact_text()
        .context(t!("init.user_input_failed", locale = language).to_string())?;

    let workdir: String = Input::with_theme(&theme)
        .with_prompt(t!("init.workdir_prompt", locale = language))
        .default(defaults.workdir.display().to_string())
        .interact_text()
        .context(t!("init.user_input_failed", locale = language).to_string())?;

    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init.tests_prompt", locale = language))
        .items(KNOWN_TESTS)
        .interact()
        .context(t!("init.user_input_failed", locale = language).to_string())?;

    let verbose = Confirm::with_theme(&theme)
        .with_prompt(t!("init.verbose_prompt", locale = language))
        .default(false)
        .interact()
        .context(t!("init.user_input_failed", locale = language).to_string())?;

    let mut config = RunConfig::new(threads, iterations)?
        .with_workdir(expand_path(&PathBuf::from(workdir))?)
        .with_tests(selections.into_iter().map(|i| KNOWN_TESTS[i]))
        .with_verbose(verbose);

    let suggested = config.recommended_timeout();
    let limit = Confirm::with_theme(&theme)
        .with_prompt(t!("init.timeout_prompt", locale = language, secs = suggested.as_secs()))
        .default(false)
        .interact()
        .context(t!("init.user_input_failed", locale = language).to_string())?;
    if limit {
        config = config.with_timeout(Some(suggested));
    }

    write_config(output, &config)
}

fn write_config(path: &Path, config: &RunConfig) -> Result<()> {
    let toml_string = config.to_toml_string()?;
    fs::write(path, toml_string)
        .with_context(|| format!("Failed to write configuration to {}", path.display()))?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.written", path = path.display()).bold()
    );
    Ok(())
}
