//! # UnixBench Runner Library / UnixBench Runner 库
//!
//! This library drives the UnixBench suite as one interchangeable workload
//! generator of a benchmarking harness. It turns a typed [`RunConfig`] into a
//! `Run` command line, supervises the child process, echoes its merged output
//! live, and hands back a [`RunResult`] record.
//!
//! 此库将 UnixBench 套件作为基准测试框架中可互换的负载生成器来驱动。
//! 它把类型化的 [`RunConfig`] 转换为 `Run` 命令行，监督子进程，
//! 实时回显其合并输出，并返回一个 [`RunResult`] 记录。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, command building, run supervision and presets
//! - `infra` - Process spawning/termination and file system checks
//! - `plugin` - The harness-facing generator and plugin contracts
//! - `reporting` - Console summary of a finished run
//! - `cli` / `commands` - Command-line interface
//!
//! - `core` - 配置、命令构建、运行监督和预设
//! - `infra` - 进程派生/终止以及文件系统检查
//! - `plugin` - 面向框架的生成器和插件契约
//! - `reporting` - 已完成运行的控制台摘要
//! - `cli` / `commands` - 命令行接口

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod plugin;
pub mod reporting;

// Re-export commonly used items
pub use core::command::build_command;
pub use core::config::{ConfigError, RunConfig};
pub use core::execution::{ExecutionError, UnixBenchGenerator};
pub use core::models::{RunOutcome, RunResult, RunStatus, StopReason};
pub use core::presets::WorkloadIntensity;
pub use plugin::{UnixBenchPlugin, WorkloadGenerator, WorkloadPlugin};

/// Initializes the application's internationalization (i18n).
///
/// An explicit `requested` locale wins; otherwise the system locale is used.
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "en"), and finally falls back to "en".
/// Returns the locale that was applied.
pub fn init(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale.as_str()) {
        locale.as_str()
    } else {
        locale
            .split(['-', '_'])
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
    lang.to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
