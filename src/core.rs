//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the UnixBench runner:
//! the run configuration, the command builder, result models, presets and
//! the one-shot run supervisor.
//!
//! 此模块包含 UnixBench 运行器的核心功能：
//! 运行配置、命令构建器、结果模型、预设以及一次性运行监督器。

pub mod command;
pub mod config;
pub mod execution;
pub mod models;
pub mod presets;

// Re-exports
pub use command::build_command;
pub use config::RunConfig;
pub use execution::UnixBenchGenerator;
pub use models::RunResult;
