//! # Harness Contract Module / 框架契约模块
//!
//! The benchmarking harness treats every workload tool through two traits:
//! a [`WorkloadGenerator`] that runs one workload, and a [`WorkloadPlugin`]
//! that describes the tool and produces generators. [`UnixBenchPlugin`] is
//! the UnixBench implementation.
//!
//! 基准测试框架通过两个 trait 使用每个负载工具：
//! 运行单个负载的 [`WorkloadGenerator`]，以及描述工具并生成生成器的 [`WorkloadPlugin`]。

use std::future::Future;

use crate::core::config::{ConfigError, RunConfig};
use crate::core::execution::{ExecutionError, UnixBenchGenerator};
use crate::core::models::RunResult;
use crate::core::presets::WorkloadIntensity;

/// A supervised workload run as seen by the harness.
pub trait WorkloadGenerator {
    fn name(&self) -> &str;

    /// Precondition gate the harness checks before [`start`](Self::start).
    fn validate_environment(&self) -> bool;

    /// Runs the workload to completion (or until stopped).
    fn start(&self) -> impl Future<Output = Result<RunResult, ExecutionError>> + Send;

    /// Requests early termination; a no-op when nothing is running.
    fn stop(&self) -> impl Future<Output = ()> + Send;

    /// The result record once the workload reached a terminal state.
    fn result(&self) -> Option<RunResult>;
}

/// Describes a workload tool and builds generators for it.
pub trait WorkloadPlugin {
    type Config;
    type Generator: WorkloadGenerator;

    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn create_generator(&self, config: Self::Config) -> Self::Generator;
    fn preset_config(&self, level: WorkloadIntensity) -> Self::Config;

    /// System packages the tool needs to build or run.
    fn required_system_packages(&self) -> &'static [&'static str] {
        &[]
    }

    /// Executables that must be on `PATH` on the host.
    fn required_local_tools(&self) -> &'static [&'static str] {
        &[]
    }
}

impl WorkloadGenerator for UnixBenchGenerator {
    fn name(&self) -> &str {
        UnixBenchGenerator::name(self)
    }

    fn validate_environment(&self) -> bool {
        UnixBenchGenerator::validate_environment(self)
    }

    async fn start(&self) -> Result<RunResult, ExecutionError> {
        self.run().await
    }

    async fn stop(&self) {
        UnixBenchGenerator::stop(self).await
    }

    fn result(&self) -> Option<RunResult> {
        UnixBenchGenerator::result(self)
    }
}

/// Plugin definition for UnixBench.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixBenchPlugin;

impl UnixBenchPlugin {
    /// Builds a generator from TOML configuration text.
    pub fn generator_from_toml(&self, content: &str) -> Result<UnixBenchGenerator, ConfigError> {
        Ok(self.create_generator(RunConfig::from_toml_str(content)?))
    }
}

impl WorkloadPlugin for UnixBenchPlugin {
    type Config = RunConfig;
    type Generator = UnixBenchGenerator;

    fn name(&self) -> &'static str {
        "unixbench"
    }

    fn description(&self) -> &'static str {
        "UnixBench micro-benchmark suite built from source"
    }

    fn create_generator(&self, config: RunConfig) -> UnixBenchGenerator {
        UnixBenchGenerator::new(config)
    }

    fn preset_config(&self, level: WorkloadIntensity) -> RunConfig {
        level.config()
    }

    fn required_system_packages(&self) -> &'static [&'static str] {
        // Build dependencies; UnixBench itself is compiled from source.
        &[
            "build-essential",
            "libx11-dev",
            "libgl1-mesa-dev",
            "libxext-dev",
            "wget",
        ]
    }

    fn required_local_tools(&self) -> &'static [&'static str] {
        &["make", "gcc", "wget"]
    }
}
