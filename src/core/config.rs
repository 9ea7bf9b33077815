//! # Run Configuration Module / 运行配置模块
//!
//! Defines [`RunConfig`], the validated record of UnixBench run parameters,
//! and the errors raised while constructing or loading it.
//!
//! 定义 [`RunConfig`]（经过验证的 UnixBench 运行参数记录）
//! 以及构建或加载它时产生的错误。

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::infra::fs::expand_path;

/// File name of the UnixBench launcher script inside the working directory.
pub const LAUNCHER: &str = "Run";

/// Default location of a UnixBench checkout built from source.
pub const DEFAULT_WORKDIR: &str = "/opt/UnixBench";

/// Extra slack added on top of the per-iteration estimate in
/// [`RunConfig::recommended_timeout`].
pub const TIMEOUT_BUFFER_SECS: u64 = 10;

/// Errors raised while constructing or loading a [`RunConfig`].
/// These are the only failures that cross the library boundary as errors.
///
/// 构建或加载 [`RunConfig`] 时产生的错误。
/// 这是唯一会作为错误跨越库边界的失败类型。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threads must be greater than zero")]
    ZeroThreads,
    #[error("iterations must be greater than zero")]
    ZeroIterations,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to expand working directory `{path}`: {message}")]
    Expand { path: String, message: String },
}

/// Parameters of a single UnixBench run.
///
/// `threads` and `iterations` are non-zero by type, so every value of this
/// struct satisfies the positivity invariant whether it was built through
/// [`RunConfig::new`] or deserialized from TOML.
///
/// Fields are public so the CLI can layer file, preset and flag values while
/// resolving a configuration. Once handed to a [`UnixBenchGenerator`] the
/// generator owns it and only exposes `&RunConfig`; editing a clone never
/// changes what that generator runs.
///
/// [`UnixBenchGenerator`]: crate::core::execution::UnixBenchGenerator
///
/// 单次 UnixBench 运行的参数。
/// `threads` 和 `iterations` 在类型上保证非零。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunConfig {
    /// Concurrency degree, passed as `-c` to `Run`.
    /// 并发度，作为 `-c` 传递给 `Run`。
    #[serde(default = "default_count")]
    pub threads: NonZeroU32,
    /// Repetition count, passed as `-i` to `Run`.
    /// 重复次数，作为 `-i` 传递给 `Run`。
    #[serde(default = "default_count")]
    pub iterations: NonZeroU32,
    /// Sub-tests to run, in order. Empty runs the suite's default selection.
    /// 要运行的子测试（按顺序）。为空时运行套件的默认选择。
    #[serde(default)]
    pub tests: Vec<String>,
    /// Directory that holds the `Run` launcher; the child runs rooted here.
    /// 存放 `Run` 启动脚本的目录；子进程以此为工作目录运行。
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
    /// Opaque arguments appended verbatim after everything else.
    /// 原样追加在最后的不透明参数。
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Adds `--verbose` to the command line.
    /// 在命令行中添加 `--verbose`。
    #[serde(default, alias = "debug")]
    pub verbose: bool,
    /// Optional wall-clock limit in seconds. When it elapses the run is
    /// stopped the same way an explicit stop request would.
    /// 可选的运行时间上限（秒）。超时后按与显式停止相同的方式终止运行。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_count() -> NonZeroU32 {
    NonZeroU32::MIN
}

fn default_workdir() -> PathBuf {
    PathBuf::from(DEFAULT_WORKDIR)
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threads: default_count(),
            iterations: default_count(),
            tests: vec![],
            workdir: default_workdir(),
            extra_args: vec![],
            verbose: false,
            timeout_secs: None,
        }
    }
}

impl RunConfig {
    /// Creates a configuration with the given counts and defaults elsewhere.
    ///
    /// Fails with [`ConfigError::ZeroThreads`] or
    /// [`ConfigError::ZeroIterations`] when either count is zero.
    pub fn new(threads: u32, iterations: u32) -> Result<Self, ConfigError> {
        let threads = NonZeroU32::new(threads).ok_or(ConfigError::ZeroThreads)?;
        let iterations = NonZeroU32::new(iterations).ok_or(ConfigError::ZeroIterations)?;
        Ok(Self {
            threads,
            iterations,
            ..Self::default()
        })
    }

    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tests = tests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_secs = timeout.map(|d| d.as_secs());
        self
    }

    /// Parses a configuration from TOML text and expands `~`/`$VAR` in the
    /// working directory.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: RunConfig = toml::from_str(content)?;
        config.workdir = expand_path(&config.workdir)?;
        Ok(config)
    }

    /// Loads a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the configuration as TOML, the format [`RunConfig::load`] reads.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path of the `Run` launcher inside the working directory.
    pub fn launcher_path(&self) -> PathBuf {
        self.workdir.join(LAUNCHER)
    }

    /// The configured wall-clock limit, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// A generous limit derived from the iteration count:
    /// a fixed buffer plus at least two minutes, or one minute per iteration.
    pub fn recommended_timeout(&self) -> Duration {
        let per_iterations = 60 * u64::from(self.iterations.get());
        Duration::from_secs(TIMEOUT_BUFFER_SECS + per_iterations.max(120))
    }
}
