//! # Command Builder Module / 命令构建模块
//!
//! Maps a [`RunConfig`] onto the exact argument vector handed to UnixBench's
//! `Run` launcher. The order of the tokens is fixed:
//!
//! ```text
//! <workdir>/Run -c <threads> -i <iterations> [tests...] [--verbose] [extra_args...]
//! ```
//!
//! 将 [`RunConfig`] 映射为传递给 UnixBench `Run` 启动脚本的确切参数向量。
//! 参数顺序是固定的。

use crate::core::config::RunConfig;

/// Flag `Run` takes for the number of parallel copies.
pub const THREADS_FLAG: &str = "-c";
/// Flag `Run` takes for the number of iterations.
pub const ITERATIONS_FLAG: &str = "-i";
/// Flag appended when the config asks for verbose output.
pub const VERBOSE_FLAG: &str = "--verbose";

/// Builds the argument vector for `config`. The first element is the launcher.
///
/// This is a pure function of its input; two calls with equal configs
/// always produce equal vectors.
///
/// 为 `config` 构建参数向量。第一个元素是启动脚本。
pub fn build_command(config: &RunConfig) -> Vec<String> {
    let mut cmd = Vec::with_capacity(5 + config.tests.len() + 1 + config.extra_args.len());
    cmd.push(config.launcher_path().display().to_string());
    cmd.push(THREADS_FLAG.to_string());
    cmd.push(config.threads.to_string());
    cmd.push(ITERATIONS_FLAG.to_string());
    cmd.push(config.iterations.to_string());
    cmd.extend(config.tests.iter().cloned());
    if config.verbose {
        cmd.push(VERBOSE_FLAG.to_string());
    }
    cmd.extend(config.extra_args.iter().cloned());
    cmd
}

/// Renders an argument vector as a single shell-quoted line for logs and
/// reports. Tokens that cannot be quoted (interior NUL) are shown debug-escaped.
pub fn format_command_line(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| format!("{argv:?}"))
}
