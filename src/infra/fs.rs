//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system checks the runner needs:
//! expanding user-supplied paths and verifying the launcher script.
//!
//! 此模块提供运行器所需的文件系统检查：
//! 展开用户提供的路径并验证启动脚本。

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::config::ConfigError;

/// Why a launcher path cannot be used.
/// 启动脚本路径无法使用的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherIssue {
    /// Nothing exists at the path.
    Missing,
    /// Something exists but is not an executable file.
    NotExecutable,
}

impl fmt::Display for LauncherIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LauncherIssue::Missing => write!(f, "not found"),
            LauncherIssue::NotExecutable => write!(f, "not executable"),
        }
    }
}

/// Expands `~` and environment variables in a path.
///
/// # Arguments
/// * `path` - Path as written by the user
///
/// # Returns
/// The expanded path, or a [`ConfigError::Expand`] if a variable is undefined
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ConfigError::Expand {
        path: raw.to_string(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Checks that `path` exists and that the current user may execute it.
///
/// # Arguments
/// * `path` - Launcher path to check
///
/// # Returns
/// `Ok(())` when the launcher can be spawned, otherwise the [`LauncherIssue`]
pub fn check_launcher(path: &Path) -> Result<(), LauncherIssue> {
    if !path.exists() {
        return Err(LauncherIssue::Missing);
    }
    if !path.is_file() || !is_executable(path) {
        return Err(LauncherIssue::NotExecutable);
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolves a possibly relative path against the current directory without
/// touching the file system.
///
/// # Arguments
/// * `path` - Path to resolve
///
/// # Returns
/// An absolute path, or an I/O error if the current directory is unavailable
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}
