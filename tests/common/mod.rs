// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Creates a scratch UnixBench directory whose `Run` launcher is a shell
/// script with the given body.
pub fn setup_workdir(script_body: &str) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    write_launcher(temp_dir.path(), script_body, true);
    temp_dir
}

/// Writes `<dir>/Run` with a `#!/bin/sh` header, optionally executable.
pub fn write_launcher(dir: &Path, script_body: &str, executable: bool) -> PathBuf {
    let path = dir.join("Run");
    fs::write(&path, format!("#!/bin/sh\n{script_body}\n")).expect("Failed to write Run script");
    set_mode(&path, if executable { 0o755 } else { 0o644 });
    path
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) {}

/// Writes a `UnixBench.toml` into `dir` and returns its path.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("UnixBench.toml");
    fs::write(&path, content).expect("Failed to write UnixBench.toml");
    path
}
