//! Shared test utilities for nestcfg integration tests.
//!
//! Invariants / Assumptions:
//! - Every command targets a file inside a per-test temporary directory.
//! - Host environment that changes file resolution or logging is cleared.

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Returns a hermetic `nestcfg` command operating on `file`.
pub fn nestcfg_cmd(file: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nestcfg");
    cmd.env_remove("NESTCFG_FILE").env_remove("RUST_LOG");
    cmd.arg("--file").arg(file);
    cmd
}

/// Returns the path of `name` inside `dir` without creating it.
pub fn config_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
