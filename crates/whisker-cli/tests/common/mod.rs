//! Shared test utilities for whisker-cli integration tests.

use std::path::Path;

use assert_cmd::Command;

/// Environment variables that would change CLI behavior under test.
const ISOLATED_ENV: &[&str] = &[
    "ANTHROPIC_API_KEY",
    "WHISKER_VERBOSE",
    "WHISKER_QUIET",
    "WHISKER_CONFIG",
    "WHISKER_DATA_DIR",
    "WHISKER_COLOR",
];

/// Get a Command for the whisker binary.
///
/// # Panics
///
/// Panics if the whisker binary cannot be found.
#[allow(deprecated)]
pub fn whisker_cmd() -> Command {
    Command::cargo_bin("whisker").expect("whisker binary should exist")
}

/// A whisker command isolated in `root`.
///
/// The config path does not exist, so built-in defaults apply, and facts are
/// stored under `root/data`. No API key is visible.
pub fn isolated_cmd(root: &Path) -> Command {
    let mut cmd = whisker_cmd();
    for var in ISOLATED_ENV {
        cmd.env_remove(var);
    }
    cmd.arg("--config")
        .arg(root.join("config.yaml"))
        .arg("--data-dir")
        .arg(root.join("data"))
        .arg("--color")
        .arg("never");
    cmd
}
