//! Assertions over captured command output.

use std::process::Output;

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Captured stdout.
pub fn stdout(output: &Output) -> String {
    text(&output.stdout)
}

/// Captured stderr.
pub fn stderr(output: &Output) -> String {
    text(&output.stderr)
}

/// Parse stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

/// Fail with the child's stderr unless it exited zero.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command exited with {}:\n{}",
        output.status,
        stderr(output)
    );
}

/// Fail unless the child exited non-zero.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "command succeeded unexpectedly, stdout:\n{}",
        stdout(output)
    );
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let out = stdout(output);
    assert!(out.contains(needle), "stdout lacks {:?}:\n{}", needle, out);
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    let err = stderr(output);
    assert!(err.contains(needle), "stderr lacks {:?}:\n{}", needle, err);
}

pub fn assert_stdout_excludes(output: &Output, needle: &str) {
    let out = stdout(output);
    assert!(!out.contains(needle), "stdout has {:?}:\n{}", needle, out);
}
