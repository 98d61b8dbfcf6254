//! Logging and verbosity tests.
//!
//! The verbose flag and SECRETSYNC_LOG control diagnostic output on stderr;
//! stdout stays clean either way.

mod support;
use support::*;

#[test]
fn test_default_no_log_output() {
    let fake = FakeGitHub::start();
    let t = Test::new();

    let output = t.list(&fake, "alice/app");
    assert_success(&output);

    let err = stderr(&output);
    assert!(
        !err.contains("DEBUG") && !err.contains("TRACE"),
        "default mode should not show debug/trace output, got: {}",
        err
    );
}

#[test]
fn test_verbose_flag_shows_debug_output() {
    let fake = FakeGitHub::start();
    let t = Test::new();

    let output = t
        .against(&fake)
        .args(["--verbose", "secrets", "list", "alice/app"])
        .output()
        .unwrap();
    assert_success(&output);

    assert_stderr_contains(&output, "DEBUG");
    assert_stdout_excludes(&output, "DEBUG");
}

#[test]
fn test_log_env_var_overrides_verbose() {
    let fake = FakeGitHub::start();
    let t = Test::new();

    let output = t
        .against(&fake)
        .env("SECRETSYNC_LOG", "secretsync=error")
        .args(["--verbose", "secrets", "list", "alice/app"])
        .output()
        .unwrap();
    assert_success(&output);

    assert!(!stderr(&output).contains("DEBUG"));
}

#[test]
fn test_token_never_logged() {
    let fake = FakeGitHub::start();
    let t = Test::new();
    let file = t.env_file(".env", "A=supersecretvalue\n");

    let output = t
        .against(&fake)
        .env("SECRETSYNC_LOG", "secretsync=trace")
        .args(["secrets", "push", "alice/app"])
        .arg(&file)
        .output()
        .unwrap();
    assert_success(&output);

    let err = stderr(&output);
    assert!(!err.contains(TOKEN), "token leaked into logs");
    assert!(!err.contains("supersecretvalue"), "value leaked into logs");
}
