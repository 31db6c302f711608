//! Integration tests for embedded JSON detection.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn devlog() -> Command {
    let mut cmd = Command::cargo_bin("devlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/devlog-test-no-config");
    cmd.args(["--color=never", "--no-line-separation"]);
    cmd
}

fn run(input: &str) -> String {
    let output = devlog().write_stdin(input).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn embedded_json_prefix_leads_message() {
    let stdout = run(r#"2026-02-06 00:15:13.449 {"level":"debug","msg":"health check"}"#);
    assert_eq!(stdout, "debug: ▪ 2026-02-06 00:15:13.449 health check\n");
}

#[test]
fn embedded_json_metadata_block() {
    let stdout = run(r#"myapp | {"level":"warn","msg":"disk low","available":"2GB"}"#);
    assert_eq!(
        stdout,
        "warn:  ┏ myapp | disk low\n\
         warn:  ┃ [1] {\n\
         warn:  ┃ [2]   available: '2GB'\n\
         warn:  ┗ [3] }\n"
    );
}

#[test]
fn embedded_json_without_message_shows_prefix() {
    let stdout = run(r#"worker-3 {"level":"info","jobs":2}"#);
    assert!(stdout.starts_with("info:  ┏ worker-3\n"), "{stdout}");
}

#[test]
fn invalid_json_after_brace_treated_as_raw() {
    let stdout = run("some text {not valid json at all}");
    assert_eq!(stdout, "some text {not valid json at all}\n");
}

#[test]
fn first_brace_must_start_the_object() {
    let input = r#"value={count} {"level":"info","msg":"parsed"}"#;
    assert_eq!(run(input), format!("{input}\n"));
}

#[test]
fn embedded_caller_becomes_call_site() {
    devlog()
        .write_stdin(r#"api | {"level":"info","msg":"listening","caller":"cmd/api/main.go:27"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("info:  ┗ at cmd/api/main.go:27"));
}

#[test]
fn embedded_elapsed_number() {
    let stdout = run(r#"2026-01-15T10:30:00.123Z {"level":"warn","msg":"high latency","ms":350}"#);
    assert_eq!(stdout, "warn:  ▪ 2026-01-15T10:30:00.123Z high latency +350ms\n");
}
