//! Integration tests for mixed JSON + non-JSON input.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn devlog() -> Command {
    let mut cmd = Command::cargo_bin("devlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/devlog-test-no-config");
    cmd
}

#[test]
fn json_and_plain_text_mixed() {
    let input = r#"Starting application...
{"level":"info","msg":"server started","port":8080}
Plain text log line
{"level":"error","msg":"connection failed"}
Shutting down."#;

    let output = devlog()
        .args(["--color=never", "--no-line-separation"])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines,
        [
            "Starting application...",
            "info:  ┏ server started",
            "info:  ┃ [1] {",
            "info:  ┃ [2]   port: 8080",
            "info:  ┗ [3] }",
            "Plain text log line",
            "error: ▪ connection failed",
            "Shutting down.",
        ]
    );
}

#[test]
fn malformed_json_passthrough() {
    let input = r#"{"level":"info", "msg":}
{"level":"info","msg":"valid line"}"#;

    devlog()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"level\":\"info\", \"msg\":}\n"))
        .stdout(predicate::str::contains("info:  ▪ valid line"))
        .stderr("");
}

#[test]
fn verbose_reports_parse_errors() {
    let input = "ok\n{\"level\":\"info\", \"msg\":}\n";
    devlog()
        .args(["--color=never", "--verbose"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"level\":\"info\", \"msg\":}"))
        .stderr(predicate::str::starts_with("devlog: line 2: parse error: "));
}

#[test]
fn json_array_passthrough_as_raw() {
    let input = "[1, 2, 3]\n{\"level\":\"info\",\"msg\":\"after array\"}";
    devlog()
        .args(["--color=never", "--no-line-separation"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("[1, 2, 3]\ninfo:  ▪ after array\n");
}

#[test]
fn no_recognized_fields_renders_metadata() {
    let input = r#"{"custom_a":"value_a","custom_b":42}"#;
    devlog()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("info:  ┏ (no message)"))
        .stdout(predicate::str::contains("custom_a: 'value_a',"))
        .stdout(predicate::str::contains("custom_b: 42"));
}

#[test]
fn empty_json_object_handled() {
    devlog()
        .args(["--color=never", "--no-line-separation"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("info:  ▪ (no message)\n");
}

#[test]
fn fixture_stream() {
    let input = std::fs::read_to_string("tests/fixtures/mixed.jsonl").unwrap();
    let output = devlog()
        .args(["--color=never", "--timestamps"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("Starting application...\n"));
    assert!(stdout.contains(
        "info:  ┏ Logging initialized\n\
         info:  ┃ 2026-01-15 10:30:00.000Z\n\
         info:  ┗ at index.js:12 [bootstrap]\n\n"
    ));
    assert!(stdout.contains("debug: ┃ at cars/garage.js:48\n"));
    assert!(stdout.contains("warn:  ┏ web-1 | slow request +350ms"));
    assert!(stdout.contains("error: ┗ [3]     at main (/home/dev/app/src/index.js:30:3)\n"));
    assert!(stdout.contains("{\"level\":\"info\", \"message\":}\n"));
    assert!(stdout.ends_with("Shutting down.\n"));
}
