//! Integration tests for custom keys and the config file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn devlog() -> Command {
    let mut cmd = Command::cargo_bin("devlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/devlog-test-no-config");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn custom_message_key() {
    let input = r#"{"level":"info","summary":"something happened","port":8080}"#;
    devlog()
        .arg("--color=never")
        .arg("--message-key=summary")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("info:  ┏ something happened"))
        .stdout(predicate::str::contains("port: 8080"));
}

#[test]
fn custom_level_key() {
    let input = r#"{"sev":"warn","msg":"disk low"}"#;
    devlog()
        .arg("--color=never")
        .arg("--level-key=sev")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("warn:  ▪ disk low"));
}

#[test]
fn custom_timestamp_key() {
    let input = r#"{"logged_at":"2026-01-15T10:30:00Z","level":"info","msg":"hello"}"#;
    devlog()
        .arg("--color=never")
        .arg("--timestamps")
        .arg("--timestamp-key=logged_at")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("info:  ┃ 2026-01-15 10:30:00.000Z"));
}

#[test]
fn config_file_settings() {
    let file = config_file(
        r#"
show_timestamps = true
add_line_separation = false

[inspect]
compact = true

[keys]
message = "event_text"
level = "sev"
"#,
    );

    let input = r#"{"sev":"warn","event_text":"disk full","time":"2026-01-15T10:30:00Z","disk":"/dev/sda1"}"#;
    devlog()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            "warn:  ┏ disk full\n\
             warn:  ┃ 2026-01-15 10:30:00.000Z\n\
             warn:  ┗ [1] { disk: '/dev/sda1' }\n",
        );
}

#[test]
fn config_file_color_always() {
    let file = config_file("color = \"always\"\n");
    let output = devlog()
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(r#"{"level":"info","msg":"hi"}"#)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("\x1b["));
}

#[test]
fn cli_overrides_config_file() {
    let file = config_file("[keys]\nmessage = \"event_text\"\n");

    let input = r#"{"body":"from body","event_text":"from event"}"#;
    devlog()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .arg("--message-key=body")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("info:  ┏ from body"))
        .stdout(predicate::str::contains("event_text: 'from event'"));
}

#[test]
fn config_from_xdg_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("devlog")).unwrap();
    std::fs::write(
        dir.path().join("devlog").join("config.toml"),
        "add_line_separation = false\n",
    )
    .unwrap();

    #[allow(deprecated)]
    Command::cargo_bin("devlog")
        .unwrap()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("--color=never")
        .write_stdin(r#"{"level":"info","msg":"hi"}"#)
        .assert()
        .success()
        .stdout("info:  ▪ hi\n");
}

#[test]
fn invalid_config_file_exits_one() {
    let file = config_file("color = \"sometimes\"\n");
    devlog()
        .arg(format!("--config={}", file.path().display()))
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("devlog: "));
}

#[test]
fn missing_config_file_exits_one() {
    devlog()
        .arg("--config=/nonexistent/devlog/config.toml")
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read config file"));
}
