//! Integration tests for basic stdin->stdout piping.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn devlog() -> Command {
    let mut cmd = Command::cargo_bin("devlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/devlog-test-no-config");
    cmd
}

fn run(args: &[&str], input: &str) -> String {
    let output = devlog()
        .arg("--color=never")
        .args(args)
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn empty_stdin_exits_zero() {
    devlog().write_stdin("").assert().success().stdout("");
}

#[test]
fn single_json_line_is_one_line_block() {
    let stdout = run(&[], r#"{"level":"info","message":"hello"}"#);
    assert_eq!(stdout, "info:  ▪ hello\n\n");
}

#[test]
fn no_line_separation_drops_blank_line() {
    let stdout = run(
        &["--no-line-separation"],
        "{\"level\":\"info\",\"msg\":\"a\"}\n{\"level\":\"warn\",\"msg\":\"b\"}\n",
    );
    assert_eq!(stdout, "info:  ▪ a\nwarn:  ▪ b\n");
}

#[test]
fn metadata_block_with_indices() {
    let input = r#"{"level":"debug","message":"Debug an object","make":"Ford","model":"Mustang","year":1969}"#;
    let stdout = run(&["--no-line-separation"], input);
    assert_eq!(
        stdout,
        "debug: ┏ Debug an object\n\
         debug: ┃ [1] {\n\
         debug: ┃ [2]   make: 'Ford',\n\
         debug: ┃ [3]   model: 'Mustang',\n\
         debug: ┃ [4]   year: 1969\n\
         debug: ┗ [5] }\n"
    );
}

#[test]
fn metadata_keeps_input_key_order() {
    let input = r#"{"level":"info","msg":"order","time":"2026-01-15T10:30:00Z","zone":"eu","app":"api","port":8080,"mode":"dev"}"#;
    let stdout = run(&["--no-line-separation"], input);
    assert_eq!(
        stdout,
        "info:  ┏ order\n\
         info:  ┃ [1] {\n\
         info:  ┃ [2]   zone: 'eu',\n\
         info:  ┃ [3]   app: 'api',\n\
         info:  ┃ [4]   port: 8080,\n\
         info:  ┃ [5]   mode: 'dev'\n\
         info:  ┗ [6] }\n"
    );
}

#[test]
fn indices_are_zero_padded() {
    let fields: Vec<String> = (0..12).map(|i| format!(r#""k{i}":{i}"#)).collect();
    let input = format!(r#"{{"level":"info","msg":"many",{}}}"#, fields.join(","));
    let stdout = run(&["--no-line-separation"], &input);
    assert!(stdout.contains("info:  ┃ [01] {"), "{stdout}");
    assert!(stdout.contains("info:  ┗ [14] }"), "{stdout}");
}

#[test]
fn winston_callee_renders_call_site_line() {
    let input = r#"{"level":"info","message":"hi","_callee":{"functionName":"someFunction","filePath":"/home/me/app/src/lib/foo.js","lineNumber":"21"}}"#;
    let stdout = run(&["--no-line-separation"], input);
    assert_eq!(
        stdout,
        "info:  ┏ hi\ninfo:  ┗ at lib/foo.js:21 [someFunction]\n"
    );
}

#[test]
fn base_path_strips_prefix() {
    let input = r#"{"level":"info","msg":"hi","caller":"/srv/app/pkg/server.go:42"}"#;
    devlog()
        .args(["--color=never", "--base-path=/srv/app"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("at pkg/server.go:42"));
}

#[test]
fn stack_lines_precede_metadata() {
    let input = r#"{"level":"error","message":"Unexpected error","stack":"Error: Unexpected error\n    at main (/app/src/index.js:3:9)","code":7}"#;
    let stdout = run(&["--no-line-separation"], input);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "error: ┏ Unexpected error");
    assert_eq!(lines[1], "error: ┃ [1] Error: Unexpected error");
    assert_eq!(lines[2], "error: ┃ [2]     at main (/app/src/index.js:3:9)");
    assert_eq!(lines[3], "error: ┃ [3] {");
    assert_eq!(lines[5], "error: ┗ [5] }");
}

#[test]
fn empty_message_placeholder() {
    let stdout = run(&[], r#"{"level":"info","omitting the message":"works as well"}"#);
    assert!(stdout.starts_with("info:  ┏ (no message)\n"), "{stdout}");
    assert!(stdout.contains("'omitting the message': 'works as well'"));
}

#[test]
fn timestamps_flag_adds_line() {
    let input = r#"{"time":"2026-01-15T10:30:00.123Z","level":"info","msg":"hello"}"#;
    let stdout = run(&["--timestamps", "--no-line-separation"], input);
    assert_eq!(stdout, "info:  ▪ hello\ninfo:  ┃ 2026-01-15 10:30:00.123Z\n");

    let hidden = run(&["--no-line-separation"], input);
    assert_eq!(hidden, "info:  ▪ hello\n");
}

#[test]
fn elapsed_field_is_appended_to_head() {
    let stdout = run(&[], r#"{"level":"info","msg":"tick","ms":"+5ms"}"#);
    assert!(stdout.starts_with("info:  ▪ tick +5ms\n"), "{stdout}");
}

#[test]
fn depth_limits_nesting() {
    let input = r#"{"level":"info","msg":"deep","a":{"b":{"c":1}}}"#;
    devlog()
        .args(["--color=never", "--depth=0"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("a: [Object]"));
}

#[test]
fn compact_joins_short_objects() {
    let input = r#"{"level":"info","msg":"m","a":1}"#;
    devlog()
        .args(["--color=never", "--compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("info:  ┗ [1] { a: 1 }"));
}

#[test]
fn many_lines_exit_zero() {
    let input = "line1\nline2\nline3\n";
    devlog().arg("--color=never").write_stdin(input).assert().success();
}

#[test]
fn numeric_and_alias_levels() {
    let input = "{\"level\":50,\"msg\":\"a\"}\n{\"level\":\"verbose\",\"msg\":\"b\"}\n{\"msg\":\"c\"}\n";
    let stdout = run(&["--no-line-separation"], input);
    assert_eq!(stdout, "error: ▪ a\ndebug: ▪ b\ninfo:  ▪ c\n");
}

#[test]
fn completions_are_generated() {
    devlog()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("devlog"));
}
