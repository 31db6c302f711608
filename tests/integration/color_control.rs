//! Integration tests for color control: `NO_COLOR`, `FORCE_COLOR`, --color flag, `TERM`.

use assert_cmd::Command;

const INPUT: &str = r#"{"level":"info","msg":"hello","port":8080}"#;

#[allow(deprecated)]
fn devlog() -> Command {
    let mut cmd = Command::cargo_bin("devlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/devlog-test-no-config");
    cmd.env_remove("NO_COLOR").env_remove("FORCE_COLOR");
    cmd
}

fn has_ansi(cmd: &mut Command) -> bool {
    let output = cmd.write_stdin(INPUT).output().unwrap();
    String::from_utf8_lossy(&output.stdout).contains("\x1b[")
}

#[test]
fn color_never_disables_ansi() {
    assert!(!has_ansi(devlog().arg("--color=never")));
}

#[test]
fn color_always_enables_ansi() {
    assert!(has_ansi(devlog().arg("--color=always")));
}

#[test]
fn color_always_tints_glyphs_with_level_color() {
    let output = devlog()
        .arg("--color=always")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    // info is green; glyphs reuse the level's SGR sequence.
    assert!(stdout.starts_with("\x1b[32minfo"), "{stdout:?}");
    assert!(stdout.contains("\x1b[32m\x1b[2m┏"), "{stdout:?}");
}

#[test]
fn no_color_env_disables_colors() {
    assert!(!has_ansi(devlog().env("NO_COLOR", "1")));
}

#[test]
fn color_always_overrides_no_color() {
    assert!(has_ansi(devlog().arg("--color=always").env("NO_COLOR", "1")));
}

#[test]
fn piped_stdout_disables_colors_by_default() {
    assert!(!has_ansi(&mut devlog()));
}

#[test]
fn force_color_enables_colors_when_piped() {
    assert!(has_ansi(devlog().env("FORCE_COLOR", "1")));
}

#[test]
fn term_dumb_disables_colors() {
    assert!(!has_ansi(devlog().env("TERM", "dumb")));
}

#[test]
fn color_never_overrides_force_color() {
    assert!(!has_ansi(devlog().arg("--color=never").env("FORCE_COLOR", "1")));
}
