use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use devlog::cli::{Cli, ColorMode};
use devlog::config::Config;
use devlog::formatter::LineFormatter;

fn main() -> ExitCode {
    // Reset SIGPIPE so upstream writers see a clean SIGPIPE instead of a
    // BrokenPipeError when devlog exits early (e.g. piped into `head`).
    reset_sigpipe();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "devlog", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("devlog: {e}");
            return ExitCode::from(1);
        }
    };

    let use_color = resolve_color_mode(config.color_mode);
    let formatter = LineFormatter::from_config(&config, use_color);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut line_buf = String::new();

    for (number, line_result) in stdin.lock().lines().enumerate() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => {
                eprintln!("devlog: read error: {e}");
                return ExitCode::from(2);
            }
        };

        line_buf.clear();
        let parse_error = formatter.format_line(&line, &mut line_buf);

        if let Err(e) = writeln!(writer, "{line_buf}") {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return ExitCode::SUCCESS;
            }
            eprintln!("devlog: write error: {e}");
            return ExitCode::from(2);
        }

        if config.verbose
            && let Some(e) = parse_error
        {
            // Keep stdout and stderr interleaved in line order.
            let _ = writer.flush();
            eprintln!("devlog: line {}: {e}", number + 1);
        }
    }

    if let Err(e) = writer.flush() {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return ExitCode::SUCCESS;
        }
        eprintln!("devlog: flush error: {e}");
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some_and(|v| !v.is_empty()) {
                return true;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// Rust ignores SIGPIPE so that writes surface `BrokenPipe` errors. For a
/// filter in the middle of a pipeline that makes the upstream writer fail
/// instead of stopping quietly.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
