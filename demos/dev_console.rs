//! Leveled logger wrapped by `init`, so every line names the code that logged it.
//!
//! Run with `cargo run --example dev_console`.

use devlog::{FormatOptions, LeveledLog, LogArgs, Logger, init, transport};
use serde_json::json;

fn some_function<L: LeveledLog>(log: &L) {
    log.trace("Logging initialized");
    log.debug(("Debug an object", json!({"make": "Ford", "model": "Mustang", "year": 1969})));
    log.debug(("Returned value", json!({"value": null})));
    log.info(json!({"omitting the message": "works as well"}));
}

fn some_other_function<L: LeveledLog>(log: &L) {
    log.info((
        "Information",
        json!({
            "options": ["Lorem ipsum", "dolor sit amet"],
            "values": ["Donec augue eros, ultrices."],
        }),
    ));
    log.warn("Warning");

    let err = std::io::Error::other("Unexpected error");
    log.error(LogArgs::from_error(&err));
}

fn main() {
    let log = init(Logger::new().with_sink(transport(FormatOptions {
        base_path: Some(env!("CARGO_MANIFEST_DIR").into()),
        show_timestamps: false,
        add_line_separation: true,
        ..FormatOptions::default()
    })));

    some_function(&log);
    some_other_function(&log);
}
