use std::fs::File;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

pub const LOG_FILE: &str = "mailbox-chess.log";
pub const LOG_LEVEL_VAR: &str = "MAILBOX_CHESS_LOG";

/// Level named by `value`, or `Info` for anything unrecognised.
#[must_use]
pub fn level_from(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Log to [`LOG_FILE`]. Stdout carries the protocol, so nothing is logged
/// if the file cannot be created.
pub fn init_logging() {
    let level = level_from(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    if level == LevelFilter::Off {
        return;
    }
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(level, Config::default(), file);
        log::info!("logger initialized at {level}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(level_from(None), LevelFilter::Info);
        assert_eq!(level_from(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
        assert_eq!(level_from(Some("loud")), LevelFilter::Info);
    }
}
