use std::fs::File;
use std::io;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

const LOG_FILE_NAME: &str = "grid-snake.log";

/// Where the session log is written. The terminal is in raw mode while the
/// game runs, so logs never go to stdout or stderr.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Installs the global file logger at `Info`, or `Debug` when `debug` is set.
pub fn setup(debug: bool) -> io::Result<PathBuf> {
    let path = log_path();
    let file = File::create(&path)?;

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file).map_err(io::Error::other)?;
    Ok(path)
}
