
//! Stderr sink for the `log` facade, used by the command line front
//! end.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;

use std::io::{self, Write};

#[derive(Debug)]
struct StderrLogger {
  level: LevelFilter,
}

static LOGGER: OnceCell<StderrLogger> = OnceCell::new();

impl Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= self.level
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
    }
  }

  fn flush(&self) {
    let _ = io::stderr().flush();
  }
}

/// Warnings only by default; each `-v` opens up one more level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
  match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

/// Installs the stderr logger. Fails if any logger is already set.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
  let level = level_for_verbosity(verbosity);
  let logger = LOGGER.get_or_init(|| StderrLogger { level });
  log::set_logger(logger)?;
  log::set_max_level(logger.level);
  Ok(())
}
