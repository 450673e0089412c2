//! A minimal [`log`] backend printing to standard error.
//!
//! The library only emits records through the `log` macros; programs
//! wanting to see them call [`init`] once at startup.

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Install [`Logger`] as the global logger, showing records up to
/// `level`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger { level }))
        .map(|()| log::set_max_level(level))
}

pub struct Logger {
    pub level: LevelFilter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() < Level::Info {
                eprint!("{} - ", record.level());
            }
            eprintln!("{}", record.args());
        }
    }

    fn flush(&self) {}
}
