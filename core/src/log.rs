//! Logger initialization for the coinkit binaries and tests.
//!
//! Library crates only use the `log` facade (re-exported from the crate root);
//! the functions here install a `log4rs` backend.

mod appender;
mod consts;
mod logger;

pub use consts::{DEFAULT_LOGGER_ENV, ERR_LOG_FILE_NAME, LOG_FILE_NAME};
pub use logger::{Directive, Filters, LogError};

use appender::AppenderSpec;
use log::LevelFilter;
use log4rs::config::{Config, Root};
use logger::Builder;
use std::{iter::once, path::Path};

const CONSOLE_APPENDER: &str = "stderr";
const LOG_FILE_APPENDER: &str = "log_file";
const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

/// Installs the process logger. `filters` follows the `RUST_LOG` syntax and
/// overrides whatever the environment variable sets. When `log_dir` is given,
/// everything is also written to a rolling log file and warnings and errors
/// to a separate one.
pub fn init_logger(log_dir: Option<&Path>, filters: &str) -> Result<(), LogError> {
    let filters = Builder::new().root_level(LevelFilter::Info).parse_env(DEFAULT_LOGGER_ENV)?.parse_expression(filters)?.build();

    let mut specs = vec![AppenderSpec::console(CONSOLE_APPENDER, None)];
    if let Some(dir) = log_dir {
        specs.push(AppenderSpec::roller(LOG_FILE_APPENDER, None, dir, LOG_FILE_NAME)?);
        specs.push(AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), dir, ERR_LOG_FILE_NAME)?);
    }
    install(specs, &filters)
}

/// Console-only logger for tests and tools. Calling it more than once is harmless.
pub fn try_init_logger(filters: &str) {
    let filters = Builder::new().parse_expression(filters).map(|b| b.build());
    if let Ok(filters) = filters {
        let _ = install(vec![AppenderSpec::console(CONSOLE_APPENDER, None)], &filters);
    }
}

fn install(specs: Vec<AppenderSpec>, filters: &Filters) -> Result<(), LogError> {
    let names = specs.iter().map(|s| s.name).collect::<Vec<_>>();
    let config = Config::builder()
        .appenders(specs.into_iter().map(AppenderSpec::into_appender))
        .loggers(filters.loggers(&names))
        .build(Root::builder().appenders(names.iter().copied()).build(filters.root_level))
        .map_err(|err| LogError::Config(err.to_string()))?;
    log4rs::init_config(config).map(drop).map_err(|err| LogError::AlreadyInstalled(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_logger_twice() {
        try_init_logger("info,coinkit_core=trace");
        try_init_logger("debug");
        crate::trace!("logger initialized");
    }

    #[test]
    fn test_rejects_bad_filters() {
        assert!(matches!("coinkit=noisy".parse::<Filters>(), Err(LogError::InvalidFilter(_))));
    }
}
