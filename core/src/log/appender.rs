use super::{
    consts::{LOG_ARCHIVE_SUFFIX, LOG_FILE_BASE_ROLLS, LOG_FILE_MAX_ROLLS, LOG_FILE_MAX_SIZE, LOG_LINE_PATTERN, LOG_LINE_PATTERN_COLORED},
    logger::LogError,
};
use log::LevelFilter;
use log4rs::{
    append::{
        Append,
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger},
        },
    },
    config::Appender,
    encode::pattern::PatternEncoder,
    filter::{Filter, threshold::ThresholdFilter},
};
use std::path::Path;

pub(super) struct AppenderSpec {
    pub name: &'static str,
    threshold: Option<LevelFilter>,
    append: Box<dyn Append>,
}

impl AppenderSpec {
    /// Colored appender writing to stderr so that command output on stdout stays clean.
    pub fn console(name: &'static str, threshold: Option<LevelFilter>) -> Self {
        let console =
            ConsoleAppender::builder().target(Target::Stderr).encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN_COLORED))).build();
        Self { name, threshold, append: Box::new(console) }
    }

    /// Size-triggered rolling file appender, archives are gzip compressed.
    pub fn roller(name: &'static str, threshold: Option<LevelFilter>, log_dir: &Path, file_name: &str) -> Result<Self, LogError> {
        let archive_pattern = log_dir.join(format!("{file_name}{LOG_ARCHIVE_SUFFIX}"));
        let archive_pattern =
            archive_pattern.to_str().ok_or_else(|| LogError::Appender(format!("non UTF-8 log path {}", log_dir.display())))?;
        let roller = FixedWindowRoller::builder()
            .base(LOG_FILE_BASE_ROLLS)
            .build(archive_pattern, LOG_FILE_MAX_ROLLS)
            .map_err(|err| LogError::Appender(err.to_string()))?;
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_MAX_SIZE)), Box::new(roller));
        let file = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
            .build(log_dir.join(file_name), Box::new(policy))
            .map_err(|err| LogError::Appender(err.to_string()))?;
        Ok(Self { name, threshold, append: Box::new(file) })
    }

    pub fn into_appender(self) -> Appender {
        Appender::builder()
            .filters(self.threshold.map(|level| Box::new(ThresholdFilter::new(level)) as Box<dyn Filter>))
            .build(self.name, self.append)
    }
}
