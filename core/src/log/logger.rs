use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::BTreeMap, env, str::FromStr};
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("invalid log filter '{0}'")]
    InvalidFilter(String),

    #[error("unable to create log appender: {0}")]
    Appender(String),

    #[error("invalid logger configuration: {0}")]
    Config(String),

    #[error("a logger is already installed: {0}")]
    AlreadyInstalled(String),
}

/// A single `target=level` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub target: String,
    pub level: LevelFilter,
}

/// Parsed filter expression such as `info,coinkit_bip32=trace`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filters {
    pub root_level: LevelFilter,
    pub directives: Vec<Directive>,
}

impl Filters {
    pub fn loggers(&self, appenders: &[&'static str]) -> Vec<Logger> {
        self.directives
            .iter()
            .map(|d| Logger::builder().appenders(appenders.iter().map(|a| a.to_string())).additive(false).build(&d.target, d.level))
            .collect()
    }
}

pub(super) struct Builder {
    targets: BTreeMap<String, LevelFilter>,
    root_level: Option<LevelFilter>,
    strict: bool,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { targets: BTreeMap::new(), root_level: None, strict: false }
    }

    /// Rejects malformed directives instead of skipping them.
    pub fn strict(&mut self) -> &mut Self {
        self.strict = true;
        self
    }

    pub fn root_level(&mut self, level: LevelFilter) -> &mut Self {
        self.root_level = Some(level);
        self
    }

    pub fn parse_env(&mut self, var: &str) -> Result<&mut Self, LogError> {
        self.parse_expression(&env::var(var).unwrap_or_default())
    }

    pub fn parse_expression(&mut self, expression: &str) -> Result<&mut Self, LogError> {
        for directive in expression.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match Self::parse_directive(directive) {
                Ok((None, level)) => {
                    self.root_level = Some(level);
                }
                Ok((Some(target), level)) => {
                    self.targets.insert(target.to_string(), level);
                }
                Err(err) if self.strict => return Err(err),
                Err(err) => eprintln!("ignoring log directive: {err}"),
            }
        }
        Ok(self)
    }

    fn parse_directive(directive: &str) -> Result<(Option<&str>, LevelFilter), LogError> {
        let mut parts = directive.split('=').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            // a lone level sets the root; a lone name enables everything for that target
            (Some(single), None, None) => match single.parse() {
                Ok(level) => Ok((None, level)),
                Err(_) => Ok((Some(single), LevelFilter::max())),
            },
            (Some(target), Some(""), None) if !target.is_empty() => Ok((Some(target), LevelFilter::max())),
            (Some(target), Some(level), None) if !target.is_empty() => {
                level.parse().map(|level| (Some(target), level)).map_err(|_| LogError::InvalidFilter(directive.to_string()))
            }
            _ => Err(LogError::InvalidFilter(directive.to_string())),
        }
    }

    pub fn build(&mut self) -> Filters {
        let directives =
            std::mem::take(&mut self.targets).into_iter().map(|(target, level)| Directive { target, level }).collect::<Vec<_>>();
        Filters { root_level: self.root_level.take().unwrap_or(LevelFilter::Info), directives }
    }
}

impl FromStr for Filters {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Builder::new().strict().parse_expression(s)?.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        let filters: Filters = "warn,coinkit_bip32=trace, coinkit_addresses".parse().unwrap();
        assert_eq!(filters.root_level, LevelFilter::Warn);
        assert_eq!(
            filters.directives,
            vec![
                Directive { target: "coinkit_addresses".into(), level: LevelFilter::Trace },
                Directive { target: "coinkit_bip32".into(), level: LevelFilter::Trace },
            ]
        );
    }

    #[test]
    fn test_default_root_level() {
        let filters: Filters = "".parse().unwrap();
        assert_eq!(filters.root_level, LevelFilter::Info);
        assert!(filters.directives.is_empty());
    }

    #[test]
    fn test_invalid_filters() {
        for expr in ["coinkit=loud", "=debug", "a=b=c"] {
            assert!(expr.parse::<Filters>().is_err(), "{expr} should be rejected");
        }
        // lenient parsing keeps the valid directives
        let filters = Builder::new().parse_expression("debug,coinkit=loud").unwrap().build();
        assert_eq!(filters.root_level, LevelFilter::Debug);
        assert!(filters.directives.is_empty());
    }
}
