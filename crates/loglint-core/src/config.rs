//! Configuration of the linter.
//!
//! All sections are optional. A missing section keeps the built-in
//! behavior, see the field docs for how lists interact with the defaults.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::{ArgStyle, LoggerKind, LoggerSpec, MessageIndexRule};

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    pub symbols: SymbolsConfig,
    pub sensitive: SensitiveConfig,
    /// # Recognized loggers
    ///
    /// If this is absent, `log/slog` and `go.uber.org/zap` are recognized.
    /// Otherwise the listed loggers replace them, so an empty list disables
    /// every logger.
    pub loggers: Option<Vec<LoggerConfig>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SymbolsConfig {
    /// # Additional allowed characters
    ///
    /// Every character of this string is accepted on top of letters, digits,
    /// spaces and `. , - _ : / = % ( ) '`.
    pub allowed: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SensitiveConfig {
    /// # Sensitive keywords
    ///
    /// Matched case-insensitively as substrings. If this is absent or empty,
    /// the built-in keywords are used, otherwise they are replaced.
    pub keywords: Option<Vec<String>>,
    /// # Sensitive patterns
    ///
    /// Regular expressions checked on top of the keywords. Empty patterns
    /// are ignored.
    pub patterns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LoggerConfig {
    /// Import path of the logging module.
    pub package: String,
    #[serde(default)]
    pub kind: LoggerKind,
    /// Overrides the argument style implied by `kind`.
    pub style: Option<ArgStyle>,
    /// Overrides the message position implied by `kind`.
    pub message_index: Option<usize>,
    #[serde(default)]
    pub field_constructors: Vec<String>,
}

impl Config {
    /// Returns the first configuration error, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sensitive.validate()?;
        if let Some(loggers) = &self.loggers {
            for (index, logger) in loggers.iter().enumerate() {
                if logger.package.trim().is_empty() {
                    return Err(ConfigError::EmptyLoggerPackage { index });
                }
            }
        }
        Ok(())
    }

    /// Logger specs to build the registry from, `None` for the defaults.
    pub fn logger_specs(&self) -> Option<Vec<LoggerSpec>> {
        self.loggers
            .as_ref()
            .map(|loggers| loggers.iter().map(LoggerConfig::to_spec).collect())
    }
}

impl SensitiveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in self.patterns.iter().filter(|p| !p.is_empty()) {
            if let Err(source) = Regex::new(pattern) {
                return Err(ConfigError::InvalidPattern { pattern: pattern.clone(), source });
            }
        }
        Ok(())
    }
}

impl LoggerConfig {
    pub fn to_spec(&self) -> LoggerSpec {
        let mut spec = LoggerSpec::new(self.package.trim(), self.kind)
            .with_field_constructors(self.field_constructors.iter().cloned());
        if let Some(style) = self.style {
            spec = spec.with_style(style);
        }
        if let Some(index) = self.message_index {
            spec = spec.with_message_index(MessageIndexRule::Fixed(index));
        }
        spec
    }
}
