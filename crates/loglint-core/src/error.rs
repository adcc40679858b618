use std::fmt::Display;
use std::fmt::Formatter;

/// Invalid configuration, reported before any call-site is checked.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPattern { pattern: String, source: regex::Error },
    EmptyLoggerPackage { index: usize },
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::EmptyLoggerPackage { .. } => None,
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid sensitive pattern {pattern:?}:\n{source}")
            }
            Self::EmptyLoggerPackage { index } => {
                write!(f, "Logger #{index} has an empty `package`")
            }
        }
    }
}
