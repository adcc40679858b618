//
// Adapted from Ark
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml.rs
//
// MIT License - Posit PBC

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;

use crate::config::Config;

#[derive(Debug)]
pub enum ParseTomlError {
    Read(PathBuf, io::Error),
    Deserialize(PathBuf, toml::de::Error),
}

impl std::error::Error for ParseTomlError {}

impl Display for ParseTomlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // It's nicer if we don't make these paths relative, so we can quickly
            // jump to the TOML file to see what is wrong
            Self::Read(path, err) => {
                write!(f, "Failed to read {path}:\n{err}", path = path.display())
            }
            Self::Deserialize(path, err) => {
                write!(f, "Failed to parse {path}:\n{err}", path = path.display())
            }
        }
    }
}

pub fn parse_loglint_toml(path: &Path) -> Result<Config, ParseTomlError> {
    let toml =
        fs::read_to_string(path).map_err(|err| ParseTomlError::Read(path.to_path_buf(), err))?;
    toml::from_str(&toml).map_err(|err| ParseTomlError::Deserialize(path.to_path_buf(), err))
}

/// Return the path to the `loglint.toml` or `.loglint.toml` file in a given directory.
pub fn find_loglint_toml_in_directory<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    // Check for `loglint.toml` first, as we prioritize the "visible" one.
    let toml = path.as_ref().join("loglint.toml");
    if toml.is_file() {
        return Some(toml);
    }

    let toml = path.as_ref().join(".loglint.toml");
    if toml.is_file() {
        return Some(toml);
    }

    None
}

/// Find the path to the closest `loglint.toml` or `.loglint.toml` if one exists, walking up the filesystem
pub fn find_loglint_toml<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    for directory in path.as_ref().ancestors() {
        if let Some(toml) = find_loglint_toml_in_directory(directory) {
            return Some(toml);
        }
    }
    None
}

/// Reads and validates the configuration file at `path`.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = parse_loglint_toml(path)?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Loads the closest configuration file above `path`, or the default
/// configuration if there is none.
pub fn discover_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    match find_loglint_toml(&path) {
        Some(toml) => load_config(&toml),
        None => {
            tracing::debug!(
                "No configuration file found above {}, using defaults",
                path.as_ref().display()
            );
            Ok(Config::default())
        }
    }
}
