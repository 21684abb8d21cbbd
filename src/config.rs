//! Reader configuration

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;

/// How source text is explained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Mention the line number in syntax-error sentences
    pub include_line: bool,

    /// Strip the first line's indentation from every line before parsing
    pub dedent: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            include_line: true,
            dedent: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ReaderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
