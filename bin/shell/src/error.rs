//! Error types for the shell.
//!
//! Failures here end the run. Commands the editor rejects are not errors
//! at this level; they are logged and the script continues.

use std::fmt;

#[derive(Debug)]
pub enum ShellError {
    /// Configuration could not be loaded.
    Config { details: String },
    /// An input file could not be read.
    Read { path: String, details: String },
    /// An input file was not valid JSON of the expected shape.
    Parse { what: &'static str, details: String },
    /// The saved workflow could not be written.
    Write { path: String, details: String },
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "invalid configuration: {details}"),
            Self::Read { path, details } => write!(f, "failed to read '{path}': {details}"),
            Self::Parse { what, details } => write!(f, "failed to parse {what}: {details}"),
            Self::Write { path, details } => write!(f, "failed to write '{path}': {details}"),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<flowdeck_editor::SettingsError> for ShellError {
    fn from(err: flowdeck_editor::SettingsError) -> Self {
        Self::Config {
            details: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for ShellError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            details: err.to_string(),
        }
    }
}
