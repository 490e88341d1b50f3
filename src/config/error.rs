use std::path::PathBuf;

use thiserror::Error;

use super::environment::Environment;
use super::loader::{CONFIG_DIR_ENV, CONFIG_FILE_ENV};

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The sources were read but could not be turned into `Settings`.
    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("invalid `{field}`: {message}")]
    Invalid { field: String, message: String },

    #[error(
        "unknown environment '{0}', expected one of: development, test, staging, production"
    )]
    UnknownEnvironment(String),

    #[error("{} and {} cannot both be set", CONFIG_DIR_ENV, CONFIG_FILE_ENV)]
    ConflictingSources,

    /// A development-only value reached an environment that must not use it.
    #[error("`{field}` still holds the published development value, which {environment} refuses")]
    Insecure {
        field: &'static str,
        environment: Environment,
    },

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::FileNotFound { path: path.into() }
    }

    /// The settings key the error is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            ConfigError::Insecure { field, .. } => Some(field),
            _ => None,
        }
    }
}
