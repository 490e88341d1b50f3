use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Deployment stage; picks the `config/{stage}.toml` layer and how strict
/// validation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "CATALOG_APP_ENV";

    /// Reads `CATALOG_APP_ENV`; unset or unparseable means development.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|e: ConfigError| {
                tracing::warn!(error = %e, "Falling back to development environment");
                Environment::Development
            }),
            Err(_) => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Stages reachable by real clients. Development defaults such as the
    /// bundled JWT secret are refused there.
    pub fn is_deployed(&self) -> bool {
        matches!(self, Environment::Staging | Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_aliases() {
        let cases = [
            ("development", Environment::Development),
            ("dev", Environment::Development),
            ("test", Environment::Test),
            ("stage", Environment::Staging),
            (" Production ", Environment::Production),
            ("PROD", Environment::Production),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Environment>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_unknown_environment() {
        match "qa".parse::<Environment>() {
            Err(ConfigError::UnknownEnvironment(value)) => assert_eq!(value, "qa"),
            other => panic!("Expected UnknownEnvironment, got {:?}", other),
        }
    }

    #[test]
    fn test_display_matches_config_file_stem() {
        assert_eq!(Environment::Staging.to_string(), "staging");
        assert_eq!(Environment::default().as_str(), "development");
    }

    #[test]
    fn test_only_staging_and_production_are_deployed() {
        assert!(!Environment::Development.is_deployed());
        assert!(!Environment::Test.is_deployed());
        assert!(Environment::Staging.is_deployed());
        assert!(Environment::Production.is_deployed());
    }
}
