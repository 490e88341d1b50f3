//! Configuration validation logic
//!
//! Every section checks its own ranges and formats and reports the first
//! offending field as a `ConfigError::Invalid`.

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::{
    DEVELOPMENT_JWT_SECRET, DatabaseConfig, FeedConfig, FileSettings, JwtConfig, LoggerSettings,
    ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const MIN_JWT_SECRET_LEN: usize = 32;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Keep-alive timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::invalid(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::invalid(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a non-empty PostgreSQL URL
    /// - Connection limits must be positive with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::invalid(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::invalid(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::invalid(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::invalid(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::invalid(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::invalid(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::invalid(
                "jwt.secret",
                "JWT secret should be at least 32 characters for security",
            ));
        }

        if self.token_expiration_hours <= 0 {
            return Err(ConfigError::invalid(
                "jwt.token_expiration_hours",
                "Token expiration must be positive",
            ));
        }

        Ok(())
    }

    /// Deployed environments must not sign with the bundled secret.
    pub fn validate_for(&self, environment: Environment) -> Result<(), ConfigError> {
        self.validate()?;

        if environment.is_deployed() && self.secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::Insecure {
                field: "jwt.secret",
                environment,
            });
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::invalid(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::invalid(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl FeedConfig {
    /// A disabled feed is never checked beyond being parseable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::invalid(
                "feed.url",
                "Feed URL must start with http:// or https://",
            ));
        }

        if self.interval_secs == 0 {
            return Err(ConfigError::invalid(
                "feed.interval_secs",
                "Feed interval must be greater than 0 seconds.",
            ));
        }

        if self.goods_per_cycle == 0 {
            return Err(ConfigError::invalid(
                "feed.goods_per_cycle",
                "At least one good must be fetched per cycle.",
            ));
        }

        if self.category_id <= 0 {
            return Err(ConfigError::invalid(
                "feed.category_id",
                "Feed category id must be positive.",
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "feed.request_timeout_secs",
                "Feed request timeout must be greater than 0 seconds.",
            ));
        }

        // A cycle of fetches that each finish in time must fit the cycle bound.
        let slowest_fetches = self
            .request_timeout_secs
            .saturating_mul(u64::from(self.goods_per_cycle));
        if self.timeout_secs < slowest_fetches {
            return Err(ConfigError::invalid(
                "feed.timeout_secs",
                format!(
                    "Cycle timeout ({}s) must cover {} fetches of up to {}s each ({}s).",
                    self.timeout_secs, self.goods_per_cycle, self.request_timeout_secs, slowest_fetches
                ),
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all sections, returning the first error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        self.feed.validate()?;
        Ok(())
    }

    /// `validate` plus the rules that depend on where the service runs.
    pub fn validate_for(&self, environment: Environment) -> Result<(), ConfigError> {
        self.validate()?;
        self.jwt.validate_for(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/catalog".to_string(),
            ..Default::default()
        }
    }

    fn valid_settings() -> Settings {
        Settings {
            database: valid_database(),
            ..Default::default()
        }
    }

    fn assert_field(result: Result<(), ConfigError>, expected: &str) {
        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_server_config_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "server.port");
    }

    #[test]
    fn test_server_config_invalid_request_timeout() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "server.request_timeout");
    }

    #[test]
    fn test_database_config_valid() {
        assert!(valid_database().validate().is_ok());
        let alt = DatabaseConfig {
            url: "postgresql://user:pw@db:5432/catalog".to_string(),
            ..Default::default()
        };
        assert!(alt.validate().is_ok());
    }

    #[test]
    fn test_database_config_empty_url() {
        assert_field(DatabaseConfig::default().validate(), "database.url");
    }

    #[test]
    fn test_database_config_rejects_non_postgres_url() {
        let config = DatabaseConfig {
            url: "mysql://localhost/catalog".to_string(),
            ..Default::default()
        };
        assert_field(config.validate(), "database.url");
    }

    #[test]
    fn test_database_config_min_exceeds_max() {
        let config = DatabaseConfig {
            max_connections: 2,
            min_connections: 5,
            ..valid_database()
        };
        assert_field(config.validate(), "database.min_connections");
    }

    #[test]
    fn test_jwt_secret_too_short() {
        let config = JwtConfig {
            secret: "short".to_string(),
            ..Default::default()
        };
        assert_field(config.validate(), "jwt.secret");
    }

    #[test]
    fn test_jwt_expiration_must_be_positive() {
        let config = JwtConfig {
            token_expiration_hours: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "jwt.token_expiration_hours");
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "chatty".to_string(),
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.level");
    }

    #[test]
    fn test_logger_settings_file_enabled_empty_path() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.path = "  ".to_string();
        assert_field(settings.validate(), "logger.file.path");
    }

    #[test]
    fn test_logger_settings_no_output() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        assert_field(settings.validate(), "logger");
    }

    #[test]
    fn test_disabled_feed_is_not_checked() {
        let config = FeedConfig {
            enabled: false,
            goods_per_cycle: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_feed_rules() {
        let enabled = FeedConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(enabled.validate().is_ok());

        let bad_url = FeedConfig {
            url: "ftp://example.com".to_string(),
            ..enabled.clone()
        };
        assert_field(bad_url.validate(), "feed.url");

        let bad_category = FeedConfig {
            category_id: 0,
            ..enabled.clone()
        };
        assert_field(bad_category.validate(), "feed.category_id");

        let no_goods = FeedConfig {
            goods_per_cycle: 0,
            ..enabled.clone()
        };
        assert_field(no_goods.validate(), "feed.goods_per_cycle");

        let no_request_timeout = FeedConfig {
            request_timeout_secs: 0,
            ..enabled
        };
        assert_field(no_request_timeout.validate(), "feed.request_timeout_secs");
    }

    #[test]
    fn test_feed_cycle_timeout_covers_every_fetch() {
        let feed = FeedConfig {
            enabled: true,
            goods_per_cycle: 3,
            request_timeout_secs: 10,
            timeout_secs: 30,
            ..Default::default()
        };
        assert!(feed.validate().is_ok());

        let too_tight = FeedConfig {
            timeout_secs: 29,
            ..feed
        };
        assert_field(too_tight.validate(), "feed.timeout_secs");
    }

    #[test]
    fn test_development_secret_refused_when_deployed() {
        let jwt = JwtConfig::default();
        assert_eq!(jwt.secret, DEVELOPMENT_JWT_SECRET);

        assert!(jwt.validate_for(Environment::Development).is_ok());
        assert!(jwt.validate_for(Environment::Test).is_ok());
        for environment in [Environment::Staging, Environment::Production] {
            assert!(matches!(
                jwt.validate_for(environment),
                Err(ConfigError::Insecure { field: "jwt.secret", .. })
            ));
        }

        let own = JwtConfig {
            secret: "a-secret-only-this-deployment-knows-about".to_string(),
            ..Default::default()
        };
        assert!(own.validate_for(Environment::Production).is_ok());
    }

    #[test]
    fn test_settings_validate_for_includes_environment_rules() {
        let settings = valid_settings();
        assert!(settings.validate_for(Environment::Development).is_ok());
        assert!(matches!(
            settings.validate_for(Environment::Production),
            Err(ConfigError::Insecure { .. })
        ));
    }

    #[test]
    fn test_settings_valid() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_settings_reports_first_invalid_section() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        settings.jwt.secret = String::new();
        assert_field(settings.validate(), "server.port");
    }
}
