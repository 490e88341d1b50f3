//! Serve command handler
//!
//! Only the dry run lives here; the real startup is `Server::run`.

use crate::config::settings::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates the configuration and prints what the server would do.
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Database URL is configured");
        println!(
            "✓ Migrations on startup: {}",
            if self.config.database.auto_migrate { "yes" } else { "no" }
        );
        if self.config.feed.enabled {
            println!(
                "✓ Feed import every {}s into category {}",
                self.config.feed.interval_secs, self.config.feed.category_id
            );
        } else {
            println!("✓ Feed import disabled");
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
