//! Migrate command handler
//!
//! Applies, previews or reverts the embedded diesel migrations.

use crate::config::settings::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// `dry_run` lists pending migrations; `rollback` reverts that many.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = &self.config.database.url;

        if dry_run {
            let pending = pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                print_names(&pending);
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = revert_migrations(url, steps).await?;
            tracing::info!(steps, reverted = reverted.len(), "Migrations reverted");
            if reverted.is_empty() {
                println!("No applied migrations to roll back");
            } else {
                println!("✓ Rolled back {} migration(s):", reverted.len());
                print_names(&reverted);
            }
            return Ok(());
        }

        let applied = run_pending_migrations(url).await?;
        tracing::info!(applied = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            print_names(&applied);
        }
        Ok(())
    }
}

fn print_names(names: &[String]) {
    for name in names {
        println!("  - {}", name);
    }
}
