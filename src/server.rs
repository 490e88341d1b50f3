//! HTTP server lifecycle: storage, background import, serving and shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::external::feed::HttpFeedSource;
use crate::jobs::JobScheduler;
use crate::jobs::tasks::FeedImportTask;
use crate::repositories::Repositories;
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM, then drains requests and stops the
    /// feed import scheduler.
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );
        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            max_connections = settings.database.max_connections,
            token_expiration_hours = settings.jwt.token_expiration_hours,
            feed_enabled = settings.feed.enabled,
            "Configuration loaded"
        );

        let pool = establish_async_connection_pool(&settings.database)
            .await
            .context("Failed to initialize database connection pool")?;
        tracing::info!("Database connection pool initialized");

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url)
                .await
                .context("Failed to apply pending migrations")?;
            tracing::info!(count = applied.len(), "Pending migrations applied");
        }

        let state = AppState::new(Repositories::postgres(pool), settings.jwt.clone());

        let scheduler = if settings.feed.enabled {
            let feed = &settings.feed;
            let scheduler = JobScheduler::new(Duration::from_secs(feed.timeout_secs)).await?;
            let task = FeedImportTask::new(
                Arc::new(HttpFeedSource::from_config(feed)),
                state.services.goods.clone(),
                feed,
            );
            scheduler
                .schedule_repeated(Arc::new(task), Duration::from_secs(feed.interval_secs))
                .await?;
            scheduler.start().await?;
            Some(scheduler)
        } else {
            None
        };

        let router = create_router(state, Duration::from_secs(settings.server.request_timeout));

        let address = settings.server.address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind to {}", address))?;
        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(scheduler) = scheduler {
            scheduler.stop().await?;
        }
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
