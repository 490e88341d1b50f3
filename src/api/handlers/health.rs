//! Health check endpoint handlers.
//!
//! `/health` and `/health/ready` ping the storage backend through the
//! `HealthProbe` capability; `/health/live` only proves the process answers.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// # Routes
/// - `GET /health` - Full health report
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state).await;
    let status = storage.status;

    let mut checks = BTreeMap::new();
    checks.insert("storage".to_string(), storage);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    (status_code(status), Json(response))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    status_code(check_storage(&state).await.status)
}

#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn check_storage(state: &AppState) -> ComponentHealth {
    let probe = &state.services.health;
    let start = Instant::now();
    let result = probe.ping().await;
    let response_time_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{} reachable", probe.backend())),
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(backend = probe.backend(), error = %e, "Storage health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("{} unreachable", probe.backend())),
                response_time_ms,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::JwtConfig;
    use crate::error::{AppError, AppResult};
    use crate::repositories::{HealthProbe, MemoryStore, Repositories};

    struct DownProbe;

    #[async_trait]
    impl HealthProbe for DownProbe {
        fn backend(&self) -> &'static str {
            "postgres"
        }

        async fn ping(&self) -> AppResult<()> {
            Err(AppError::ConnectionPool {
                source: anyhow::anyhow!("pool timed out"),
            })
        }
    }

    fn state(probe: Option<Arc<dyn HealthProbe>>) -> AppState {
        let mut repos = Repositories::in_memory(MemoryStore::new());
        if let Some(probe) = probe {
            repos.health = probe;
        }
        AppState::new(repos, JwtConfig::default())
    }

    #[tokio::test]
    async fn test_healthy_report() {
        let (status, Json(report)) = health_check(State(state(None))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.checks["storage"].message.as_deref(), Some("memory reachable"));
    }

    #[tokio::test]
    async fn test_unreachable_storage_is_503() {
        let state = state(Some(Arc::new(DownProbe)));

        let (status, Json(report)) = health_check(State(state.clone())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.status, HealthStatus::Unhealthy);

        assert_eq!(readiness_check(State(state)).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_liveness_check() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }
}
