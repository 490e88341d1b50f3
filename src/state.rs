//! Application state for Axum web framework.

use crate::config::JwtConfig;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared, immutable state handed to every handler and middleware.
///
/// Cloning is cheap since services only hold `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Needed by `auth_middleware` to validate bearer tokens
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Builds services over the given storage.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(Repositories::postgres(pool), settings.jwt.clone());
    /// ```
    pub fn new(repos: Repositories, jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(repos, jwt_config.clone()),
            jwt_config,
        }
    }
}
