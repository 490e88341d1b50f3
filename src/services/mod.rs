//! Service layer for business logic operations.
//!
//! Services validate input, call the storage capabilities they were given
//! and log what changed. They never see a connection or a transaction.

mod category_service;
mod good_service;
mod identity_service;

pub use category_service::CategoryService;
pub use good_service::GoodService;
pub use identity_service::IdentityService;

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::repositories::{HealthProbe, Repositories};

/// Aggregates all services for convenient access.
///
/// Cloning is cheap; every service only holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub identity: IdentityService,
    pub categories: CategoryService,
    pub goods: GoodService,
    pub health: Arc<dyn HealthProbe>,
}

impl Services {
    pub fn new(repos: Repositories, jwt_config: JwtConfig) -> Self {
        Self {
            identity: IdentityService::new(repos.identity, jwt_config),
            categories: CategoryService::new(repos.categories, repos.catalog.clone()),
            goods: GoodService::new(repos.goods, repos.catalog),
            health: repos.health,
        }
    }
}

/// Longest name the `VARCHAR(255)` columns accept, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Trims a user supplied name and rejects it when nothing is left or it
/// would not fit the name columns.
fn required_name<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(field, "must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(
            field,
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(trimmed)
}
