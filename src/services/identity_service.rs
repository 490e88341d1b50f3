//! Sign-up and sign-in.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::NewUser;
use crate::repositories::IdentityStore;
use crate::utils::jwt::generate_access_token;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(store: Arc<dyn IdentityStore>, jwt_config: JwtConfig) -> Self {
        Self { store, jwt_config }
    }

    /// Registers a user and returns the new id.
    ///
    /// A taken email surfaces as `Duplicate { entity: "users", field: "email" }`.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<i32> {
        let new_user = NewUser {
            email: email.trim().to_string(),
            password_hash: hash_password(password)?,
        };

        let id = self.store.register(new_user).await?;
        tracing::info!(user_id = id, "User registered");
        Ok(id)
    }

    /// Checks the credentials and issues an access token.
    ///
    /// Unknown emails and wrong passwords produce the same `Unauthorized`.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<String> {
        let user = match self.store.find_by_email(email.trim()).await {
            Ok(user) => user,
            Err(AppError::NotFound { .. }) => return Err(invalid_credentials()),
            Err(other) => return Err(other),
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(invalid_credentials());
        }

        let token = generate_access_token(user.id, &user.email, &self.jwt_config)?;
        tracing::info!(user_id = user.id, "User signed in");
        Ok(token)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized {
        message: INVALID_CREDENTIALS.to_string(),
    }
}
