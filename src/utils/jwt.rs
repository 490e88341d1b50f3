use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

const SECONDS_PER_HOUR: i64 = 3600;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiration, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, email: String, expiration_hours: i64) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            email,
            iat: now,
            exp: now + expiration_hours * SECONDS_PER_HOUR,
        }
    }

    /// The numeric user id stored in `sub`.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })
    }
}

/// Signs an HS512 access token for a user.
///
/// ```
/// use catalog_rs::config::JwtConfig;
/// use catalog_rs::utils::jwt::{generate_access_token, validate_access_token};
///
/// let config = JwtConfig::default();
/// let token = generate_access_token(1, "user@example.com", &config).unwrap();
/// let claims = validate_access_token(&token, &config.secret).unwrap();
/// assert_eq!(claims.sub, "1");
/// ```
pub fn generate_access_token(user_id: i32, email: &str, config: &JwtConfig) -> AppResult<String> {
    let claims = Claims::new(user_id, email.to_string(), config.token_expiration_hours);
    sign(&claims, &config.secret)
}

fn sign(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::new(Algorithm::HS512),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Verifies signature and expiry and returns the claims.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    let validation = Validation::new(Algorithm::HS512);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let message = match e.kind() {
            ErrorKind::ExpiredSignature => "Token has expired",
            ErrorKind::InvalidSignature => "Invalid token signature",
            ErrorKind::InvalidAlgorithm => "Unsupported token algorithm",
            _ => "Invalid token",
        };
        AppError::Unauthorized {
            message: message.to_string(),
        }
    })
}
