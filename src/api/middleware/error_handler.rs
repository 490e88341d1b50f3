//! Error handler for converting AppError to HTTP responses.
//!
//! `AppError` renders itself as a JSON `ErrorResponse`. The
//! `global_error_handler` middleware then stamps the request id on it and
//! rewrites plain-text error responses produced by axum itself (unknown
//! routes, wrong methods, timeouts) into the same shape.

use axum::{
    Json,
    body::to_bytes,
    extract::{
        Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Largest original error body that is carried into the rewritten message.
const MAX_ERROR_BODY: usize = 16 * 1024;

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - Validation, BadRequest → 400
    /// - Unauthorized → 401
    /// - NotFound → 404
    /// - Duplicate → 409
    /// - Database, Configuration, ExternalApi, Internal → 500
    /// - ConnectionPool → 503
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed with a server error");
        }

        let body = error_to_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        // Picked up by `global_error_handler` to attach the request id.
        response.extensions_mut().insert(body);
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
            other => other.body_text(),
        };
        AppError::BadRequest { message }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid path parameters: {}", rejection.body_text()),
        }
    }
}

pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::ExternalApi { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Public error body. Sources of internal errors are never included.
fn error_to_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
        AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
        AppError::Database { .. } => {
            ErrorResponse::new("DATABASE_ERROR", "A database operation failed")
        }
        AppError::Configuration { .. } => {
            ErrorResponse::new("CONFIGURATION_ERROR", "The service is misconfigured")
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
        }
        AppError::ExternalApi { service, .. } => ErrorResponse::new(
            "EXTERNAL_API_ERROR",
            &format!("Upstream service {} failed", service),
        ),
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}

fn default_code_and_message(status: StatusCode) -> (&'static str, &'static str) {
    match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        StatusCode::UNAUTHORIZED => ("UNAUTHORIZED", "Authentication required"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::SERVICE_UNAVAILABLE => {
            ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        s if s.is_server_error() => ("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

/// Normalises every error response into an `ErrorResponse` carrying the request id.
///
/// Must run inside `request_id_middleware` so the id is in the request extensions.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|id| id.0.clone());
    let response = next.run(request).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let body = if let Some(body) = response.extensions().get::<ErrorResponse>() {
        body.clone()
    } else if is_json(&response) {
        return response;
    } else {
        let (code, default_message) = default_code_and_message(status);
        let (_parts, body) = response.into_parts();
        let original = to_bytes(body, MAX_ERROR_BODY).await.unwrap_or_default();
        let original = String::from_utf8_lossy(&original).trim().to_string();

        // Server error bodies are never echoed.
        let message = if original.is_empty() || status.is_server_error() {
            default_message.to_string()
        } else {
            original
        };
        ErrorResponse::new(code, &message)
    };

    let body = match &request_id {
        Some(id) => body.with_request_id(id),
        None => body,
    };

    (status, Json(body)).into_response()
}

/// Reads a response body back as JSON; used by handler and router tests.
#[cfg(test)]
pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
