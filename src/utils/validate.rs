use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body extractor that runs `validator` rules after decoding.
///
/// Decoding failures become `BadRequest`, rule violations `Validation`;
/// both are answered with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path extractor whose rejection is an `AppError::BadRequest`.
#[derive(Debug, Clone, Copy)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ValidPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 1, message = "Password cannot be empty"))]
        password: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(r#"{"email":"a@b.co","password":"pw"}"#);

        let ValidatedJson(body) = ValidatedJson::<Signup>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(body.email, "a@b.co");
        assert_eq!(body.password, "pw");
    }

    #[tokio::test]
    async fn test_rule_violation_is_validation_error() {
        let request = json_request(r#"{"email":"nope","password":"pw"}"#);

        match ValidatedJson::<Signup>::from_request(request, &()).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "email");
                assert_eq!(reason, "Invalid email format");
            }
            other => panic!("Expected Validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"email":"a@b.co""#);

        let result = ValidatedJson::<Signup>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let request = json_request(r#"{"email":"a@b.co"}"#);

        let result = ValidatedJson::<Signup>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"email":"a@b.co","password":"pw"}"#))
            .unwrap();

        let result = ValidatedJson::<Signup>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_non_numeric_path_is_bad_request() {
        use axum::{Router, http::StatusCode, routing::get};
        use tower::ServiceExt;

        let app = Router::new().route(
            "/items/{id}",
            get(|ValidPath(id): ValidPath<i32>| async move { id.to_string() }),
        );

        let ok = app
            .clone()
            .oneshot(Request::builder().uri("/items/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let bad = app
            .oneshot(Request::builder().uri("/items/seven").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
