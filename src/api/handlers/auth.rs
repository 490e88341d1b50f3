//! Sign-up and sign-in handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    ErrorResponse, SigninRequest, SigninResponse, SignupRequest, SignupResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// # Routes
/// - `POST /user/signup` - Register a user
/// - `POST /user/signin` - Exchange credentials for a bearer token
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(signup))
        .routes(routes!(signin))
}

#[utoipa::path(
    post,
    path = "/user/signup",
    tag = AUTH_TAG,
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = SignupResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let id = state
        .services
        .identity
        .register(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(SignupResponse { id })))
}

#[utoipa::path(
    post,
    path = "/user/signin",
    tag = AUTH_TAG,
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    let token = state
        .services
        .identity
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(SigninResponse { token }))
}
