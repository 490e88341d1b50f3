//! Router configuration for the API.

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    middleware,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{auth, categories, goods, health};
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the application router with all routes, docs and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. request id
/// 2. request logging span
/// 3. error normalisation
/// 4. CORS, panic catching, compression, request timeout
///
/// Bearer authentication is a route layer on the mutating routes only, so
/// unknown paths answer 404 rather than 401.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let protected = OpenApiRouter::new()
        .merge(categories::protected_routes())
        .merge(goods::protected_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(auth::auth_routes())
        .merge(categories::public_routes())
        .merge(goods::public_routes())
        .merge(health::health_routes())
        .merge(protected)
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    // Middleware is applied in reverse order - last added runs first
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
