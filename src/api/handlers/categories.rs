//! Category handlers.
//!
//! Mutations require a bearer token; the listing is public.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    CategoryResponse, CreateCategoryRequest, DeletedCategoryResponse, ErrorResponse,
    RenamedCategoryResponse, UpdateCategoryRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidPath, ValidatedJson};

/// # Routes
/// - `POST /category/create`
/// - `PATCH /category/update`
/// - `DELETE /category/delete/{id}`
pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_category))
        .routes(routes!(update_category))
        .routes(routes!(delete_category))
}

/// # Routes
/// - `GET /category/list`
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_categories))
}

#[utoipa::path(
    post,
    path = "/category/create",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state
        .services
        .categories
        .create(&payload.category_name)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    patch,
    path = "/category/update",
    tag = CATEGORY_TAG,
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = RenamedCategoryResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Json<RenamedCategoryResponse>> {
    let category = state
        .services
        .categories
        .rename(payload.category_id, &payload.new_name)
        .await?;

    Ok(Json(category.into()))
}

#[utoipa::path(
    delete,
    path = "/category/delete/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = DeletedCategoryResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_category(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> AppResult<Json<DeletedCategoryResponse>> {
    state.services.categories.delete(id).await?;

    Ok(Json(DeletedCategoryResponse {
        category_id: id,
        deleted: true,
    }))
}

#[utoipa::path(
    get,
    path = "/category/list",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "All categories in id order", body = [CategoryResponse])
    )
)]
async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
