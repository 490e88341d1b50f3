//! Good handlers.
//!
//! Mutations require a bearer token; the per-category listing is public.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::GOOD_TAG;
use crate::api::dto::{
    CreateGoodRequest, CreatedGoodResponse, DeletedGoodResponse, ErrorResponse, GoodListItem,
    UpdateGoodRequest, UpdatedGoodResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidPath, ValidatedJson};

/// # Routes
/// - `POST /good/create/{category_id}`
/// - `PATCH /good/update`
/// - `DELETE /good/delete/{id}`
pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_good))
        .routes(routes!(update_good))
        .routes(routes!(delete_good))
}

/// # Routes
/// - `GET /good/list/{category_id}`
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_goods))
}

/// Creates a good and files it under the category in the path, atomically.
#[utoipa::path(
    post,
    path = "/good/create/{category_id}",
    tag = GOOD_TAG,
    params(("category_id" = i32, Path, description = "Category the good is filed under")),
    request_body = CreateGoodRequest,
    responses(
        (status = 201, description = "Good created", body = CreatedGoodResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_good(
    State(state): State<AppState>,
    ValidPath(category_id): ValidPath<i32>,
    ValidatedJson(payload): ValidatedJson<CreateGoodRequest>,
) -> AppResult<(StatusCode, Json<CreatedGoodResponse>)> {
    let created = state
        .services
        .goods
        .create_good(&payload.good_name, category_id)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Renames a good and/or links it to one more category.
///
/// Either change failing rolls back both. Linking a category the good
/// already has is a 409.
#[utoipa::path(
    patch,
    path = "/good/update",
    tag = GOOD_TAG,
    request_body = UpdateGoodRequest,
    responses(
        (status = 200, description = "Current state of the good", body = UpdatedGoodResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Good or category not found", body = ErrorResponse),
        (status = 409, description = "Good already linked to the category", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_good(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateGoodRequest>,
) -> AppResult<Json<UpdatedGoodResponse>> {
    let updated = state.services.goods.update_good(payload.into()).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/good/delete/{id}",
    tag = GOOD_TAG,
    params(("id" = i32, Path, description = "Good ID")),
    responses(
        (status = 200, description = "Good deleted", body = DeletedGoodResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Good not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_good(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> AppResult<Json<DeletedGoodResponse>> {
    state.services.goods.delete_good(id).await?;

    Ok(Json(DeletedGoodResponse {
        good_id: id,
        deleted: true,
    }))
}

/// Goods directly linked to a category. An unknown category gives an empty list.
#[utoipa::path(
    get,
    path = "/good/list/{category_id}",
    tag = GOOD_TAG,
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Goods in id order", body = [GoodListItem]),
        (status = 400, description = "Invalid category id", body = ErrorResponse)
    )
)]
async fn list_goods(
    State(state): State<AppState>,
    ValidPath(category_id): ValidPath<i32>,
) -> AppResult<Json<Vec<GoodListItem>>> {
    let goods = state.services.goods.list_goods(category_id).await?;
    Ok(Json(goods.into_iter().map(Into::into).collect()))
}
