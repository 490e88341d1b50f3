//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `auth` - sign-up and sign-in
//! - `category` / `good` - catalog mutations and listings
//! - `health` - health reports
//! - `error` - the common error body

mod auth;
mod category;
mod error;
mod good;
mod health;

pub use auth::{SigninRequest, SigninResponse, SignupRequest, SignupResponse};
pub use category::{
    CategoryResponse, CreateCategoryRequest, DeletedCategoryResponse, RenamedCategoryResponse,
    UpdateCategoryRequest,
};
pub use error::ErrorResponse;
pub use good::{
    CreateGoodRequest, CreatedGoodResponse, DeletedGoodResponse, GoodListItem,
    UpdateGoodRequest, UpdatedGoodResponse,
};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
