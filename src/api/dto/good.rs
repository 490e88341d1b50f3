//! Good request and response DTOs.
//!
//! Field names follow the wire format existing clients already use, which is
//! why the update request says `good_actual_name` and the update response
//! carries a list under `category_name`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{CreatedGood, Good, GoodUpdate, UpdatedGood};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGoodRequest {
    #[validate(length(min = 1, max = 255, message = "Good name must be between 1 and 255 characters"))]
    #[schema(example = "Widget", min_length = 1, max_length = 255)]
    pub good_name: String,
}

/// Rename and/or link a good to one more category.
///
/// An absent or empty `good_actual_name` keeps the name; an absent or zero
/// `added_category_id` adds no link.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateGoodRequest {
    #[validate(range(min = 1, message = "Good id must be positive"))]
    #[schema(example = 1)]
    pub good_id: i32,
    #[validate(length(max = 255, message = "Good name must be at most 255 characters"))]
    #[schema(example = "Gadget", max_length = 255)]
    pub good_actual_name: Option<String>,
    #[validate(range(min = 0, message = "Category id cannot be negative"))]
    #[schema(example = 2)]
    pub added_category_id: Option<i32>,
}

impl From<UpdateGoodRequest> for GoodUpdate {
    fn from(request: UpdateGoodRequest) -> Self {
        GoodUpdate::from_wire(
            request.good_id,
            request.good_actual_name,
            request.added_category_id,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedGoodResponse {
    #[schema(example = 1)]
    pub good_id: i32,
    #[schema(example = 1)]
    pub good_category_id: i32,
    #[schema(example = "Widget")]
    pub good_name: String,
    #[schema(example = "Electronics")]
    pub category_name: String,
}

impl From<CreatedGood> for CreatedGoodResponse {
    fn from(created: CreatedGood) -> Self {
        Self {
            good_id: created.good.id,
            good_category_id: created.category.id,
            good_name: created.good.good_name,
            category_name: created.category.category_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatedGoodResponse {
    #[schema(example = 1)]
    pub good_id: i32,
    #[schema(example = "Gadget")]
    pub good_name: String,
    /// Names of every linked category, in category id order
    #[schema(example = json!(["Electronics", "Gifts"]))]
    pub category_name: Vec<String>,
}

impl From<UpdatedGood> for UpdatedGoodResponse {
    fn from(updated: UpdatedGood) -> Self {
        Self {
            good_id: updated.good_id,
            good_name: updated.good_name,
            category_name: updated.category_names,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedGoodResponse {
    #[schema(example = 1)]
    pub good_id: i32,
    #[schema(example = true)]
    pub deleted: bool,
}

/// A good as listed under a category.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GoodListItem {
    #[schema(example = 1)]
    pub good_id: i32,
    #[schema(example = "Widget")]
    pub good_name: String,
}

impl From<Good> for GoodListItem {
    fn from(good: Good) -> Self {
        Self {
            good_id: good.id,
            good_name: good.good_name,
        }
    }
}
