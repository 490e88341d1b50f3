//! Category request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Category;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Category name must be between 1 and 255 characters"))]
    #[schema(example = "Electronics", min_length = 1, max_length = 255)]
    pub category_name: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(range(min = 1, message = "Category id must be positive"))]
    #[schema(example = 1)]
    pub category_id: i32,
    #[validate(length(min = 1, max = 255, message = "New name must be between 1 and 255 characters"))]
    #[schema(example = "Home electronics", min_length = 1, max_length = 255)]
    pub new_name: String,
}

/// A category as listed and as returned on creation.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub category_id: i32,
    #[schema(example = "Electronics")]
    pub category_name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id,
            category_name: category.category_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenamedCategoryResponse {
    #[schema(example = 1)]
    pub category_id: i32,
    #[schema(example = "Home electronics")]
    pub new_name: String,
}

impl From<Category> for RenamedCategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id,
            new_name: category.category_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedCategoryResponse {
    #[schema(example = 1)]
    pub category_id: i32,
    #[schema(example = true)]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_rejects_non_positive_id() {
        let request = UpdateCategoryRequest {
            category_id: 0,
            new_name: "Books".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category_id"));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let request = CreateCategoryRequest {
            category_name: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
