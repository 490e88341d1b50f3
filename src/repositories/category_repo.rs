//! Category repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::CategoryStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn create(&self, name: &str) -> AppResult<Category> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(category)
            .values(NewCategory {
                category_name: name.to_string(),
            })
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn rename(&self, category_id: i32, new_name: &str) -> AppResult<Category> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(category.filter(id.eq(category_id)))
            .set(category_name.eq(new_name))
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| AppError::not_found("category", "id", category_id))
    }

    async fn delete(&self, category_id: i32) -> AppResult<()> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(category.filter(id.eq(category_id)))
            .execute(&mut conn)
            .await?;

        if deleted == 0 {
            return Err(AppError::not_found("category", "id", category_id));
        }
        Ok(())
    }
}
