//! Read-only joins over the catalog.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::CatalogQuery;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Good};
use crate::schema::{category, good, good_category};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: AsyncDbPool,
}

impl CatalogRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogQuery for CatalogRepository {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let mut conn = self.pool.get().await?;

        category::table
            .select(Category::as_select())
            .order(category::id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_goods(&self, category_id: i32) -> AppResult<Vec<Good>> {
        let mut conn = self.pool.get().await?;

        // (good_id, category_id) is the junction key, so each good matches at most once.
        good::table
            .inner_join(good_category::table.inner_join(category::table))
            .filter(category::id.eq(category_id))
            .select(Good::as_select())
            .order(good::id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
