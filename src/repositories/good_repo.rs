//! Good repository: the transactional side of the good/category relation.
//!
//! Creating and updating a good touch `good`, `category` and `good_category`
//! inside one transaction, so a failure at any step leaves no partial write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::GoodStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, CreatedGood, Good, GoodCategory, GoodUpdate, NewGood, UpdatedGood};
use crate::schema::{category, good, good_category};

#[derive(Clone)]
pub struct GoodRepository {
    pool: AsyncDbPool,
}

impl GoodRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoodStore for GoodRepository {
    async fn create_good(&self, name: &str, category_id: i32) -> AppResult<CreatedGood> {
        let mut conn = self.pool.get().await?;
        let new_good = NewGood {
            good_name: name.to_string(),
        };

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let created: Good = diesel::insert_into(good::table)
                    .values(&new_good)
                    .returning(Good::as_returning())
                    .get_result(conn)
                    .await?;

                let linked_category: Category = category::table
                    .find(category_id)
                    .select(Category::as_select())
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| AppError::not_found("category", "id", category_id))?;

                diesel::insert_into(good_category::table)
                    .values(GoodCategory {
                        good_id: created.id,
                        category_id,
                    })
                    .execute(conn)
                    .await?;

                Ok(CreatedGood {
                    good: created,
                    category: linked_category,
                })
            }
            .scope_boxed()
        })
        .await
    }

    async fn update_good(&self, update: GoodUpdate) -> AppResult<UpdatedGood> {
        let mut conn = self.pool.get().await?;
        let GoodUpdate {
            good_id,
            new_name,
            category_to_add,
        } = update;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let current_name: String = good::table
                    .find(good_id)
                    .select(good::good_name)
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| AppError::not_found("good", "id", good_id))?;

                let good_name = match new_name {
                    Some(name) => {
                        diesel::update(good::table.find(good_id))
                            .set(good::good_name.eq(name))
                            .returning(good::good_name)
                            .get_result::<String>(conn)
                            .await?
                    }
                    None => current_name,
                };

                if let Some(category_id) = category_to_add {
                    let category_exists: bool =
                        diesel::select(diesel::dsl::exists(category::table.find(category_id)))
                            .get_result(conn)
                            .await?;
                    if !category_exists {
                        return Err(AppError::not_found("category", "id", category_id));
                    }

                    // An existing link violates good_category_pkey and surfaces as Duplicate.
                    diesel::insert_into(good_category::table)
                        .values(GoodCategory {
                            good_id,
                            category_id,
                        })
                        .execute(conn)
                        .await?;
                }

                let category_names = category::table
                    .inner_join(good_category::table)
                    .filter(good_category::good_id.eq(good_id))
                    .select(category::category_name)
                    .order(category::id.asc())
                    .load::<String>(conn)
                    .await?;

                Ok(UpdatedGood {
                    good_id,
                    good_name,
                    category_names,
                })
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete_good(&self, id: i32) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(good::table.find(id))
            .execute(&mut conn)
            .await?;

        if deleted == 0 {
            return Err(AppError::not_found("good", "id", id));
        }
        Ok(())
    }
}
