//! Goods and their category links.

use std::sync::Arc;

use super::required_name;
use crate::error::AppResult;
use crate::models::{CreatedGood, Good, GoodUpdate, UpdatedGood};
use crate::repositories::{CatalogQuery, GoodStore};

#[derive(Clone)]
pub struct GoodService {
    store: Arc<dyn GoodStore>,
    catalog: Arc<dyn CatalogQuery>,
}

impl GoodService {
    pub fn new(store: Arc<dyn GoodStore>, catalog: Arc<dyn CatalogQuery>) -> Self {
        Self { store, catalog }
    }

    /// Creates a good filed under `category_id`; used by handlers and the feed import.
    pub async fn create_good(&self, name: &str, category_id: i32) -> AppResult<CreatedGood> {
        let name = required_name("good_name", name)?;
        let created = self.store.create_good(name, category_id).await?;
        tracing::info!(
            good_id = created.good.id,
            category_id = created.category.id,
            "Good created"
        );
        Ok(created)
    }

    pub async fn update_good(&self, update: GoodUpdate) -> AppResult<UpdatedGood> {
        if let Some(name) = update.new_name.as_deref() {
            required_name("good_actual_name", name)?;
        }
        let renamed = update.new_name.is_some();
        let linked = update.category_to_add;

        let updated = self.store.update_good(update).await?;
        tracing::info!(
            good_id = updated.good_id,
            renamed,
            linked_category = ?linked,
            categories = updated.category_names.len(),
            "Good updated"
        );
        Ok(updated)
    }

    pub async fn delete_good(&self, id: i32) -> AppResult<()> {
        self.store.delete_good(id).await?;
        tracing::info!(good_id = id, "Good deleted");
        Ok(())
    }

    pub async fn list_goods(&self, category_id: i32) -> AppResult<Vec<Good>> {
        self.catalog.list_goods(category_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::{CategoryStore, MemoryStore};

    async fn service_with_category() -> (GoodService, MemoryStore) {
        let store = MemoryStore::new();
        store.create("Electronics").await.unwrap();
        let shared = Arc::new(store.clone());
        (GoodService::new(shared.clone(), shared), store)
    }

    #[tokio::test]
    async fn test_create_good_trims_name() {
        let (service, _) = service_with_category().await;
        let created = service.create_good(" Widget ", 1).await.unwrap();

        assert_eq!(created.good.good_name, "Widget");
        assert_eq!(created.category.category_name, "Electronics");
    }

    #[tokio::test]
    async fn test_blank_good_name_is_rejected_before_storage() {
        let (service, store) = service_with_category().await;

        let result = service.create_good("   ", 1).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert_eq!(store.good_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_adds_category_and_lists_in_both() {
        let (service, store) = service_with_category().await;
        store.create("Gifts").await.unwrap();
        service.create_good("Widget", 1).await.unwrap();

        let updated = service
            .update_good(GoodUpdate::from_wire(1, None, Some(2)))
            .await
            .unwrap();
        assert_eq!(updated.category_names, ["Electronics", "Gifts"]);

        assert_eq!(service.list_goods(1).await.unwrap().len(), 1);
        assert_eq!(service.list_goods(2).await.unwrap().len(), 1);
        assert!(service.list_goods(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlong_names_are_rejected_before_storage() {
        let (service, store) = service_with_category().await;
        let too_long = "n".repeat(crate::services::MAX_NAME_LEN + 1);

        let result = service.create_good(&too_long, 1).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert_eq!(store.good_count().await, 0);

        service.create_good("Widget", 1).await.unwrap();
        let result = service
            .update_good(GoodUpdate::from_wire(1, Some(too_long), None))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Validation { ref field, .. }) if field == "good_actual_name"
        ));
        assert_eq!(service.list_goods(1).await.unwrap()[0].good_name, "Widget");
    }
}
