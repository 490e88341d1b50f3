//! Category management.

use std::sync::Arc;

use super::required_name;
use crate::error::AppResult;
use crate::models::Category;
use crate::repositories::{CatalogQuery, CategoryStore};

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    catalog: Arc<dyn CatalogQuery>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>, catalog: Arc<dyn CatalogQuery>) -> Self {
        Self { store, catalog }
    }

    pub async fn create(&self, name: &str) -> AppResult<Category> {
        let name = required_name("category_name", name)?;
        let category = self.store.create(name).await?;
        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn rename(&self, id: i32, new_name: &str) -> AppResult<Category> {
        let new_name = required_name("new_name", new_name)?;
        let category = self.store.rename(id, new_name).await?;
        tracing::info!(category_id = id, "Category renamed");
        Ok(category)
    }

    /// Deletes a category. Its links go with it; the goods stay.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.catalog.list_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::MemoryStore;

    fn service() -> CategoryService {
        let store = Arc::new(MemoryStore::new());
        CategoryService::new(store.clone(), store)
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let service = service();
        let category = service.create("  Books  ").await.unwrap();
        assert_eq!(category.category_name, "Books");
    }

    #[tokio::test]
    async fn test_blank_name_never_reaches_store() {
        let service = service();
        assert!(matches!(
            service.create("   ").await,
            Err(AppError::Validation { .. })
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_in_id_order() {
        let service = service();
        service.create("B").await.unwrap();
        service.create("A").await.unwrap();

        let names: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.category_name)
            .collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[tokio::test]
    async fn test_rename_missing_category_is_not_found() {
        let service = service();
        assert!(matches!(
            service.rename(5, "X").await,
            Err(AppError::NotFound { .. })
        ));
    }
}
