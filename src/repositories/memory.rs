//! In-process implementation of every storage capability.
//!
//! Backs the HTTP and service tests. A mutation runs
//! against a copy of the state and replaces it only on success, which gives
//! the same all-or-nothing behaviour as a database transaction. Id sequences
//! advance even when the mutation fails, as Postgres sequences do.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CatalogQuery, CategoryStore, GoodStore, HealthProbe, IdentityStore};
use crate::error::{AppError, AppResult};
use crate::models::{
    Category, CreatedGood, Good, GoodCategory, GoodUpdate, NewUser, UpdatedGood, User,
};

#[derive(Debug, Clone, Default)]
struct Sequences {
    users: i32,
    categories: i32,
    goods: i32,
}

impl Sequences {
    fn next(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: BTreeMap<i32, User>,
    categories: BTreeMap<i32, Category>,
    goods: BTreeMap<i32, Good>,
    links: BTreeSet<GoodCategory>,
    seq: Sequences,
}

impl MemoryState {
    fn category(&self, id: i32) -> AppResult<&Category> {
        self.categories
            .get(&id)
            .ok_or_else(|| AppError::not_found("category", "id", id))
    }

    fn category_names_of(&self, good_id: i32) -> Vec<String> {
        // BTreeSet orders by (good_id, category_id), so names come out in category id order.
        self.links
            .range(
                GoodCategory {
                    good_id,
                    category_id: i32::MIN,
                }..=GoodCategory {
                    good_id,
                    category_id: i32::MAX,
                },
            )
            .filter_map(|link| self.categories.get(&link.category_id))
            .map(|c| c.category_name.clone())
            .collect()
    }
}

fn now() -> jiff_diesel::Timestamp {
    jiff::Timestamp::now().into()
}

/// Thread-safe in-memory catalog.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` on a working copy and commits it only when `f` succeeds.
    async fn transaction<T>(&self, f: impl FnOnce(&mut MemoryState) -> AppResult<T>) -> AppResult<T> {
        let mut guard = self.state.lock().await;
        let mut working = guard.clone();

        match f(&mut working) {
            Ok(value) => {
                *guard = working;
                Ok(value)
            }
            Err(error) => {
                guard.seq = working.seq;
                Err(error)
            }
        }
    }

    /// Number of junction rows, for assertions in tests.
    pub async fn link_count(&self) -> usize {
        self.state.lock().await.links.len()
    }

    /// Number of goods, for assertions in tests.
    pub async fn good_count(&self) -> usize {
        self.state.lock().await.goods.len()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn register(&self, new_user: NewUser) -> AppResult<i32> {
        self.transaction(|state| {
            let id = Sequences::next(&mut state.seq.users);
            if state.users.values().any(|u| u.email == new_user.email) {
                return Err(AppError::Duplicate {
                    entity: "users".to_string(),
                    field: "email".to_string(),
                    value: new_user.email,
                });
            }
            state.users.insert(
                id,
                User {
                    id,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    created_at: now(),
                },
            );
            Ok(id)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        let state = self.state.lock().await;
        state
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| AppError::not_found("user", "email", email))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn create(&self, name: &str) -> AppResult<Category> {
        self.transaction(|state| {
            let id = Sequences::next(&mut state.seq.categories);
            let category = Category {
                id,
                category_name: name.to_string(),
                created_at: now(),
            };
            state.categories.insert(id, category.clone());
            Ok(category)
        })
        .await
    }

    async fn rename(&self, id: i32, new_name: &str) -> AppResult<Category> {
        self.transaction(|state| {
            let category = state
                .categories
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found("category", "id", id))?;
            category.category_name = new_name.to_string();
            Ok(category.clone())
        })
        .await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.transaction(|state| {
            state
                .categories
                .remove(&id)
                .ok_or_else(|| AppError::not_found("category", "id", id))?;
            state.links.retain(|link| link.category_id != id);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl GoodStore for MemoryStore {
    async fn create_good(&self, name: &str, category_id: i32) -> AppResult<CreatedGood> {
        self.transaction(|state| {
            let id = Sequences::next(&mut state.seq.goods);
            let good = Good {
                id,
                good_name: name.to_string(),
                created_at: now(),
            };
            state.goods.insert(id, good.clone());

            let category = state.category(category_id)?.clone();
            state.links.insert(GoodCategory {
                good_id: id,
                category_id,
            });

            Ok(CreatedGood { good, category })
        })
        .await
    }

    async fn update_good(&self, update: GoodUpdate) -> AppResult<UpdatedGood> {
        self.transaction(|state| {
            let good = state
                .goods
                .get_mut(&update.good_id)
                .ok_or_else(|| AppError::not_found("good", "id", update.good_id))?;

            if let Some(name) = update.new_name {
                good.good_name = name;
            }
            let good_name = good.good_name.clone();

            if let Some(category_id) = update.category_to_add {
                state.category(category_id)?;
                let link = GoodCategory {
                    good_id: update.good_id,
                    category_id,
                };
                if !state.links.insert(link) {
                    return Err(AppError::Duplicate {
                        entity: "good_category".to_string(),
                        field: "good_id, category_id".to_string(),
                        value: format!("{}, {}", update.good_id, category_id),
                    });
                }
            }

            Ok(UpdatedGood {
                good_id: update.good_id,
                good_name,
                category_names: state.category_names_of(update.good_id),
            })
        })
        .await
    }

    async fn delete_good(&self, id: i32) -> AppResult<()> {
        self.transaction(|state| {
            state
                .goods
                .remove(&id)
                .ok_or_else(|| AppError::not_found("good", "id", id))?;
            state.links.retain(|link| link.good_id != id);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CatalogQuery for MemoryStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn list_goods(&self, category_id: i32) -> AppResult<Vec<Good>> {
        let state = self.state.lock().await;
        let mut goods: Vec<Good> = state
            .links
            .iter()
            .filter(|link| link.category_id == category_id)
            .filter_map(|link| state.goods.get(&link.good_id))
            .cloned()
            .collect();
        goods.sort_by_key(|g| g.id);
        Ok(goods)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    async fn store_with_categories(names: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for name in names {
            store.create(name).await.unwrap();
        }
        store
    }

    fn update(good_id: i32, new_name: Option<&str>, category: Option<i32>) -> GoodUpdate {
        GoodUpdate::from_wire(good_id, new_name.map(str::to_string), category)
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let new_user = NewUser {
            email: "a@b.c".to_string(),
            password_hash: "hash".to_string(),
        };

        let first = store.register(new_user.clone()).await.unwrap();
        let second = store.register(new_user).await;

        assert_eq!(first, 1);
        assert!(matches!(second, Err(AppError::Duplicate { ref field, .. }) if field == "email"));
        assert_eq!(store.find_by_email("a@b.c").await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_find_unknown_email_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.find_by_email("nobody@example.com").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_good_commits_good_and_link() {
        let store = store_with_categories(&["Tools"]).await;

        let created = store.create_good("Hammer", 1).await.unwrap();

        assert_eq!(created.good.good_name, "Hammer");
        assert_eq!(created.category.category_name, "Tools");
        assert_eq!(store.good_count().await, 1);
        assert_eq!(store.link_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_good_with_missing_category_leaves_nothing() {
        let store = store_with_categories(&["Tools"]).await;

        let result = store.create_good("Hammer", 42).await;

        assert!(matches!(result, Err(AppError::NotFound { ref entity, .. }) if entity == "category"));
        assert_eq!(store.good_count().await, 0);
        assert_eq!(store.link_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_reuse_ids() {
        let store = store_with_categories(&["Tools"]).await;

        store.create_good("Ghost", 99).await.unwrap_err();
        let created = store.create_good("Hammer", 1).await.unwrap();

        assert_eq!(created.good.id, 2);
    }

    #[tokio::test]
    async fn test_update_with_missing_category_rolls_back_rename() {
        let store = store_with_categories(&["Tools"]).await;
        store.create_good("Hammer", 1).await.unwrap();

        let result = store.update_good(update(1, Some("Mallet"), Some(9))).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));

        let goods = store.list_goods(1).await.unwrap();
        assert_eq!(goods[0].good_name, "Hammer");
    }

    #[tokio::test]
    async fn test_repeated_category_add_is_duplicate() {
        let store = store_with_categories(&["Tools", "Garden"]).await;
        store.create_good("Rake", 1).await.unwrap();

        store.update_good(update(1, None, Some(2))).await.unwrap();
        let second = store.update_good(update(1, Some("Big Rake"), Some(2))).await;

        assert!(matches!(second, Err(AppError::Duplicate { ref entity, .. }) if entity == "good_category"));
        assert_eq!(store.link_count().await, 2);
        let goods = store.list_goods(2).await.unwrap();
        assert_eq!(goods[0].good_name, "Rake");
    }

    #[tokio::test]
    async fn test_update_unknown_good_is_not_found() {
        let store = store_with_categories(&["Tools"]).await;
        let result = store.update_good(update(5, Some("x"), None)).await;
        assert!(matches!(result, Err(AppError::NotFound { ref entity, .. }) if entity == "good"));
    }

    #[tokio::test]
    async fn test_widget_scenario() {
        let store = store_with_categories(&["Hardware", "Gifts"]).await;

        let created = store.create_good("Widget", 1).await.unwrap();
        assert_eq!(created.good.id, 1);
        assert_eq!(created.category.category_name, "Hardware");

        let linked = store.update_good(update(1, Some(""), Some(2))).await.unwrap();
        assert_eq!(linked.good_name, "Widget");
        assert_eq!(linked.category_names, vec!["Hardware", "Gifts"]);

        let renamed = store.update_good(update(1, Some("Gadget"), Some(0))).await.unwrap();
        assert_eq!(renamed.good_name, "Gadget");
        assert_eq!(renamed.category_names.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_update_reports_current_state() {
        let store = store_with_categories(&["Tools"]).await;
        store.create_good("Saw", 1).await.unwrap();

        let result = store.update_good(update(1, None, None)).await.unwrap();

        assert_eq!(result.good_name, "Saw");
        assert_eq!(result.category_names, vec!["Tools"]);
    }

    #[tokio::test]
    async fn test_list_goods_returns_direct_links_only() {
        let store = store_with_categories(&["A", "B", "C"]).await;
        store.create_good("Both", 1).await.unwrap();
        store.update_good(update(1, None, Some(2))).await.unwrap();

        assert_eq!(store.list_goods(1).await.unwrap().len(), 1);
        assert_eq!(store.list_goods(2).await.unwrap().len(), 1);
        assert!(store.list_goods(3).await.unwrap().is_empty());
        assert!(store.list_goods(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_category_cascades_links() {
        let store = store_with_categories(&["Tools", "Garden"]).await;
        store.create_good("Shovel", 1).await.unwrap();
        store.update_good(update(1, None, Some(2))).await.unwrap();

        CategoryStore::delete(&store, 1).await.unwrap();

        assert!(store.list_goods(1).await.unwrap().is_empty());
        assert_eq!(store.list_goods(2).await.unwrap().len(), 1);
        assert_eq!(store.link_count().await, 1);
        assert_eq!(store.good_count().await, 1);
    }

    #[tokio::test]
    async fn test_deleting_good_cascades_links() {
        let store = store_with_categories(&["Tools"]).await;
        store.create_good("Drill", 1).await.unwrap();

        store.delete_good(1).await.unwrap();

        assert_eq!(store.link_count().await, 0);
        assert!(store.list_goods(1).await.unwrap().is_empty());
        assert!(matches!(store.delete_good(1).await, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_category_rename_and_missing_delete() {
        let store = store_with_categories(&["Tols"]).await;

        let renamed = store.rename(1, "Tools").await.unwrap();
        assert_eq!(renamed.category_name, "Tools");
        assert!(matches!(store.rename(2, "x").await, Err(AppError::NotFound { .. })));
        assert!(matches!(
            CategoryStore::delete(&store, 2).await,
            Err(AppError::NotFound { .. })
        ));
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Creating against an existing category adds exactly one good and one link.
        #[test]
        fn prop_create_good_commits_fully(name in "[A-Za-z][A-Za-z ]{0,20}", category_count in 1usize..5, pick in 0usize..5) {
            runtime().block_on(async {
                let names: Vec<String> = (0..category_count).map(|i| format!("cat-{i}")).collect();
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let store = store_with_categories(&refs).await;
                let category_id = (pick % category_count) as i32 + 1;

                let created = store.create_good(&name, category_id).await.unwrap();

                prop_assert_eq!(&created.category.category_name, &names[category_id as usize - 1]);
                prop_assert_eq!(store.good_count().await, 1);
                prop_assert_eq!(store.link_count().await, 1);
                Ok(())
            })?;
        }

        /// Creating against a missing category leaves no good behind.
        #[test]
        fn prop_create_good_rolls_back_fully(name in "[a-z]{1,12}", missing in 2i32..1000) {
            runtime().block_on(async {
                let store = store_with_categories(&["only"]).await;

                prop_assert!(store.create_good(&name, missing).await.is_err());
                prop_assert_eq!(store.good_count().await, 0);
                prop_assert_eq!(store.link_count().await, 0);
                Ok(())
            })?;
        }

        /// Renaming twice to the same name is the same as renaming once.
        #[test]
        fn prop_rename_is_idempotent(name in "[A-Za-z]{1,16}") {
            runtime().block_on(async {
                let store = store_with_categories(&["c"]).await;
                store.create_good("initial", 1).await.unwrap();

                let first = store.update_good(update(1, Some(&name), None)).await.unwrap();
                let second = store.update_good(update(1, Some(&name), None)).await.unwrap();

                prop_assert_eq!(&first, &second);
                prop_assert_eq!(second.good_name, name);
                Ok(())
            })?;
        }

        /// An update adding a missing category never renames.
        #[test]
        fn prop_update_is_atomic(name in "[A-Za-z]{1,16}", missing in 3i32..1000) {
            runtime().block_on(async {
                let store = store_with_categories(&["a", "b"]).await;
                store.create_good("original", 1).await.unwrap();

                prop_assert!(store.update_good(update(1, Some(&name), Some(missing))).await.is_err());
                let goods = store.list_goods(1).await.unwrap();
                prop_assert_eq!(goods[0].good_name.as_str(), "original");
                prop_assert_eq!(store.link_count().await, 1);
                Ok(())
            })?;
        }
    }
}
