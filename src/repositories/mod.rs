//! Storage capabilities and their implementations.
//!
//! Each capability is a small async trait. The Postgres repositories
//! implement one capability each; `MemoryStore` implements all of them over
//! a single in-process state. Services only hold the capabilities they use.

mod catalog_repo;
mod category_repo;
mod good_repo;
mod health_repo;
mod memory;
mod user_repo;

pub use catalog_repo::CatalogRepository;
pub use category_repo::CategoryRepository;
pub use good_repo::GoodRepository;
pub use health_repo::PgHealthProbe;
pub use memory::MemoryStore;
pub use user_repo::UserRepository;

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Category, CreatedGood, Good, GoodUpdate, NewUser, UpdatedGood, User};

/// User credentials.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Stores a new user and returns its id. A taken email is `Duplicate`.
    async fn register(&self, new_user: NewUser) -> AppResult<i32>;

    /// Looks a user up by email. A missing user is `NotFound`.
    async fn find_by_email(&self, email: &str) -> AppResult<User>;
}

/// Category mutations.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn create(&self, name: &str) -> AppResult<Category>;

    /// Renames a category; `NotFound` when no row matched.
    async fn rename(&self, id: i32, new_name: &str) -> AppResult<Category>;

    /// Deletes a category and, through cascade, its links.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Goods and their category links. Every multi-step operation is atomic.
#[async_trait]
pub trait GoodStore: Send + Sync {
    /// Inserts a good and links it to `category_id`, or changes nothing.
    async fn create_good(&self, name: &str, category_id: i32) -> AppResult<CreatedGood>;

    /// Applies an optional rename and an optional new link, then reports the
    /// resulting name and category names in category id order.
    async fn update_good(&self, update: GoodUpdate) -> AppResult<UpdatedGood>;

    async fn delete_good(&self, id: i32) -> AppResult<()>;
}

/// Read-only listings.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Goods directly linked to `category_id`, in id order.
    async fn list_goods(&self, category_id: i32) -> AppResult<Vec<Good>>;
}

/// Storage reachability for readiness checks.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Short name of the backend shown in health reports.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> AppResult<()>;
}

/// All storage capabilities behind trait objects.
///
/// This struct is cheap to clone and is what the service layer is built from.
#[derive(Clone)]
pub struct Repositories {
    pub identity: Arc<dyn IdentityStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub goods: Arc<dyn GoodStore>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            identity: Arc::new(UserRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            goods: Arc::new(GoodRepository::new(pool.clone())),
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            health: Arc::new(PgHealthProbe::new(pool)),
        }
    }

    /// Every capability served by the same in-memory store.
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            identity: store.clone(),
            categories: store.clone(),
            goods: store.clone(),
            catalog: store.clone(),
            health: store,
        }
    }
}
