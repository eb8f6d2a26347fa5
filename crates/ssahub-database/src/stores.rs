//! Per-entity store traits and the [`Stores`] bundle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use ssahub_core::config::database::DatabaseConfig;
use ssahub_core::result::AppResult;
use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_entity::blog::{Blog, BlogFilter, BlogPatch, NewBlog};
use ssahub_entity::contact::{ContactFilter, ContactMessage, ContactPatch, NewContactMessage};
use ssahub_entity::leader::{Leader, LeaderPatch, NewLeader};
use ssahub_entity::news::{News, NewsFilter, NewsPatch, NewNews};
use ssahub_entity::resource::{NewResource, Resource, ResourceFilter, ResourcePatch};
use ssahub_entity::user::{NewUser, User, UserPatch};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::{memory, repositories};

/// Resources: soft-deleted, with a per-read download counter.
#[async_trait]
pub trait ResourceStore:
    RecordStore<Resource, NewResource, ResourcePatch> + SoftDelete<Resource>
{
    /// Active resources matching the filter, newest first.
    async fn list_active(&self, filter: &ResourceFilter) -> AppResult<Vec<Resource>>;

    /// Atomically bump the download counter of an active resource.
    /// Returns `None` if it is missing or inactive.
    async fn record_download(&self, id: Uuid) -> AppResult<Option<Resource>>;
}

/// Leaders: soft-deleted, listed by display order.
#[async_trait]
pub trait LeaderStore: RecordStore<Leader, NewLeader, LeaderPatch> + SoftDelete<Leader> {
    /// Active leaders by ascending display order, then newest first.
    async fn list_active(&self) -> AppResult<Vec<Leader>>;
}

/// News: deactivation unpublishes.
#[async_trait]
pub trait NewsStore: RecordStore<News, NewNews, NewsPatch> + SoftDelete<News> {
    /// Published articles, latest publish date first, capped at `filter.limit`.
    async fn list_published(&self, filter: &NewsFilter) -> AppResult<Vec<News>>;
}

/// Blogs: hard-deleted, with view and like counters.
#[async_trait]
pub trait BlogStore: RecordStore<Blog, NewBlog, BlogPatch> {
    /// Posts matching the filter, latest publish date first.
    async fn list(&self, filter: &BlogFilter) -> AppResult<Vec<Blog>>;

    /// Published posts by views, then likes.
    async fn popular(&self, limit: u32) -> AppResult<Vec<Blog>>;

    /// Most recently published posts.
    async fn recent(&self, limit: u32) -> AppResult<Vec<Blog>>;

    /// Bump the view counter. Unpublished posts are only counted when
    /// `include_unpublished` is set; otherwise `None` is returned.
    async fn record_view(&self, id: Uuid, include_unpublished: bool) -> AppResult<Option<Blog>>;

    /// Bump the like counter of a published post.
    async fn like(&self, id: Uuid) -> AppResult<Option<Blog>>;

    /// Remove the post and return what was removed.
    async fn delete(&self, id: Uuid) -> AppResult<Option<Blog>>;
}

/// Contact messages: hard-deleted.
#[async_trait]
pub trait ContactStore:
    RecordStore<ContactMessage, NewContactMessage, ContactPatch>
{
    /// Messages matching the filter, newest first.
    async fn list(&self, filter: &ContactFilter) -> AppResult<Vec<ContactMessage>>;

    /// Remove a message. Returns `true` if it existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Back-office accounts.
#[async_trait]
pub trait UserStore: RecordStore<User, NewUser, UserPatch> {
    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Case-insensitive lookup by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Every account, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// One store per entity, all backed by the same database.
#[derive(Clone)]
pub struct Stores {
    pub resources: Arc<dyn ResourceStore>,
    pub leaders: Arc<dyn LeaderStore>,
    pub news: Arc<dyn NewsStore>,
    pub blogs: Arc<dyn BlogStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub users: Arc<dyn UserStore>,
    pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.backend())
            .finish_non_exhaustive()
    }
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            resources: Arc::new(repositories::ResourceRepository::new(pg.clone())),
            leaders: Arc::new(repositories::LeaderRepository::new(pg.clone())),
            news: Arc::new(repositories::NewsRepository::new(pg.clone())),
            blogs: Arc::new(repositories::BlogRepository::new(pg.clone())),
            contacts: Arc::new(repositories::ContactRepository::new(pg.clone())),
            users: Arc::new(repositories::UserRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Process-local stores; contents vanish on exit.
    pub fn memory() -> Self {
        Self {
            resources: Arc::new(memory::MemoryResourceStore::default()),
            leaders: Arc::new(memory::MemoryLeaderStore::default()),
            news: Arc::new(memory::MemoryNewsStore::default()),
            blogs: Arc::new(memory::MemoryBlogStore::default()),
            contacts: Arc::new(memory::MemoryContactStore::default()),
            users: Arc::new(memory::MemoryUserStore::default()),
            pool: None,
        }
    }

    /// Open the stores named by `config.url`, migrating PostgreSQL if asked.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.is_memory() {
            info!("Using in-memory record stores; data will not persist");
            return Ok(Self::memory());
        }

        let pool = DatabasePool::connect(config).await?;
        if config.run_migrations {
            run_migrations(pool.pool()).await?;
        }
        Ok(Self::postgres(pool))
    }

    /// Name of the backing database, for health output.
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
