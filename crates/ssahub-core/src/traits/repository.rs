//! Generic record-store traits for database access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Minimal persistence contract shared by every record type.
///
/// `Draft` is the field set for a new record and `Patch` a partial update.
/// Entity-specific queries (listing, counters) live on the per-entity
/// store traits that extend this one.
#[async_trait]
pub trait RecordStore<Entity, Draft, Patch>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    Draft: Send + 'static,
    Patch: Send + 'static,
{
    /// Persist a new record and return it with generated fields filled in.
    async fn create(&self, draft: Draft) -> AppResult<Entity>;

    /// Apply a partial update. Fails with `NotFound` if `id` is unknown.
    async fn update(&self, id: Uuid, patch: Patch) -> AppResult<Entity>;

    /// Fetch a record by id regardless of its active flag.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Entity>>;
}

/// Records that are hidden rather than removed.
#[async_trait]
pub trait SoftDelete<Entity>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
{
    /// Flip the record's active/published flag off. Fails with `NotFound`.
    async fn deactivate(&self, id: Uuid) -> AppResult<Entity>;
}
