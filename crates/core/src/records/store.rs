//! Contracts the remote relational store must satisfy.

use async_trait::async_trait;

use crate::bests::PersonalBest;
use crate::errors::Result;

use super::model::OwnedRecord;

/// Row-level CRUD against the remote store, per entity type.
///
/// Operations are async and fail with the store's human-readable message
/// carried in [`Error::Remote`](crate::Error::Remote). `list_by_owner`
/// returns rows newest-first; inserts return the confirmed row including the
/// server-assigned id.
#[async_trait]
pub trait RecordStore<R: OwnedRecord>: Send + Sync {
    async fn list_by_owner(&self, owner: &str, limit: Option<u32>) -> Result<Vec<R>>;

    async fn insert(&self, owner: &str, draft: &R::Draft) -> Result<R>;

    /// Batch insert used by the bulk import path. Returns rows written.
    async fn insert_many(&self, owner: &str, drafts: &[R::Draft]) -> Result<usize>;

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Read-only access to the store's precomputed personal-best view.
#[async_trait]
pub trait PersonalBestStore: Send + Sync {
    async fn list_personal_bests(&self, owner: &str) -> Result<Vec<PersonalBest>>;
}
