mod database;
mod memory;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use crate::entity::bug::{BugFields, Model as BugModel};
use crate::service::query::{BugFilter, SortDirection, SortKey};

pub use database::SeaOrmBugStore;
pub use memory::InMemoryBugStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Storage for bug records. The store assigns ids and is the source of truth
/// for whether a record exists.
#[async_trait::async_trait]
pub trait BugStore: Send + Sync {
    async fn find_all(
        &self,
        filter: &BugFilter,
        sort_key: &SortKey,
        direction: SortDirection,
    ) -> Result<Vec<BugModel>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<BugModel>, StoreError>;

    async fn insert(&self, fields: BugFields, now: DateTime<Utc>) -> Result<BugModel, StoreError>;

    /// Overwrites every mutable field and `updated_at`. `None` when no record
    /// has this id.
    async fn replace(
        &self,
        id: &str,
        fields: BugFields,
        now: DateTime<Utc>,
    ) -> Result<Option<BugModel>, StoreError>;

    /// `true` when a record was removed.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
