use std::cmp::Ordering;
use chrono::{DateTime, Utc};
use sea_orm::ActiveEnum;
use tokio::sync::RwLock;
use crate::entity::bug::{self, BugFields, Model as BugModel};
use crate::service::query::{BugFilter, SortDirection, SortKey};
use super::{new_id, BugStore, StoreError};

/// Process-local `BugStore`, kept in insertion order.
///
/// Used when no `DATABASE_URL` is configured and by the HTTP tests.
#[derive(Default)]
pub struct InMemoryBugStore {
    bugs: RwLock<Vec<BugModel>>,
}

impl InMemoryBugStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(bug: &BugModel, filter: &BugFilter) -> bool {
    filter.status.as_ref().is_none_or(|s| bug.status.to_value() == *s)
        && filter.severity.as_ref().is_none_or(|s| bug.severity.to_value() == *s)
}

// enums compare by their stored text, same as a database column would
fn compare(a: &BugModel, b: &BugModel, column: Option<bug::Column>) -> Ordering {
    match column {
        Some(bug::Column::Id) => a.id.cmp(&b.id),
        Some(bug::Column::Title) => a.title.cmp(&b.title),
        Some(bug::Column::Description) => a.description.cmp(&b.description),
        Some(bug::Column::Reporter) => a.reporter.cmp(&b.reporter),
        Some(bug::Column::Assignee) => a.assignee.cmp(&b.assignee),
        Some(bug::Column::Severity) => a.severity.to_value().cmp(&b.severity.to_value()),
        Some(bug::Column::Status) => a.status.to_value().cmp(&b.status.to_value()),
        Some(bug::Column::CreatedAt) => a.created_at.cmp(&b.created_at),
        Some(bug::Column::UpdatedAt) => a.updated_at.cmp(&b.updated_at),
        None => Ordering::Equal,
    }
}

#[async_trait::async_trait]
impl BugStore for InMemoryBugStore {
    async fn find_all(
        &self,
        filter: &BugFilter,
        sort_key: &SortKey,
        direction: SortDirection,
    ) -> Result<Vec<BugModel>, StoreError> {
        let bugs = self.bugs.read().await;
        let mut found: Vec<BugModel> = bugs
            .iter()
            .filter(|bug| matches(bug, filter))
            .cloned()
            .collect();

        let column = sort_key.column();
        found.sort_by(|a, b| match direction {
            SortDirection::Asc => compare(a, b, column),
            SortDirection::Desc => compare(b, a, column),
        });

        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BugModel>, StoreError> {
        let bugs = self.bugs.read().await;
        Ok(bugs.iter().find(|bug| bug.id == id).cloned())
    }

    async fn insert(&self, fields: BugFields, now: DateTime<Utc>) -> Result<BugModel, StoreError> {
        let bug = BugModel::from_fields(new_id(), fields, now);
        self.bugs.write().await.push(bug.clone());
        Ok(bug)
    }

    async fn replace(
        &self,
        id: &str,
        fields: BugFields,
        now: DateTime<Utc>,
    ) -> Result<Option<BugModel>, StoreError> {
        let mut bugs = self.bugs.write().await;
        let Some(bug) = bugs.iter_mut().find(|bug| bug.id == id) else {
            return Ok(None);
        };
        bug.replace_fields(fields, now);
        Ok(Some(bug.clone()))
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut bugs = self.bugs.write().await;
        let before = bugs.len();
        bugs.retain(|bug| bug.id != id);
        Ok(bugs.len() < before)
    }
}
